//! Pure geometry helpers shared by the registry, attack engine, threat and fog.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::types::Position;

/// Euclidean distance between two positions.
pub fn distance(a: &Position, b: &Position) -> f64 {
    a.as_dvec2().distance(b.as_dvec2())
}

/// Clamp `value` into `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Linear interpolation from `start` to `end`.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Whether `point` lies inside or on the circle.
pub fn point_in_circle(point: &Position, center: &Position, radius: f64) -> bool {
    distance(point, center) <= radius
}

/// Total area revealed by `count` circles of `radius` (overlap ignored).
pub fn revealed_area(radius: f64, count: usize) -> f64 {
    PI * radius * radius * count as f64
}

/// The `index`-th of `slots` points evenly spaced on a circle around `center`.
/// Angle 0 points along +x.
pub fn ring_position(center: &Position, radius: f64, index: u32, slots: u32) -> Position {
    if slots == 0 {
        return *center;
    }
    let angle = index as f64 * (TAU / slots as f64);
    let offset = DVec2::from_angle(angle) * radius;
    Position::from(center.as_dvec2() + offset)
}
