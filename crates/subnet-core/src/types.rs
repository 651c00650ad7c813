//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Node identifier. Generated ids look like `host_3`; callers may supply their own.
pub type NodeId = String;

/// Attack identifier (`attack_<n>`).
pub type AttackId = String;

/// 2D position on the open plane (world units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking. Time is supplied by the external driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed.
    pub tick: u64,
    /// Timestamp of the latest tick in milliseconds.
    pub now_ms: f64,
    /// Delta of the latest tick in milliseconds.
    pub delta_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        p.as_dvec2()
    }
}

impl SimTime {
    /// Record a new frame. Irregular deltas are fine.
    pub fn advance(&mut self, now_ms: f64, delta_ms: f64) {
        self.tick += 1;
        self.now_ms = now_ms;
        self.delta_ms = delta_ms;
    }
}
