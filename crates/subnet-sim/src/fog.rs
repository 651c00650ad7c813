//! Fog of war: which parts of the plane the player's nodes can see.

use std::collections::BTreeSet;

use subnet_core::constants::WORLD_SIZE;
use subnet_core::math::{point_in_circle, revealed_area};
use subnet_core::types::{NodeId, Position};

use crate::progression::Progression;
use crate::registry::NodeRegistry;

/// Tracks the nodes that reveal the map.
#[derive(Debug, Clone, Default)]
pub struct FogOfWar {
    revealers: BTreeSet<NodeId>,
}

impl FogOfWar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_node(&mut self, id: &str) {
        self.revealers.insert(id.to_string());
    }

    pub fn unregister_node(&mut self, id: &str) {
        self.revealers.remove(id);
    }

    pub fn revealer_count(&self) -> usize {
        self.revealers.len()
    }

    pub fn clear(&mut self) {
        self.revealers.clear();
    }

    /// Whether `point` lies within vision range (inclusive) of any tracked
    /// node still present in the registry.
    pub fn is_point_visible(&self, point: &Position, registry: &NodeRegistry, progression: &Progression) -> bool {
        let radius = progression.get_vision_radius();
        self.revealers
            .iter()
            .filter_map(|id| registry.get_node(id))
            .any(|node| point_in_circle(point, &node.position, radius))
    }

    /// Revealed fraction of the world, overlap ignored, capped at 1.
    pub fn get_visibility_percentage(&self, progression: &Progression) -> f64 {
        let area = revealed_area(progression.get_vision_radius(), self.revealers.len());
        (area / (WORLD_SIZE * WORLD_SIZE)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use subnet_core::cidr::CidrTier;

    use super::*;

    #[test]
    fn visibility_radius_is_inclusive() {
        let mut fog = FogOfWar::new();
        let mut reg = NodeRegistry::new();
        let prog = Progression::new();
        let id = reg.create_router(0.0, 0.0, None, 1).unwrap().id;
        fog.register_node(&id);

        assert!(fog.is_point_visible(&Position::new(600.0, 0.0), &reg, &prog));
        assert!(!fog.is_point_visible(&Position::new(600.5, 0.0), &reg, &prog));
    }

    #[test]
    fn removed_nodes_reveal_nothing() {
        let mut fog = FogOfWar::new();
        let mut reg = NodeRegistry::new();
        let prog = Progression::new();
        let id = reg.create_router(0.0, 0.0, None, 1).unwrap().id;
        fog.register_node(&id);
        reg.remove_node(&id);
        assert!(!fog.is_point_visible(&Position::new(0.0, 0.0), &reg, &prog));

        fog.unregister_node(&id);
        assert_eq!(fog.revealer_count(), 0);
    }

    #[test]
    fn visibility_percentage_scales_and_caps() {
        let mut fog = FogOfWar::new();
        let prog = Progression::with_start(CidrTier::Cidr30, 0.0);
        assert_eq!(fog.get_visibility_percentage(&prog), 0.0);

        fog.register_node("a");
        let expected = std::f64::consts::PI * 300.0 * 300.0 / 16_000_000.0;
        assert!((fog.get_visibility_percentage(&prog) - expected).abs() < 1e-12);

        for i in 0..100 {
            fog.register_node(&format!("n{i}"));
        }
        assert_eq!(fog.get_visibility_percentage(&prog), 1.0);

        fog.clear();
        assert_eq!(fog.get_visibility_percentage(&prog), 0.0);
    }
}
