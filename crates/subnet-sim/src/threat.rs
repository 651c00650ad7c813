//! Global threat level, rebuilt from the registry every tick.

use subnet_core::constants::*;
use subnet_core::enums::NodeType;
use subnet_core::math::{clamp, revealed_area};

use crate::progression::Progression;
use crate::registry::NodeRegistry;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThreatAggregator {
    threat_level: f64,
}

impl ThreatAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from scratch: area exposure + node count + honeypot heat,
    /// clamped to `[0, MAX_THREAT]`.
    pub fn calculate_threat_from_data(&mut self, registry: &NodeRegistry, progression: &Progression) -> f64 {
        let count = registry.node_count();
        let vision = progression.get_vision_radius();

        let area = (revealed_area(vision, count) / AREA_THREAT_DIVISOR).min(AREA_THREAT_CAP);
        let density = (count as f64 * COUNT_THREAT_PER_NODE).min(COUNT_THREAT_CAP);
        let honeypots: f64 = registry
            .get_nodes_by_type(NodeType::Honeypot)
            .map(|n| registry.get_honeypot_threat(&n.id))
            .sum();

        self.threat_level = clamp(area + density + honeypots, 0.0, MAX_THREAT);
        self.threat_level
    }

    /// Linear decay. Runs after the recompute, so its effect only lasts
    /// until the next one.
    pub fn update(&mut self, delta: f64) {
        self.threat_level = (self.threat_level - THREAT_DECAY_PER_SEC * delta / 1000.0).max(0.0);
    }

    pub fn threat_level(&self) -> f64 {
        self.threat_level
    }

    pub fn get_threat_percentage(&self) -> f64 {
        self.threat_level / MAX_THREAT
    }

    pub fn should_trigger_ai_firewall(&self) -> bool {
        self.threat_level >= MAX_THREAT * AI_FIREWALL_THRESHOLD
    }

    pub fn add_threat(&mut self, amount: f64) {
        self.threat_level = clamp(self.threat_level + amount, 0.0, MAX_THREAT);
    }

    pub fn reset(&mut self) {
        self.threat_level = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use subnet_core::cidr::CidrTier;

    use super::*;

    #[test]
    fn empty_registry_has_no_threat() {
        let mut threat = ThreatAggregator::new();
        let reg = NodeRegistry::new();
        assert_eq!(threat.calculate_threat_from_data(&reg, &Progression::new()), 0.0);
        assert!(!threat.should_trigger_ai_firewall());
    }

    #[test]
    fn components_are_capped_separately() {
        let mut threat = ThreatAggregator::new();
        let mut reg = NodeRegistry::new();
        let mut prog = Progression::new();
        prog.set_tier(CidrTier::Cidr30);
        // Vision 300: one node reveals ~28.3 area threat, count adds 2.
        reg.create_router(0.0, 0.0, None, 1);
        let level = threat.calculate_threat_from_data(&reg, &prog);
        let expected = std::f64::consts::PI * 300.0 * 300.0 / 10_000.0 + 2.0;
        assert!((level - expected).abs() < 1e-9);

        // Both components saturate at 50 + 30.
        for _ in 0..20 {
            reg.create_router(0.0, 0.0, None, 1);
        }
        assert_eq!(threat.calculate_threat_from_data(&reg, &prog), 80.0);
    }

    #[test]
    fn honeypot_heat_is_added_and_total_clamped() {
        let mut threat = ThreatAggregator::new();
        let mut reg = NodeRegistry::new();
        let prog = Progression::new();
        let pot = reg.create_honeypot(0.0, 0.0, None, 1).unwrap().id;
        reg.add_honeypot_threat(&pot, 10.0);
        // Vision 600 saturates area; 1 node = 2.
        assert!((threat.calculate_threat_from_data(&reg, &prog) - 62.0).abs() < 1e-9);

        reg.add_honeypot_threat(&pot, 1000.0);
        assert_eq!(threat.calculate_threat_from_data(&reg, &prog), 100.0);
        assert!(threat.should_trigger_ai_firewall());
        assert_eq!(threat.get_threat_percentage(), 1.0);
    }

    #[test]
    fn ten_thousand_nodes_stay_bounded() {
        let mut threat = ThreatAggregator::new();
        let mut reg = NodeRegistry::new();
        let prog = Progression::with_start(CidrTier::Cidr8, 0.0);
        for i in 0..10_000 {
            let id = reg.create_honeypot(i as f64, 0.0, None, 1).unwrap().id;
            reg.add_honeypot_threat(&id, 5.0);
        }
        let level = threat.calculate_threat_from_data(&reg, &prog);
        assert!(level <= 100.0);
        assert_eq!(level, 100.0);
    }

    #[test]
    fn decay_applies_after_recompute_only() {
        let mut threat = ThreatAggregator::new();
        let mut reg = NodeRegistry::new();
        let prog = Progression::new();
        for _ in 0..10 {
            reg.create_router(0.0, 0.0, None, 1);
        }
        let level = threat.calculate_threat_from_data(&reg, &prog);
        threat.update(10_000.0);
        assert!((threat.threat_level() - (level - 1.0)).abs() < 1e-9);
        // Next recompute overwrites the decay.
        assert_eq!(threat.calculate_threat_from_data(&reg, &prog), level);
    }

    #[test]
    fn firewall_threshold_is_inclusive() {
        let mut threat = ThreatAggregator::new();
        threat.add_threat(69.5);
        assert!(!threat.should_trigger_ai_firewall());
        threat.add_threat(0.5);
        assert!(threat.should_trigger_ai_firewall());
    }

    #[test]
    fn add_threat_clamps() {
        let mut threat = ThreatAggregator::new();
        threat.add_threat(250.0);
        assert_eq!(threat.threat_level(), 100.0);
        threat.add_threat(-500.0);
        assert_eq!(threat.threat_level(), 0.0);
        threat.add_threat(30.0);
        threat.reset();
        assert_eq!(threat.threat_level(), 0.0);
    }

    proptest! {
        #[test]
        fn threat_stays_in_range(
            nodes in 0usize..200,
            heat in prop::collection::vec(0.0f64..1e6, 0..20),
            delta in 0.0f64..1e6,
        ) {
            let mut threat = ThreatAggregator::new();
            let mut reg = NodeRegistry::new();
            let prog = Progression::new();
            for _ in 0..nodes {
                reg.create_router(0.0, 0.0, None, 1);
            }
            for h in heat {
                let id = reg.create_honeypot(0.0, 0.0, None, 1).unwrap().id;
                reg.add_honeypot_threat(&id, h);
            }
            let level = threat.calculate_threat_from_data(&reg, &prog);
            prop_assert!((0.0..=100.0).contains(&level));
            threat.update(delta);
            prop_assert!((0.0..=100.0).contains(&threat.threat_level()));
        }
    }
}
