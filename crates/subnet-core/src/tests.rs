#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use proptest::prelude::*;

    use crate::cidr::CidrTier;
    use crate::commands::PlayerCommand;
    use crate::components::{HostData, NodeData, NodeKind};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::math;
    use crate::types::{Position, SimTime};

    // ---- Geometry ----

    #[test]
    fn test_distance_345() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((math::distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_and_lerp() {
        assert_eq!(math::clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(math::clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(math::clamp(0.25, 0.0, 1.0), 0.25);
        assert_eq!(math::lerp(10.0, 20.0, 0.5), 15.0);
        assert_eq!(math::lerp(10.0, 20.0, 0.0), 10.0);
    }

    #[test]
    fn test_point_in_circle_boundary_inclusive() {
        let center = Position::new(0.0, 0.0);
        assert!(math::point_in_circle(&Position::new(10.0, 0.0), &center, 10.0));
        assert!(!math::point_in_circle(
            &Position::new(10.0 + 1e-9, 0.0),
            &center,
            10.0
        ));
    }

    #[test]
    fn test_ring_positions_quarter_turns() {
        let center = Position::new(100.0, 50.0);
        let p0 = math::ring_position(&center, 40.0, 0, 4);
        let p1 = math::ring_position(&center, 40.0, 1, 4);
        assert!((p0.x - 140.0).abs() < 1e-9 && (p0.y - 50.0).abs() < 1e-9);
        assert!((p1.x - 100.0).abs() < 1e-9 && (p1.y - 90.0).abs() < 1e-9);

        let a0 = (p0.y - center.y).atan2(p0.x - center.x);
        let a1 = (p1.y - center.y).atan2(p1.x - center.x);
        assert!((a1 - a0 - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_ring_position_zero_slots_is_center() {
        let center = Position::new(7.0, 7.0);
        assert_eq!(math::ring_position(&center, 40.0, 0, 0), center);
    }

    // ---- CIDR tiers ----

    #[test]
    fn test_cidr_ladder_order() {
        assert_eq!(CidrTier::Cidr30.next(), Some(CidrTier::Cidr24));
        assert_eq!(CidrTier::Cidr12.next(), Some(CidrTier::Cidr8));
        assert_eq!(CidrTier::Cidr8.next(), None);
        assert!(CidrTier::Cidr30 < CidrTier::Cidr8);
        assert_eq!(CidrTier::default(), CidrTier::Cidr24);
    }

    #[test]
    fn test_cidr_address_math() {
        assert_eq!(CidrTier::Cidr30.available_ips(), 4);
        assert_eq!(CidrTier::Cidr24.available_ips(), 256);
        assert_eq!(CidrTier::Cidr8.available_ips(), 1 << 24);
        assert_eq!(CidrTier::Cidr24.subnet_mask(), "255.255.255.0");
        assert_eq!(CidrTier::Cidr20.subnet_mask(), "255.255.240.0");
        assert_eq!(CidrTier::Cidr30.subnet_mask(), "255.255.255.252");
        assert_eq!(CidrTier::Cidr16.name(), "/16");
        assert_eq!(CidrTier::Cidr16.to_string(), "/16");
        assert_eq!(CidrTier::from_prefix(12), Some(CidrTier::Cidr12));
        assert_eq!(CidrTier::from_prefix(25), None);
    }

    #[test]
    fn test_cidr_serde_uses_slash_names() {
        let json = serde_json::to_string(&CidrTier::Cidr20).unwrap();
        assert_eq!(json, "\"/20\"");
        let back: CidrTier = serde_json::from_str("\"/8\"").unwrap();
        assert_eq!(back, CidrTier::Cidr8);
    }

    // ---- Node types ----

    #[test]
    fn test_max_health_table() {
        assert!((NodeType::Host.max_health_at(1) - 55.0).abs() < 1e-9);
        assert!((NodeType::Router.max_health_at(1) - 110.0).abs() < 1e-9);
        assert!((NodeType::Honeypot.max_health_at(3) - 260.0).abs() < 1e-9);
        assert!((NodeType::DdosProtect.max_health_at(0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_hosts_are_not_placeable() {
        for t in NodeType::ALL {
            assert_eq!(t.is_placeable(), t != NodeType::Host);
        }
    }

    #[test]
    fn test_node_kind_tag() {
        let node = NodeData {
            id: "host_0".into(),
            position: Position::default(),
            level: 1,
            health: 0.0,
            max_health: 55.0,
            connections: Vec::new(),
            kind: NodeKind::Host(HostData {
                base_income: 10.0,
                last_income_time: 0.0,
            }),
        };
        assert_eq!(node.node_type(), NodeType::Host);
        assert!(node.is_dead());
    }

    // ---- Serde ----

    /// Commands arrive from the frontend as tagged JSON.
    #[test]
    fn test_player_command_from_json() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"PlaceNode","node_type":"ddos_protect","x":1.0,"y":2.0}"#)
                .unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::PlaceNode {
                node_type: NodeType::DdosProtect,
                x: 1.0,
                y: 2.0
            }
        );
        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"Prestige"}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::Prestige);
    }

    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::NodeDestroyed {
                node_id: "host_1".into(),
                node_type: NodeType::Host,
            },
            SimEvent::AttackResolved {
                attack_id: "attack_0".into(),
                victim: "honeypot_2".into(),
                damage: 40.0,
                resolution: ResolutionKind::Redirected,
            },
            SimEvent::PrestigeComplete {
                tier: CidrTier::Cidr20,
                total_prestiges: 1,
            },
        ];
        for ev in &events {
            let json = serde_json::to_string(ev).unwrap();
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*ev, back);
        }
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(16.0, 16.0);
        t.advance(50.0, 34.0);
        assert_eq!(t.tick, 2);
        assert_eq!(t.now_ms, 50.0);
        assert_eq!(t.delta_ms, 34.0);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(v in -1e9f64..1e9, lo in -1e3f64..0.0, hi in 0.0f64..1e3) {
            let c = math::clamp(v, lo, hi);
            prop_assert!(c >= lo && c <= hi);
        }

        #[test]
        fn max_health_formula(level in 1u32..200) {
            for t in NodeType::ALL {
                let expected = t.base_max_health() * (1.0 + level as f64 * 0.1);
                prop_assert!((t.max_health_at(level) - expected).abs() < 1e-9);
            }
        }
    }
}
