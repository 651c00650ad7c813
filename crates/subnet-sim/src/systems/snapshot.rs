//! Snapshot system: reads the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use subnet_core::components::{Attack, NodeData, NodeKind};
use subnet_core::enums::NodeType;
use subnet_core::events::SimEvent;
use subnet_core::state::*;
use subnet_core::types::SimTime;

use crate::progression::Progression;
use crate::threat::ThreatAggregator;
use crate::world::World;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    progression: &Progression,
    threat: &ThreatAggregator,
    time: &SimTime,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        nodes: build_nodes(world, progression),
        connections: build_connections(world),
        attacks: build_attacks(world, time.now_ms),
        economy: build_economy(progression),
        threat: ThreatView {
            level: threat.threat_level(),
            percentage: threat.get_threat_percentage(),
            ai_firewall: threat.should_trigger_ai_firewall(),
            visibility: world.fog.get_visibility_percentage(progression),
        },
        events,
    }
}

fn build_nodes(world: &World, progression: &Progression) -> Vec<NodeView> {
    let registry = &world.registry;
    registry
        .get_all_nodes()
        .map(|node: &NodeData| NodeView {
            id: node.id.clone(),
            node_type: node.node_type(),
            position: node.position,
            level: node.level,
            health: node.health,
            max_health: node.max_health,
            income: registry.get_income(&node.id, progression),
            upgrade_cost: registry.get_upgrade_cost(&node.id),
            connections: node.connections.clone(),
            router_slots: (node.node_type() == NodeType::Router).then(|| {
                (
                    registry.get_router_host_count(&node.id),
                    registry.get_router_max_slots(&node.id, progression),
                )
            }),
            honeypot: match &node.kind {
                NodeKind::Honeypot(pot) => {
                    Some((registry.get_honeypot_aggro_radius(&node.id), pot.threat_level))
                }
                _ => None,
            },
        })
        .collect()
}

fn build_connections(world: &World) -> Vec<ConnectionView> {
    world
        .topology
        .get_all_connections()
        .map(|c| ConnectionView {
            from: c.from.clone(),
            to: c.to.clone(),
            level: c.level,
            throughput: c.throughput,
            max_throughput: c.max_throughput,
            overloaded: c.throughput >= c.max_throughput,
        })
        .collect()
}

fn build_attacks(world: &World, now_ms: f64) -> Vec<AttackView> {
    world
        .attacks
        .get_active_attacks()
        .map(|a: &Attack| AttackView {
            id: a.id.clone(),
            from: a.from.clone(),
            target: a.target.clone(),
            damage: a.damage,
            progress: attack_progress(a, now_ms),
            phase: a.phase,
        })
        .collect()
}

fn attack_progress(attack: &Attack, now_ms: f64) -> f64 {
    if attack.duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - attack.start_ms) / attack.duration_ms).clamp(0.0, 1.0)
}

fn build_economy(progression: &Progression) -> EconomyView {
    let prestige = progression.prestige();
    EconomyView {
        money: progression.money(),
        total_accumulated: progression.total_accumulated(),
        tier: progression.current_tier(),
        next_tier: progression.current_tier().next(),
        vision_radius: progression.get_vision_radius(),
        total_prestiges: prestige.total_prestiges,
        income_multiplier: prestige.multipliers.income,
        bandwidth_multiplier: prestige.multipliers.bandwidth,
        vision_multiplier: prestige.multipliers.vision,
    }
}
