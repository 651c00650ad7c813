//! Node placement and removal across every store of the world.
//!
//! Placement creates the registry record and registers the id with topology,
//! the attack engine and fog. Routers get their hosts immediately.

use subnet_core::constants::{HOST_RING_RADIUS, STARTING_LEVEL};
use subnet_core::enums::NodeType;
use subnet_core::math::ring_position;
use subnet_core::types::NodeId;

use crate::progression::Progression;
use crate::world::World;

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub node_id: NodeId,
    /// Hosts generated for a placed router.
    pub hosts: Vec<NodeId>,
}

/// Place a player node. Hosts are never placed by hand.
pub fn place_node(
    world: &mut World,
    progression: &Progression,
    node_type: NodeType,
    x: f64,
    y: f64,
) -> Option<Placement> {
    if !node_type.is_placeable() {
        return None;
    }
    let node = world
        .registry
        .create_node(node_type, x, y, None, STARTING_LEVEL)?;
    register_everywhere(world, &node.id);

    let hosts = match node_type {
        NodeType::Router => generate_hosts_for_router(world, progression, &node.id),
        _ => Vec::new(),
    };
    Some(Placement {
        node_id: node.id,
        hosts,
    })
}

/// Fill a router's free slots with hosts on a ring around it, linked and
/// registered. Slot `i` sits at angle `i * 2π / max_slots`.
pub fn generate_hosts_for_router(world: &mut World, progression: &Progression, router_id: &str) -> Vec<NodeId> {
    let Some(center) = world.registry.get_node(router_id).map(|n| n.position) else {
        return Vec::new();
    };
    let max_slots = world.registry.get_router_max_slots(router_id, progression);
    let current = world.registry.get_router_host_count(router_id);

    let mut created = Vec::new();
    for slot in current..max_slots {
        let pos = ring_position(&center, HOST_RING_RADIUS, slot, max_slots);
        let Some(host) = world
            .registry
            .create_host(pos.x, pos.y, None, STARTING_LEVEL)
        else {
            continue;
        };
        world.registry.add_connection(router_id, &host.id);
        world
            .topology
            .create_connection_from_data(router_id, &host.id, &world.registry);
        register_everywhere(world, &host.id);
        created.push(host.id);
    }
    created
}

/// Remove a node from topology, attacks, fog and finally the registry.
pub fn remove_node(world: &mut World, id: &str) -> bool {
    world.topology.unregister_node(id);
    world.attacks.unregister_node(id);
    world.fog.unregister_node(id);
    world.registry.remove_node(id)
}

fn register_everywhere(world: &mut World, id: &str) {
    world.topology.register_node(id);
    world.attacks.register_node_data(id);
    world.fog.register_node(id);
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use subnet_core::cidr::CidrTier;
    use subnet_core::math::distance;

    use super::*;

    #[test]
    fn router_on_24_gets_four_hosts_on_ring() {
        let mut world = World::default();
        let prog = Progression::new();
        let placed = place_node(&mut world, &prog, NodeType::Router, 0.0, 0.0).unwrap();
        assert_eq!(placed.hosts.len(), 4);

        let router = world.registry.get_node(&placed.node_id).unwrap().clone();
        for (i, host_id) in placed.hosts.iter().enumerate() {
            let host = world.registry.get_node(host_id).unwrap();
            assert_eq!(host.node_type(), NodeType::Host);
            assert!((distance(&host.position, &router.position) - 40.0).abs() < 1e-9);

            let angle = host.position.y.atan2(host.position.x).rem_euclid(std::f64::consts::TAU);
            assert!((angle - i as f64 * FRAC_PI_2).abs() < 1e-9);

            assert!(world.registry.is_linked(&router.id, host_id));
            assert!(world.topology.is_connected(&router.id, host_id));
            assert_eq!(world.topology.get_connection(&router.id, host_id).unwrap().from, router.id);
            assert!(world.attacks.is_tracked(host_id));
        }
        assert_eq!(world.registry.get_router_host_count(&router.id), 4);
        assert_eq!(world.fog.revealer_count(), 5);
    }

    #[test]
    fn hosts_are_not_placeable() {
        let mut world = World::default();
        let prog = Progression::new();
        assert!(place_node(&mut world, &prog, NodeType::Host, 0.0, 0.0).is_none());
        assert_eq!(world.registry.node_count(), 0);
    }

    #[test]
    fn honeypot_placement_has_no_hosts() {
        let mut world = World::default();
        let prog = Progression::new();
        let placed = place_node(&mut world, &prog, NodeType::Honeypot, 5.0, 5.0).unwrap();
        assert!(placed.hosts.is_empty());
        assert!(world.topology.is_registered(&placed.node_id));
        assert!(world.attacks.is_tracked(&placed.node_id));
    }

    #[test]
    fn generation_fills_only_new_slots() {
        let mut world = World::default();
        let mut prog = Progression::new();
        let router = place_node(&mut world, &prog, NodeType::Router, 0.0, 0.0)
            .unwrap()
            .node_id;
        assert!(generate_hosts_for_router(&mut world, &prog, &router).is_empty());

        prog.set_tier(CidrTier::Cidr20);
        let extra = generate_hosts_for_router(&mut world, &prog, &router);
        assert_eq!(extra.len(), 4);
        assert_eq!(world.registry.get_router_host_count(&router), 8);
    }

    #[test]
    fn refill_after_removal_stacks_on_last_slot() {
        let mut world = World::default();
        let prog = Progression::new();
        let placed = place_node(&mut world, &prog, NodeType::Router, 0.0, 0.0).unwrap();
        let router = placed.node_id;
        let last = world.registry.get_node(&placed.hosts[3]).unwrap().position;

        assert!(remove_node(&mut world, &placed.hosts[0]));
        let refill = generate_hosts_for_router(&mut world, &prog, &router);
        assert_eq!(refill.len(), 1);

        // Slot 3 is reused, slot 0 at (40, 0) stays empty.
        let pos = world.registry.get_node(&refill[0]).unwrap().position;
        assert!(distance(&pos, &last) < 1e-9);
        assert!((pos.y + 40.0).abs() < 1e-9);
        let slot_zero = ring_position(&world.registry.get_node(&router).unwrap().position, 40.0, 0, 4);
        assert!(world
            .registry
            .get_all_nodes()
            .all(|n| distance(&n.position, &slot_zero) > 1e-9));
        assert_eq!(world.registry.get_router_host_count(&router), 4);
    }

    #[test]
    fn generation_for_unknown_router_is_noop() {
        let mut world = World::default();
        let prog = Progression::new();
        assert!(generate_hosts_for_router(&mut world, &prog, "ghost").is_empty());
    }

    #[test]
    fn remove_node_clears_every_store() {
        let mut world = World::default();
        let prog = Progression::new();
        let placed = place_node(&mut world, &prog, NodeType::Router, 0.0, 0.0).unwrap();
        let router = placed.node_id;
        let host = placed.hosts[0].clone();
        world.attacks.set_clock(0.0);
        world
            .attacks
            .start_attack(&router, &host, 10.0, 1000.0, &world.registry, &world.topology)
            .unwrap();

        assert!(remove_node(&mut world, &router));
        assert!(!world.registry.has_node(&router));
        assert!(world.topology.get_node_connections(&router).is_empty());
        assert!(!world.attacks.is_tracked(&router));
        assert_eq!(world.attacks.attack_count(), 0);
        assert_eq!(world.fog.revealer_count(), 4);
        assert!(world.registry.get_node(&host).unwrap().connections.is_empty());

        assert!(!remove_node(&mut world, &router));
    }
}
