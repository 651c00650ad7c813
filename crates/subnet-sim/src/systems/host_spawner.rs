//! Host spawner: tops up every router to its current slot capacity.
//!
//! Capacity grows with router level and CIDR tier, so this runs each tick.

use subnet_core::enums::NodeType;
use subnet_core::events::SimEvent;

use crate::progression::Progression;
use crate::world::World;
use crate::world_setup;

pub fn run(world: &mut World, progression: &Progression, events: &mut Vec<SimEvent>) {
    let routers: Vec<_> = world
        .registry
        .get_nodes_by_type(NodeType::Router)
        .map(|n| n.id.clone())
        .collect();

    for router in routers {
        for host in world_setup::generate_hosts_for_router(world, progression, &router) {
            events.push(SimEvent::NodePlaced {
                node_id: host,
                node_type: NodeType::Host,
            });
        }
    }
}
