//! Cleanup system: removes nodes whose health reached zero.
//!
//! Death is polled here after all damage for the tick has been applied.

use tracing::debug;

use subnet_core::events::SimEvent;
use subnet_core::types::NodeId;

use crate::world::World;
use crate::world_setup;

/// Remove every dead node from all stores, in creation order.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<NodeId>, events: &mut Vec<SimEvent>) {
    despawn_buffer.clear();
    despawn_buffer.extend(
        world
            .registry
            .get_all_nodes()
            .filter(|n| n.is_dead())
            .map(|n| n.id.clone()),
    );

    for id in despawn_buffer.drain(..) {
        let Some(node_type) = world.registry.get_node(&id).map(|n| n.node_type()) else {
            continue;
        };
        if world_setup::remove_node(world, &id) {
            debug!(node = %id, ?node_type, "node destroyed");
            events.push(SimEvent::NodeDestroyed {
                node_id: id,
                node_type,
            });
        }
    }
}
