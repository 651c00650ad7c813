//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::cidr::CidrTier;
use crate::enums::{NodeType, ResolutionKind};
use crate::types::{AttackId, NodeId};

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A node was created (placed or auto-generated).
    NodePlaced { node_id: NodeId, node_type: NodeType },
    /// A node reached zero health and was purged.
    NodeDestroyed { node_id: NodeId, node_type: NodeType },
    /// A node was removed on request.
    NodeRemoved { node_id: NodeId, node_type: NodeType },
    /// A node gained a level.
    NodeUpgraded { node_id: NodeId, level: u32 },
    /// An attack was accepted.
    AttackStarted {
        attack_id: AttackId,
        from: NodeId,
        target: NodeId,
    },
    /// An attack ran its full duration.
    AttackResolved {
        attack_id: AttackId,
        /// Node that actually took the final damage.
        victim: NodeId,
        damage: f64,
        resolution: ResolutionKind,
    },
    /// A prestige completed.
    PrestigeComplete { tier: CidrTier, total_prestiges: u32 },
    /// Global threat crossed the AI firewall threshold upward.
    FirewallAlert { threat_level: f64 },
    /// A queued command could not be applied.
    CommandRejected { reason: String },
}
