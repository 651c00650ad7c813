//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::NodeType;
use crate::types::{AttackId, NodeId};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Build ---
    /// Place a node. Routers spawn their hosts immediately.
    PlaceNode { node_type: NodeType, x: f64, y: f64 },
    /// Remove a node and everything attached to it.
    RemoveNode { node_id: NodeId },
    /// Spend money to raise a node's level.
    UpgradeNode { node_id: NodeId },

    // --- Topology ---
    /// Link two nodes (range-gated).
    ConnectNodes { from: NodeId, to: NodeId },
    /// Unlink two nodes.
    DisconnectNodes { from: NodeId, to: NodeId },
    /// Raise a connection's throughput cap.
    UpgradeConnection { from: NodeId, to: NodeId },

    // --- Attacks ---
    /// Start an attack along the connection graph.
    LaunchAttack {
        from: NodeId,
        target: NodeId,
        damage: f64,
        duration_ms: f64,
    },
    /// Cancel an in-flight attack.
    CancelAttack { attack_id: AttackId },

    // --- Progression ---
    /// Jump to the next CIDR tier, resetting the map.
    Prestige,
}
