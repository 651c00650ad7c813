//! Reasons a queued player command was not applied.

use thiserror::Error;

use subnet_core::enums::NodeType;
use subnet_core::types::NodeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("{0:?} nodes cannot be placed manually")]
    NotPlaceable(NodeType),
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("cannot afford upgrade of {node_id} (costs {cost:.0})")]
    InsufficientFunds { node_id: NodeId, cost: f64 },
    #[error("cannot connect {from} to {to}: out of range or already linked")]
    ConnectionRefused { from: NodeId, to: NodeId },
    #[error("no connection between {from} and {to}")]
    NoConnection { from: NodeId, to: NodeId },
    #[error("attack from {from} on {target} refused: target hidden or unreachable")]
    AttackRefused { from: NodeId, target: NodeId },
    #[error("unknown attack {0}")]
    UnknownAttack(String),
    #[error("damage and duration must be finite and non-negative")]
    InvalidAttackParameters,
    #[error("already at the largest tier")]
    MaxTier,
}
