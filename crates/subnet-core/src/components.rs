//! Plain data records for nodes, connections and attacks.
//!
//! Records carry no game logic. Every mutation goes through the registry,
//! topology layer or attack engine in `subnet-sim`, which maintain the
//! derived fields (max health, throughput caps).

use serde::{Deserialize, Serialize};

use crate::enums::{AttackPhase, NodeType};
use crate::types::{AttackId, NodeId, Position};

/// A network node on the plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub position: Position,
    /// Upgrade level, starts at 1.
    pub level: u32,
    pub health: f64,
    /// `base(type) * (1 + level * 0.1)`.
    pub max_health: f64,
    /// Directly linked node ids. Always mutual.
    pub connections: Vec<NodeId>,
    /// Type tag plus type-specific data.
    pub kind: NodeKind,
}

/// Type-specific node data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Router(RouterData),
    Host(HostData),
    Honeypot(HoneypotData),
    /// Defined but passive.
    Vpn,
    /// Obfuscates nearby nodes.
    Tor,
    /// Halves damage to nearby nodes.
    DdosProtect,
}

/// Income-producing leaf attached to a router.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostData {
    pub base_income: f64,
    /// Timestamp of the last payout (ms).
    pub last_income_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouterData {
    /// Stored slot count. Effective capacity also depends on the CIDR tier.
    pub max_slots: u32,
}

/// Decoy that pulls attacks aimed at its neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoneypotData {
    /// Radius at level 0.
    pub aggro_radius: f64,
    /// Accumulated local threat, never negative.
    pub threat_level: f64,
}

/// A throughput-carrying edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Source endpoint as given at creation; throughput is drawn from it.
    pub from: NodeId,
    pub to: NodeId,
    /// Recomputed every tick.
    pub throughput: f64,
    /// `100 * level`.
    pub max_throughput: f64,
    pub level: u32,
}

/// An in-flight attack applying damage over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub id: AttackId,
    pub from: NodeId,
    pub target: NodeId,
    /// Total damage delivered at resolution.
    pub damage: f64,
    pub duration_ms: f64,
    pub start_ms: f64,
    pub phase: AttackPhase,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Router(_) => NodeType::Router,
            NodeKind::Host(_) => NodeType::Host,
            NodeKind::Honeypot(_) => NodeType::Honeypot,
            NodeKind::Vpn => NodeType::Vpn,
            NodeKind::Tor => NodeType::Tor,
            NodeKind::DdosProtect => NodeType::DdosProtect,
        }
    }
}

impl NodeData {
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Dead nodes wait for the cleanup pass.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

impl Connection {
    /// The endpoint opposite `id`.
    pub fn other_end(&self, id: &str) -> &str {
        if self.from == id {
            &self.to
        } else {
            &self.from
        }
    }

    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}
