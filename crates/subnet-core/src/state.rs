//! Game state snapshot: the complete visible state handed to presentation
//! after each tick. Read-only by construction.

use serde::{Deserialize, Serialize};

use crate::cidr::CidrTier;
use crate::enums::{AttackPhase, NodeType};
use crate::events::SimEvent;
use crate::types::{AttackId, NodeId, Position, SimTime};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub nodes: Vec<NodeView>,
    pub connections: Vec<ConnectionView>,
    pub attacks: Vec<AttackView>,
    pub economy: EconomyView,
    pub threat: ThreatView,
    pub events: Vec<SimEvent>,
}

/// A node as drawn on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub node_type: NodeType,
    pub position: Position,
    pub level: u32,
    pub health: f64,
    pub max_health: f64,
    /// Income per payout (hosts only, otherwise 0).
    pub income: f64,
    pub upgrade_cost: f64,
    pub connections: Vec<NodeId>,
    /// Router capacity `(hosts, max_slots)`.
    pub router_slots: Option<(u32, u32)>,
    /// Honeypot `(effective aggro radius, local threat)`.
    pub honeypot: Option<(f64, f64)>,
}

/// A connection line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionView {
    pub from: NodeId,
    pub to: NodeId,
    pub level: u32,
    pub throughput: f64,
    pub max_throughput: f64,
    pub overloaded: bool,
}

/// An attack in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackView {
    pub id: AttackId,
    pub from: NodeId,
    pub target: NodeId,
    pub damage: f64,
    /// Fraction of the duration elapsed (0.0 - 1.0).
    pub progress: f64,
    pub phase: AttackPhase,
}

/// Money and prestige panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub money: f64,
    pub total_accumulated: f64,
    pub tier: CidrTier,
    pub next_tier: Option<CidrTier>,
    pub vision_radius: f64,
    pub total_prestiges: u32,
    pub income_multiplier: f64,
    pub bandwidth_multiplier: f64,
    pub vision_multiplier: f64,
}

/// Threat meter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatView {
    pub level: f64,
    /// `level / 100`.
    pub percentage: f64,
    pub ai_firewall: bool,
    /// Estimated share of the world revealed by fog-of-war (0.0 - 1.0).
    pub visibility: f64,
}
