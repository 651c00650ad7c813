//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Network node archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Router,
    Host,
    Honeypot,
    Vpn,
    Tor,
    DdosProtect,
}

/// Attack lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Damage accruing every tick.
    #[default]
    Active,
    /// Duration elapsed, final damage applied.
    Resolved,
    /// Cancelled explicitly or because an endpoint was unregistered.
    Cancelled,
}

/// How the final damage of an attack was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionKind {
    /// Full damage hit the target.
    Direct,
    /// A DDoS protector halved the damage.
    Mitigated,
    /// A honeypot absorbed the whole attack.
    Redirected,
}

impl NodeType {
    /// Every node type, in declaration order.
    pub const ALL: [NodeType; 6] = [
        NodeType::Router,
        NodeType::Host,
        NodeType::Honeypot,
        NodeType::Vpn,
        NodeType::Tor,
        NodeType::DdosProtect,
    ];

    /// Max health at level 0, before the per-level bonus.
    pub fn base_max_health(self) -> f64 {
        match self {
            NodeType::Host => HOST_BASE_MAX_HEALTH,
            NodeType::Router => ROUTER_BASE_MAX_HEALTH,
            NodeType::Honeypot => HONEYPOT_BASE_MAX_HEALTH,
            NodeType::Vpn => VPN_BASE_MAX_HEALTH,
            NodeType::Tor => TOR_BASE_MAX_HEALTH,
            NodeType::DdosProtect => DDOS_PROTECT_BASE_MAX_HEALTH,
        }
    }

    /// `base * (1 + level * 0.1)`.
    pub fn max_health_at(self, level: u32) -> f64 {
        self.base_max_health() * (1.0 + level as f64 * MAX_HEALTH_PER_LEVEL)
    }

    /// Prefix used for generated ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeType::Router => "router",
            NodeType::Host => "host",
            NodeType::Honeypot => "honeypot",
            NodeType::Vpn => "vpn",
            NodeType::Tor => "tor",
            NodeType::DdosProtect => "ddos_protect",
        }
    }

    /// Whether the player may place this type directly. Hosts only appear
    /// around routers.
    pub fn is_placeable(self) -> bool {
        !matches!(self, NodeType::Host)
    }
}
