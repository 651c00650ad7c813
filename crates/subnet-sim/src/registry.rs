//! Node registry: the authoritative store of every node on the plane.
//!
//! Operations follow a fail-quiet contract. Unknown ids and impossible
//! requests yield `false`, `None`, `0.0` or `f64::INFINITY`, never a panic,
//! so a malformed driver sequence degrades instead of stopping the tick loop.
//! Iteration is in insertion order, which keeps nearest-node scans
//! reproducible.

use std::collections::HashMap;

use subnet_core::components::{HoneypotData, HostData, NodeData, NodeKind, RouterData};
use subnet_core::constants::*;
use subnet_core::enums::NodeType;
use subnet_core::types::{NodeId, Position};

use crate::progression::Progression;

/// Every node, keyed by id, plus creation order.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: HashMap<NodeId, NodeData>,
    order: Vec<NodeId>,
    node_counter: u64,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Factories ---

    pub fn create_host(&mut self, x: f64, y: f64, id: Option<&str>, level: u32) -> Option<NodeData> {
        self.create_node(NodeType::Host, x, y, id, level)
    }

    pub fn create_router(&mut self, x: f64, y: f64, id: Option<&str>, level: u32) -> Option<NodeData> {
        self.create_node(NodeType::Router, x, y, id, level)
    }

    pub fn create_honeypot(&mut self, x: f64, y: f64, id: Option<&str>, level: u32) -> Option<NodeData> {
        self.create_node(NodeType::Honeypot, x, y, id, level)
    }

    pub fn create_vpn(&mut self, x: f64, y: f64, id: Option<&str>, level: u32) -> Option<NodeData> {
        self.create_node(NodeType::Vpn, x, y, id, level)
    }

    pub fn create_tor(&mut self, x: f64, y: f64, id: Option<&str>, level: u32) -> Option<NodeData> {
        self.create_node(NodeType::Tor, x, y, id, level)
    }

    pub fn create_ddos_protect(
        &mut self,
        x: f64,
        y: f64,
        id: Option<&str>,
        level: u32,
    ) -> Option<NodeData> {
        self.create_node(NodeType::DdosProtect, x, y, id, level)
    }

    /// Create and register a node at full health.
    /// Returns `None` only when an explicit `id` is already taken.
    /// Levels below 1 are raised to 1.
    pub fn create_node(
        &mut self,
        node_type: NodeType,
        x: f64,
        y: f64,
        id: Option<&str>,
        level: u32,
    ) -> Option<NodeData> {
        let node_id = match id {
            Some(explicit) if self.nodes.contains_key(explicit) => return None,
            Some(explicit) => explicit.to_string(),
            None => self.generate_id(node_type.id_prefix()),
        };
        let level = level.max(STARTING_LEVEL);
        let max_health = node_type.max_health_at(level);

        let kind = match node_type {
            NodeType::Host => NodeKind::Host(HostData {
                base_income: HOST_BASE_INCOME,
                last_income_time: 0.0,
            }),
            NodeType::Router => NodeKind::Router(RouterData {
                max_slots: ROUTER_DEFAULT_SLOTS,
            }),
            NodeType::Honeypot => NodeKind::Honeypot(HoneypotData {
                aggro_radius: HONEYPOT_BASE_AGGRO_RADIUS,
                threat_level: 0.0,
            }),
            NodeType::Vpn => NodeKind::Vpn,
            NodeType::Tor => NodeKind::Tor,
            NodeType::DdosProtect => NodeKind::DdosProtect,
        };

        let data = NodeData {
            id: node_id.clone(),
            position: Position::new(x, y),
            level,
            health: max_health,
            max_health,
            connections: Vec::new(),
            kind,
        };

        self.order.push(node_id.clone());
        self.nodes.insert(node_id, data.clone());
        Some(data)
    }

    /// Next free `<prefix>_<n>` id.
    pub fn generate_id(&mut self, prefix: &str) -> NodeId {
        loop {
            let candidate = format!("{prefix}_{}", self.node_counter);
            self.node_counter += 1;
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    // --- Lookup ---

    pub fn get_node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// All nodes in creation order.
    pub fn get_all_nodes(&self) -> impl Iterator<Item = &NodeData> + '_ {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn get_nodes_by_type(&self, node_type: NodeType) -> impl Iterator<Item = &NodeData> + '_ {
        self.get_all_nodes()
            .filter(move |n| n.node_type() == node_type)
    }

    /// Snapshot of ids in creation order, for loops that mutate the registry.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    // --- Lifecycle ---

    /// Remove a node and unlink it from every neighbour.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.remove(id) else {
            return false;
        };
        for neighbour in &node.connections {
            if let Some(other) = self.nodes.get_mut(neighbour) {
                other.connections.retain(|c| c != id);
            }
        }
        self.order.retain(|o| o != id);
        true
    }

    pub fn set_position(&mut self, id: &str, x: f64, y: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.position = Position::new(x, y);
        }
    }

    /// Subtract health, floored at 0. Returns whether the node is now dead.
    /// Stays `true` on every later call against the dead node. The node is
    /// not purged here; the cleanup pass does that after all damage.
    pub fn take_damage(&mut self, id: &str, amount: f64) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.health = (node.health - amount).max(0.0);
        node.health <= 0.0
    }

    pub fn heal(&mut self, id: &str, amount: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.health = (node.health + amount).min(node.max_health);
        }
    }

    // --- Links ---

    /// Link two distinct nodes in both directions.
    pub fn add_connection(&mut self, from: &str, to: &str) -> bool {
        if from == to || !self.nodes.contains_key(to) {
            return false;
        }
        match self.nodes.get(from) {
            Some(node) if !node.connections.iter().any(|c| c == to) => {}
            _ => return false,
        }
        if let Some(node) = self.nodes.get_mut(from) {
            node.connections.push(to.to_string());
        }
        if let Some(node) = self.nodes.get_mut(to) {
            node.connections.push(from.to_string());
        }
        true
    }

    /// Unlink two nodes. No-op when not linked.
    pub fn remove_connection(&mut self, from: &str, to: &str) {
        if let Some(node) = self.nodes.get_mut(from) {
            node.connections.retain(|c| c != to);
        }
        if let Some(node) = self.nodes.get_mut(to) {
            node.connections.retain(|c| c != from);
        }
    }

    pub fn is_linked(&self, from: &str, to: &str) -> bool {
        self.nodes
            .get(from)
            .is_some_and(|n| n.connections.iter().any(|c| c == to))
    }

    // --- Upgrades ---

    /// Pay the upgrade cost, then level up and fully heal.
    pub fn upgrade(&mut self, id: &str, progression: &mut Progression) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        let cost = self.get_upgrade_cost(id);
        if !progression.spend_money(cost) {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.level += 1;
            node.max_health = node.node_type().max_health_at(node.level);
            node.health = node.max_health;
        }
        true
    }

    /// Exponential cost of the next level. Infinite for unknown ids.
    pub fn get_upgrade_cost(&self, id: &str) -> f64 {
        let Some(node) = self.nodes.get(id) else {
            return f64::INFINITY;
        };
        let level = node.level as i32;
        match node.node_type() {
            NodeType::Host => HOST_UPGRADE_BASE * HOST_UPGRADE_GROWTH.powi(level),
            NodeType::Honeypot => HONEYPOT_UPGRADE_BASE * HONEYPOT_UPGRADE_GROWTH.powi(level),
            NodeType::Router | NodeType::Vpn | NodeType::Tor | NodeType::DdosProtect => {
                ROUTER_UPGRADE_BASE * ROUTER_UPGRADE_GROWTH.powi(level)
            }
        }
    }

    // --- Hosts ---

    /// `base_income * level * income_multiplier` for hosts, 0 otherwise.
    pub fn get_income(&self, id: &str, progression: &Progression) -> f64 {
        match self.nodes.get(id) {
            Some(NodeData {
                level,
                kind: NodeKind::Host(host),
                ..
            }) => host.base_income * *level as f64 * progression.income_multiplier(),
            _ => 0.0,
        }
    }

    /// Pay out a host's income if a full interval has passed since the last
    /// payout. Returns the amount paid (0 if not due or not a host).
    pub fn generate_income(&mut self, id: &str, now: f64, progression: &mut Progression) -> f64 {
        let income = self.get_income(id, progression);
        let Some(NodeData {
            kind: NodeKind::Host(host),
            ..
        }) = self.nodes.get_mut(id)
        else {
            return 0.0;
        };
        if now - host.last_income_time < HOST_INCOME_INTERVAL_MS {
            return 0.0;
        }
        host.last_income_time = now;
        progression.add_money(income);
        progression.add_bandwidth(income);
        income
    }

    // --- Routers ---

    /// `floor(2^((24 - prefix)/4) * 4) + floor(level/2)`, 0 for non-routers.
    pub fn get_router_max_slots(&self, id: &str, progression: &Progression) -> u32 {
        match self.nodes.get(id) {
            Some(node) if node.node_type() == NodeType::Router => {
                let prefix = progression.current_tier().prefix_len() as f64;
                let exponent = (ROUTER_REFERENCE_PREFIX - prefix) / ROUTER_PREFIX_BITS_PER_DOUBLING;
                let base_slots = (2f64.powf(exponent) * ROUTER_BASE_SLOTS).floor() as u32;
                base_slots + node.level / 2
            }
            _ => 0,
        }
    }

    /// Hosts directly linked to a router.
    pub fn get_router_host_count(&self, id: &str) -> u32 {
        match self.nodes.get(id) {
            Some(node) if node.node_type() == NodeType::Router => node
                .connections
                .iter()
                .filter_map(|c| self.nodes.get(c))
                .filter(|n| n.node_type() == NodeType::Host)
                .count() as u32,
            _ => 0,
        }
    }

    pub fn router_has_available_slots(&self, id: &str, progression: &Progression) -> bool {
        self.get_router_host_count(id) < self.get_router_max_slots(id, progression)
    }

    // --- Honeypots ---

    /// `aggro_radius * (1 + level * 0.15)`, 0 for non-honeypots.
    pub fn get_honeypot_aggro_radius(&self, id: &str) -> f64 {
        match self.nodes.get(id) {
            Some(NodeData {
                level,
                kind: NodeKind::Honeypot(pot),
                ..
            }) => pot.aggro_radius * (1.0 + *level as f64 * HONEYPOT_AGGRO_PER_LEVEL),
            _ => 0.0,
        }
    }

    pub fn get_honeypot_threat(&self, id: &str) -> f64 {
        match self.nodes.get(id) {
            Some(NodeData {
                kind: NodeKind::Honeypot(pot),
                ..
            }) => pot.threat_level,
            _ => 0.0,
        }
    }

    pub fn add_honeypot_threat(&mut self, id: &str, amount: f64) {
        if let Some(pot) = self.honeypot_mut(id) {
            pot.threat_level = (pot.threat_level + amount).max(0.0);
        }
    }

    pub fn reduce_honeypot_threat(&mut self, id: &str, amount: f64) {
        if let Some(pot) = self.honeypot_mut(id) {
            pot.threat_level = (pot.threat_level - amount).max(0.0);
        }
    }

    fn honeypot_mut(&mut self, id: &str) -> Option<&mut HoneypotData> {
        match self.nodes.get_mut(id) {
            Some(NodeData {
                kind: NodeKind::Honeypot(pot),
                ..
            }) => Some(pot),
            _ => None,
        }
    }

    // --- Tick ---

    /// Host payouts at `time`, honeypot threat decay over `delta`.
    pub fn update(&mut self, time: f64, delta: f64, progression: &mut Progression) {
        for id in self.node_ids() {
            let Some(node_type) = self.nodes.get(&id).map(NodeData::node_type) else {
                continue;
            };
            match node_type {
                NodeType::Host => {
                    self.generate_income(&id, time, progression);
                }
                NodeType::Honeypot => {
                    self.reduce_honeypot_threat(&id, delta * HONEYPOT_THREAT_DECAY_PER_MS);
                }
                NodeType::Router | NodeType::Vpn | NodeType::Tor | NodeType::DdosProtect => {}
            }
        }
    }

    /// Drop every node and restart id generation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.node_counter = 0;
    }
}
