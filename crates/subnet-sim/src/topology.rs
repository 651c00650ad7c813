//! Topology layer: connection records between nodes.
//!
//! Records are keyed by the unordered id pair, so `(a, b)` and `(b, a)`
//! resolve to the same edge. The registry's `connections` lists hold the
//! adjacency; this layer holds the per-edge level and throughput.

use std::collections::{BTreeMap, BTreeSet};

use subnet_core::components::Connection;
use subnet_core::constants::{DEFAULT_MAX_CONNECTION_RANGE, THROUGHPUT_PER_LEVEL};
use subnet_core::math::distance;
use subnet_core::types::NodeId;

use crate::progression::Progression;
use crate::registry::NodeRegistry;

type PairKey = (NodeId, NodeId);

fn pair_key(a: &str, b: &str) -> PairKey {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Topology {
    connections: BTreeMap<PairKey, Connection>,
    registered: BTreeSet<NodeId>,
    max_connection_range: f64,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONNECTION_RANGE)
    }
}

impl Topology {
    pub fn new(max_connection_range: f64) -> Self {
        Self {
            connections: BTreeMap::new(),
            registered: BTreeSet::new(),
            max_connection_range,
        }
    }

    pub fn max_connection_range(&self) -> f64 {
        self.max_connection_range
    }

    pub fn set_max_connection_range(&mut self, range: f64) {
        self.max_connection_range = range;
    }

    pub fn register_node(&mut self, id: &str) {
        self.registered.insert(id.to_string());
    }

    /// Forget a node and drop every connection touching it.
    pub fn unregister_node(&mut self, id: &str) {
        self.registered.remove(id);
        self.remove_all_connections(id);
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.registered.contains(id)
    }

    /// Create a level-1 record between two existing nodes within range.
    /// A distance exactly equal to the range is accepted.
    pub fn create_connection_from_data(&mut self, from: &str, to: &str, registry: &NodeRegistry) -> bool {
        let (Some(a), Some(b)) = (registry.get_node(from), registry.get_node(to)) else {
            return false;
        };
        if from == to || self.is_connected(from, to) {
            return false;
        }
        if distance(&a.position, &b.position) > self.max_connection_range {
            return false;
        }
        self.connections.insert(
            pair_key(from, to),
            Connection {
                from: from.to_string(),
                to: to.to_string(),
                throughput: 0.0,
                max_throughput: THROUGHPUT_PER_LEVEL,
                level: 1,
            },
        );
        true
    }

    /// Drop the record and the registry link between two nodes.
    pub fn remove_connection(&mut self, from: &str, to: &str, registry: &mut NodeRegistry) -> bool {
        registry.remove_connection(from, to);
        self.connections.remove(&pair_key(from, to)).is_some()
    }

    /// Drop every record touching `id`. Registry links are left alone.
    pub fn remove_all_connections(&mut self, id: &str) {
        self.connections.retain(|_, c| !c.touches(id));
    }

    /// `min(income(from), max_throughput)`, stored on the record.
    /// 0 when no record exists.
    pub fn calculate_throughput(
        &mut self,
        from: &str,
        to: &str,
        registry: &NodeRegistry,
        progression: &Progression,
    ) -> f64 {
        let Some(conn) = self.connections.get_mut(&pair_key(from, to)) else {
            return 0.0;
        };
        let income = registry.get_income(from, progression);
        conn.throughput = income.min(conn.max_throughput);
        conn.throughput
    }

    pub fn is_overloaded(&self, from: &str, to: &str) -> bool {
        self.get_connection(from, to)
            .is_some_and(|c| c.throughput >= c.max_throughput)
    }

    pub fn upgrade_connection(&mut self, from: &str, to: &str) -> bool {
        let Some(conn) = self.connections.get_mut(&pair_key(from, to)) else {
            return false;
        };
        conn.level += 1;
        conn.max_throughput = THROUGHPUT_PER_LEVEL * conn.level as f64;
        true
    }

    pub fn is_connected(&self, from: &str, to: &str) -> bool {
        self.connections.contains_key(&pair_key(from, to))
    }

    pub fn get_connection(&self, from: &str, to: &str) -> Option<&Connection> {
        self.connections.get(&pair_key(from, to))
    }

    /// Records touching `id`.
    pub fn get_node_connections(&self, id: &str) -> Vec<&Connection> {
        self.connections.values().filter(|c| c.touches(id)).collect()
    }

    /// All records in key order.
    pub fn get_all_connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Recompute throughput on every record whose endpoints still exist.
    /// Flow is drawn from the record's `from` endpoint.
    pub fn update(&mut self, registry: &NodeRegistry, progression: &Progression) {
        for conn in self.connections.values_mut() {
            if !registry.has_node(&conn.from) || !registry.has_node(&conn.to) {
                continue;
            }
            let income = registry.get_income(&conn.from, progression);
            conn.throughput = income.min(conn.max_throughput);
        }
    }

    pub fn clear(&mut self) {
        self.connections.clear();
        self.registered.clear();
    }
}
