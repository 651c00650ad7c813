//! Attack engine: damage-over-time attacks travelling along connections.
//!
//! An attack is Active from `start_attack` until its duration elapses, at
//! which point the final damage is resolved (honeypot redirect, DDoS
//! mitigation, capture on death) and the attack is removed. While active it
//! bleeds partial damage every tick, mitigated by DDoS protection only.
//!
//! The engine keeps its own set of tracked node ids, separate from the
//! registry. Attacks can only be started between tracked nodes and are
//! cancelled when either endpoint is unregistered.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use tracing::debug;

use subnet_core::components::{Attack, NodeData};
use subnet_core::constants::*;
use subnet_core::enums::{AttackPhase, NodeType, ResolutionKind};
use subnet_core::math::distance;
use subnet_core::types::{AttackId, NodeId, Position};

use crate::registry::NodeRegistry;
use crate::topology::Topology;

/// Called when a resolved attack kills its target.
pub trait CaptureHook {
    fn on_capture(&mut self, attacker: &str, victim: &str, registry: &mut NodeRegistry);
}

/// Leaves the dead node for the cleanup pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl CaptureHook for NoCapture {
    fn on_capture(&mut self, _attacker: &str, _victim: &str, _registry: &mut NodeRegistry) {}
}

/// Result of one attack reaching the end of its duration.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub attack_id: AttackId,
    pub from: NodeId,
    pub target: NodeId,
    /// Node that actually took the damage (the honeypot on redirect).
    pub victim: NodeId,
    /// Damage applied after mitigation.
    pub damage: f64,
    pub resolution: ResolutionKind,
    pub victim_destroyed: bool,
}

pub struct AttackEngine {
    attacks: BTreeMap<u64, Attack>,
    tracked: BTreeSet<NodeId>,
    next_attack_id: u64,
    clock: f64,
    capture: Box<dyn CaptureHook>,
}

impl Default for AttackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackEngine {
    pub fn new() -> Self {
        Self::with_capture_hook(Box::new(NoCapture))
    }

    pub fn with_capture_hook(capture: Box<dyn CaptureHook>) -> Self {
        Self {
            attacks: BTreeMap::new(),
            tracked: BTreeSet::new(),
            next_attack_id: 0,
            clock: 0.0,
            capture,
        }
    }

    pub fn set_capture_hook(&mut self, capture: Box<dyn CaptureHook>) {
        self.capture = capture;
    }

    pub fn register_node_data(&mut self, id: &str) {
        self.tracked.insert(id.to_string());
    }

    /// Stop tracking `id` and cancel every attack it takes part in.
    /// Returns the number of cancelled attacks.
    pub fn unregister_node(&mut self, id: &str) -> usize {
        self.tracked.remove(id);
        let before = self.attacks.len();
        self.attacks.retain(|_, a| a.from != id && a.target != id);
        before - self.attacks.len()
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.tracked.contains(id)
    }

    /// Tracked ids in sorted order.
    pub fn tracked_nodes(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.tracked.iter()
    }

    /// Timestamp stamped on newly started attacks.
    pub fn set_clock(&mut self, now: f64) {
        self.clock = now;
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Launch an attack from `from` at `to`. Rejected when either endpoint is
    /// unknown or untracked, when the target is hidden by a TOR node, or when
    /// no chain of connections joins the two. A node may target itself.
    pub fn start_attack(
        &mut self,
        from: &str,
        to: &str,
        damage: f64,
        duration_ms: f64,
        registry: &NodeRegistry,
        topology: &Topology,
    ) -> Option<AttackId> {
        if !self.is_tracked(from) || !self.is_tracked(to) {
            return None;
        }
        let (Some(_), Some(target)) = (registry.get_node(from), registry.get_node(to)) else {
            return None;
        };
        if is_obfuscated(registry, target) {
            return None;
        }
        if !topology.is_connected(from, to) && !has_path(topology, from, to) {
            return None;
        }

        let id = format!("attack_{}", self.next_attack_id);
        self.attacks.insert(
            self.next_attack_id,
            Attack {
                id: id.clone(),
                from: from.to_string(),
                target: to.to_string(),
                damage,
                duration_ms,
                start_ms: self.clock,
                phase: AttackPhase::Active,
            },
        );
        self.next_attack_id += 1;
        Some(id)
    }

    /// Advance every active attack in id order.
    pub fn update(&mut self, time: f64, delta: f64, registry: &mut NodeRegistry) -> Vec<AttackOutcome> {
        self.clock = time;
        let mut outcomes = Vec::new();
        let keys: Vec<u64> = self.attacks.keys().copied().collect();

        for key in keys {
            let Some(attack) = self.attacks.get(&key) else {
                continue;
            };
            let elapsed = time - attack.start_ms;
            if elapsed >= attack.duration_ms {
                let Some(mut attack) = self.attacks.remove(&key) else {
                    continue;
                };
                attack.phase = AttackPhase::Resolved;
                if let Some(outcome) = self.resolve(&attack, registry) {
                    outcomes.push(outcome);
                }
            } else {
                let per_second = attack.damage / (attack.duration_ms / 1000.0);
                let this_tick = per_second * (delta / 1000.0);
                let target = attack.target.clone();
                let Some(pos) = registry.get_node(&target).map(|n| n.position) else {
                    continue;
                };
                let amount = if nearest_ddos_protect(registry, &pos).is_some() {
                    this_tick * DDOS_DAMAGE_FACTOR
                } else {
                    this_tick
                };
                registry.take_damage(&target, amount);
            }
        }
        outcomes
    }

    fn resolve(&mut self, attack: &Attack, registry: &mut NodeRegistry) -> Option<AttackOutcome> {
        let pos = registry.get_node(&attack.target)?.position;

        if let Some(pot) = nearest_honeypot(registry, &pos) {
            registry.add_honeypot_threat(&pot, attack.damage * HONEYPOT_THREAT_SHARE);
            let destroyed = registry.take_damage(&pot, attack.damage);
            debug!(attack = %attack.id, honeypot = %pot, "attack redirected");
            return Some(AttackOutcome {
                attack_id: attack.id.clone(),
                from: attack.from.clone(),
                target: attack.target.clone(),
                victim: pot,
                damage: attack.damage,
                resolution: ResolutionKind::Redirected,
                victim_destroyed: destroyed,
            });
        }

        let (damage, resolution) = match nearest_ddos_protect(registry, &pos) {
            Some(_) => (attack.damage * DDOS_DAMAGE_FACTOR, ResolutionKind::Mitigated),
            None => (attack.damage, ResolutionKind::Direct),
        };
        let destroyed = registry.take_damage(&attack.target, damage);
        if destroyed {
            self.capture.on_capture(&attack.from, &attack.target, registry);
        }
        debug!(attack = %attack.id, target = %attack.target, damage, destroyed, "attack resolved");

        Some(AttackOutcome {
            attack_id: attack.id.clone(),
            from: attack.from.clone(),
            target: attack.target.clone(),
            victim: attack.target.clone(),
            damage,
            resolution,
            victim_destroyed: destroyed,
        })
    }

    /// Remove an attack whatever its state.
    pub fn cancel_attack(&mut self, id: &str) -> bool {
        let before = self.attacks.len();
        self.attacks.retain(|_, a| a.id != id);
        before != self.attacks.len()
    }

    pub fn get_attack(&self, id: &str) -> Option<&Attack> {
        self.attacks.values().find(|a| a.id == id)
    }

    /// Active attacks in id order.
    pub fn get_active_attacks(&self) -> impl Iterator<Item = &Attack> + '_ {
        self.attacks.values()
    }

    pub fn attack_count(&self) -> usize {
        self.attacks.len()
    }

    /// Drop attacks and tracking. The capture hook is kept.
    pub fn clear(&mut self) {
        self.attacks.clear();
        self.tracked.clear();
        self.next_attack_id = 0;
    }
}

// --- Area effects ---

/// Whether a TOR node other than `target` sits strictly within range.
pub fn is_obfuscated(registry: &NodeRegistry, target: &NodeData) -> bool {
    registry
        .get_nodes_by_type(NodeType::Tor)
        .any(|tor| tor.id != target.id && distance(&tor.position, &target.position) < TOR_OBFUSCATION_RADIUS)
}

/// Closest honeypot whose aggro radius covers `pos`. Ties go to the
/// earliest created.
pub fn nearest_honeypot(registry: &NodeRegistry, pos: &Position) -> Option<NodeId> {
    nearest_where(registry, NodeType::Honeypot, pos, |node, d| {
        d <= registry.get_honeypot_aggro_radius(&node.id)
    })
}

/// Closest DDoS protector within its fixed radius of `pos`.
pub fn nearest_ddos_protect(registry: &NodeRegistry, pos: &Position) -> Option<NodeId> {
    nearest_where(registry, NodeType::DdosProtect, pos, |_, d| d <= DDOS_PROTECT_RADIUS)
}

fn nearest_where(
    registry: &NodeRegistry,
    node_type: NodeType,
    pos: &Position,
    covers: impl Fn(&NodeData, f64) -> bool,
) -> Option<NodeId> {
    let mut best: Option<(&NodeData, f64)> = None;
    for node in registry.get_nodes_by_type(node_type) {
        let d = distance(&node.position, pos);
        if !covers(node, d) {
            continue;
        }
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((node, d));
        }
    }
    best.map(|(node, _)| node.id.clone())
}

/// Breadth-first search over connection records, treated as undirected.
pub fn has_path(topology: &Topology, from: &str, to: &str) -> bool {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for conn in topology.get_all_connections() {
        for end in [conn.from.as_str(), conn.to.as_str()] {
            adjacency.entry(end).or_default().push(conn.other_end(end));
        }
    }

    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut queue = VecDeque::from([from]);
    visited.insert(from);
    while let Some(current) = queue.pop_front() {
        if current == to {
            return true;
        }
        for &next in adjacency.get(current).into_iter().flatten() {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}
