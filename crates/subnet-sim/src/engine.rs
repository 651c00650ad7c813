//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the world stores, progression and threat state,
//! processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless and deterministic: the same
//! config and the same `(time, delta)` and command sequence give the same
//! snapshots.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use subnet_core::cidr::CidrTier;
use subnet_core::commands::PlayerCommand;
use subnet_core::enums::NodeType;
use subnet_core::events::SimEvent;
use subnet_core::state::GameStateSnapshot;
use subnet_core::types::{NodeId, SimTime};

use crate::config::SimConfig;
use crate::error::CommandError;
use crate::progression::Progression;
use crate::systems;
use crate::systems::raid_spawner::RaidSchedule;
use crate::threat::ThreatAggregator;
use crate::world::World;
use crate::world_setup;

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: World,
    progression: Progression,
    threat: ThreatAggregator,
    config: SimConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    raid_schedule: Option<RaidSchedule>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<NodeId>,
    events: Vec<SimEvent>,
    firewall_engaged: bool,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(config.max_connection_range),
            progression: Progression::with_start(config.starting_tier, config.starting_money),
            threat: ThreatAggregator::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            raid_schedule: config.raid.map(|raid| RaidSchedule::new(raid, 0.0)),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            firewall_engaged: false,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation to `time` (ms) and return the resulting snapshot.
    pub fn tick(&mut self, time: f64, delta: f64) -> GameStateSnapshot {
        self.time.advance(time, delta);
        self.world.attacks.set_clock(time);

        self.process_commands();
        self.run_systems(time, delta);

        let events = std::mem::take(&mut self.events);
        self.snapshot_with(events)
    }

    /// Snapshot of the current state without advancing time.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.snapshot_with(Vec::new())
    }

    fn snapshot_with(&self, events: Vec<SimEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.progression, &self.threat, &self.time, events)
    }

    /// Apply a command immediately instead of at the next tick.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::PlaceNode { node_type, x, y } => {
                let placed = world_setup::place_node(&mut self.world, &self.progression, node_type, x, y)
                    .ok_or(CommandError::NotPlaceable(node_type))?;
                self.events.push(SimEvent::NodePlaced {
                    node_id: placed.node_id,
                    node_type,
                });
                for host in placed.hosts {
                    self.events.push(SimEvent::NodePlaced {
                        node_id: host,
                        node_type: NodeType::Host,
                    });
                }
            }
            PlayerCommand::RemoveNode { node_id } => {
                let node_type = self.node_type_of(&node_id)?;
                world_setup::remove_node(&mut self.world, &node_id);
                self.events.push(SimEvent::NodeRemoved { node_id, node_type });
            }
            PlayerCommand::UpgradeNode { node_id } => {
                self.node_type_of(&node_id)?;
                if !self.world.registry.upgrade(&node_id, &mut self.progression) {
                    let cost = self.world.registry.get_upgrade_cost(&node_id);
                    return Err(CommandError::InsufficientFunds { node_id, cost });
                }
                let level = self.world.registry.get_node(&node_id).map_or(0, |n| n.level);
                self.events.push(SimEvent::NodeUpgraded { node_id, level });
            }
            PlayerCommand::ConnectNodes { from, to } => {
                self.node_type_of(&from)?;
                self.node_type_of(&to)?;
                if !self
                    .world
                    .topology
                    .create_connection_from_data(&from, &to, &self.world.registry)
                {
                    return Err(CommandError::ConnectionRefused { from, to });
                }
                self.world.registry.add_connection(&from, &to);
            }
            PlayerCommand::DisconnectNodes { from, to } => {
                if !self
                    .world
                    .topology
                    .remove_connection(&from, &to, &mut self.world.registry)
                {
                    return Err(CommandError::NoConnection { from, to });
                }
            }
            PlayerCommand::UpgradeConnection { from, to } => {
                if !self.world.topology.upgrade_connection(&from, &to) {
                    return Err(CommandError::NoConnection { from, to });
                }
            }
            PlayerCommand::LaunchAttack {
                from,
                target,
                damage,
                duration_ms,
            } => {
                let valid = |v: f64| v.is_finite() && v >= 0.0;
                if !valid(damage) || !valid(duration_ms) {
                    return Err(CommandError::InvalidAttackParameters);
                }
                self.node_type_of(&from)?;
                self.node_type_of(&target)?;
                let attack_id = self
                    .world
                    .attacks
                    .start_attack(
                        &from,
                        &target,
                        damage,
                        duration_ms,
                        &self.world.registry,
                        &self.world.topology,
                    )
                    .ok_or_else(|| CommandError::AttackRefused {
                        from: from.clone(),
                        target: target.clone(),
                    })?;
                self.events.push(SimEvent::AttackStarted {
                    attack_id,
                    from,
                    target,
                });
            }
            PlayerCommand::CancelAttack { attack_id } => {
                if !self.world.attacks.cancel_attack(&attack_id) {
                    return Err(CommandError::UnknownAttack(attack_id));
                }
            }
            PlayerCommand::Prestige => {
                self.prestige()?;
            }
        }
        Ok(())
    }

    /// Move to the next CIDR tier: bank multipliers and restart the map.
    pub fn prestige(&mut self) -> Result<CidrTier, CommandError> {
        let next = self
            .progression
            .current_tier()
            .next()
            .ok_or(CommandError::MaxTier)?;

        self.progression.perform_prestige(next);
        self.world.clear();
        self.threat.reset();
        self.firewall_engaged = false;
        if let Some(schedule) = &mut self.raid_schedule {
            schedule.restart(self.time.now_ms);
        }

        let total_prestiges = self.progression.prestige().total_prestiges;
        info!(tier = %next, total_prestiges, "prestige complete");
        self.events.push(SimEvent::PrestigeComplete {
            tier: next,
            total_prestiges,
        });
        Ok(next)
    }

    // --- Accessors ---

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for drivers that place or link nodes directly.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut Progression {
        &mut self.progression
    }

    pub fn threat(&self) -> &ThreatAggregator {
        &self.threat
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn pending_commands(&self) -> usize {
        self.command_queue.len()
    }

    fn node_type_of(&self, id: &str) -> Result<NodeType, CommandError> {
        self.world
            .registry
            .get_node(id)
            .map(|n| n.node_type())
            .ok_or_else(|| CommandError::UnknownNode(id.to_string()))
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.apply_command(command) {
                debug!(%err, "command rejected");
                self.events.push(SimEvent::CommandRejected {
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, time: f64, delta: f64) {
        // 1. Host income and honeypot cooling
        self.world.registry.update(time, delta, &mut self.progression);
        // 2. Top routers up to capacity
        systems::host_spawner::run(&mut self.world, &self.progression, &mut self.events);
        // 3. Connection throughput
        self.world.topology.update(&self.world.registry, &self.progression);
        // 4. Automated raids
        if let Some(schedule) = &mut self.raid_schedule {
            systems::raid_spawner::run(&mut self.world, &mut self.rng, schedule, time, &mut self.events);
        }
        // 5. Attacks: partial damage and resolution
        for outcome in self.world.attacks.update(time, delta, &mut self.world.registry) {
            self.events.push(SimEvent::AttackResolved {
                attack_id: outcome.attack_id,
                victim: outcome.victim,
                damage: outcome.damage,
                resolution: outcome.resolution,
            });
        }
        // 6. Threat recompute, then decay
        self.threat
            .calculate_threat_from_data(&self.world.registry, &self.progression);
        self.threat.update(delta);
        let engaged = self.threat.should_trigger_ai_firewall();
        if engaged && !self.firewall_engaged {
            info!(threat = self.threat.threat_level(), "AI firewall threshold reached");
            self.events.push(SimEvent::FirewallAlert {
                threat_level: self.threat.threat_level(),
            });
        }
        self.firewall_engaged = engaged;
        // 7. Cleanup (dead nodes)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
    }
}
