//! Raid spawning system: launches automated attacks at a fixed interval.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use subnet_core::events::SimEvent;
use subnet_core::types::NodeId;

use crate::config::RaidConfig;
use crate::world::World;

/// When the next raid is due.
#[derive(Debug, Clone)]
pub struct RaidSchedule {
    pub config: RaidConfig,
    pub next_raid_ms: f64,
    /// Raids attempted so far, accepted or not.
    pub raids_attempted: u32,
}

impl RaidSchedule {
    /// First raid one interval after `now_ms`.
    pub fn new(config: RaidConfig, now_ms: f64) -> Self {
        Self {
            config,
            next_raid_ms: now_ms + config.interval_ms,
            raids_attempted: 0,
        }
    }

    pub fn restart(&mut self, now_ms: f64) {
        self.next_raid_ms = now_ms + self.config.interval_ms;
    }
}

/// Launch a raid if one is due. Source and target are drawn from the attack
/// engine's tracked nodes; a refused pick is skipped until the next interval.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    schedule: &mut RaidSchedule,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    if now_ms < schedule.next_raid_ms {
        return;
    }
    schedule.next_raid_ms = now_ms + schedule.config.interval_ms;
    schedule.raids_attempted += 1;

    let candidates: Vec<NodeId> = world.attacks.tracked_nodes().cloned().collect();
    if candidates.len() < 2 {
        return;
    }
    let from = rng.gen_range(0..candidates.len());
    // Offset into the remaining candidates so the target always differs.
    let target = (from + rng.gen_range(1..candidates.len())) % candidates.len();
    let (from, target) = (&candidates[from], &candidates[target]);

    let started = world.attacks.start_attack(
        from,
        target,
        schedule.config.damage,
        schedule.config.duration_ms,
        &world.registry,
        &world.topology,
    );
    match started {
        Some(attack_id) => {
            debug!(attack = %attack_id, %from, %target, "raid launched");
            events.push(SimEvent::AttackStarted {
                attack_id,
                from: from.clone(),
                target: target.clone(),
            });
        }
        None => debug!(%from, %target, "raid refused"),
    }
}
