//! Progression state: spendable money, CIDR tier, lifetime bandwidth and
//! the permanent prestige multipliers.
//!
//! One instance lives for the whole run, owned by `SimulationEngine` and
//! passed by reference to every operation that reads or credits it.

use serde::{Deserialize, Serialize};

use subnet_core::cidr::CidrTier;
use subnet_core::constants::*;

/// Permanent multipliers. Each starts at 1.0 and never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PermanentMultipliers {
    pub bandwidth: f64,
    pub income: f64,
    pub vision: f64,
}

/// Prestige history.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PrestigeRecord {
    pub total_prestiges: u32,
    pub multipliers: PermanentMultipliers,
}

/// Global economy state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Progression {
    money: f64,
    current_tier: CidrTier,
    total_accumulated: f64,
    prestige: PrestigeRecord,
}

impl Default for PermanentMultipliers {
    fn default() -> Self {
        Self {
            bandwidth: 1.0,
            income: 1.0,
            vision: 1.0,
        }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh game starting at `tier` with `money` in the bank.
    pub fn with_start(tier: CidrTier, money: f64) -> Self {
        Self {
            money,
            current_tier: tier,
            ..Self::default()
        }
    }

    pub fn money(&self) -> f64 {
        self.money
    }

    /// Credit `amount * income_multiplier`. The multiplier applies to every
    /// credit, including host payouts that already include it.
    pub fn add_money(&mut self, amount: f64) {
        self.money += amount * self.prestige.multipliers.income;
    }

    /// Debit only if the balance covers `amount`.
    pub fn spend_money(&mut self, amount: f64) -> bool {
        if self.money >= amount {
            self.money -= amount;
            true
        } else {
            false
        }
    }

    pub fn current_tier(&self) -> CidrTier {
        self.current_tier
    }

    pub fn set_tier(&mut self, tier: CidrTier) {
        self.current_tier = tier;
    }

    /// Lifetime bandwidth since the last prestige.
    pub fn total_accumulated(&self) -> f64 {
        self.total_accumulated
    }

    pub fn add_bandwidth(&mut self, amount: f64) {
        self.total_accumulated += amount;
    }

    pub fn remove_bandwidth(&mut self, amount: f64) {
        self.total_accumulated = (self.total_accumulated - amount).max(0.0);
    }

    /// `(200 + (32 - prefix) * 50) * vision_multiplier`.
    pub fn get_vision_radius(&self) -> f64 {
        let prefix = self.current_tier.prefix_len() as f64;
        (BASE_VISION_RADIUS + (32.0 - prefix) * VISION_PER_PREFIX_BIT)
            * self.prestige.multipliers.vision
    }

    pub fn prestige(&self) -> &PrestigeRecord {
        &self.prestige
    }

    pub fn income_multiplier(&self) -> f64 {
        self.prestige.multipliers.income
    }

    /// Multipliers a prestige performed right now would produce.
    pub fn preview_prestige(&self) -> PermanentMultipliers {
        let bandwidth_bonus = (self.total_accumulated / PRESTIGE_BANDWIDTH_DIVISOR).sqrt();
        let prestige_bonus = 1.0 + self.prestige.total_prestiges as f64 * PRESTIGE_COUNT_BONUS;
        let m = self.prestige.multipliers;
        PermanentMultipliers {
            bandwidth: m.bandwidth + bandwidth_bonus * PRESTIGE_BANDWIDTH_GAIN,
            income: m.income + bandwidth_bonus * PRESTIGE_BANDWIDTH_GAIN,
            vision: m.vision + prestige_bonus * PRESTIGE_VISION_GAIN,
        }
    }

    /// Bank the multiplier gains, then reset money, lifetime bandwidth and tier.
    pub fn perform_prestige(&mut self, new_tier: CidrTier) {
        self.prestige.multipliers = self.preview_prestige();
        self.prestige.total_prestiges += 1;

        self.money = 0.0;
        self.total_accumulated = 0.0;
        self.current_tier = new_tier;
    }

    /// Back to a brand new game, multipliers included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
