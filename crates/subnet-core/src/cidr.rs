//! CIDR address-space tiers: the progression ladder of the game.
//!
//! A lower prefix length is a larger simulated address block and a higher
//! rank. Tiers run /30 (smallest) to /8 (largest).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Address-space tier. Ordered from smallest block to largest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CidrTier {
    #[serde(rename = "/30")]
    Cidr30,
    #[default]
    #[serde(rename = "/24")]
    Cidr24,
    #[serde(rename = "/20")]
    Cidr20,
    #[serde(rename = "/16")]
    Cidr16,
    #[serde(rename = "/12")]
    Cidr12,
    #[serde(rename = "/8")]
    Cidr8,
}

impl CidrTier {
    /// All tiers in progression order.
    pub const ALL: [CidrTier; 6] = [
        CidrTier::Cidr30,
        CidrTier::Cidr24,
        CidrTier::Cidr20,
        CidrTier::Cidr16,
        CidrTier::Cidr12,
        CidrTier::Cidr8,
    ];

    /// Prefix length in bits.
    pub fn prefix_len(self) -> u8 {
        match self {
            CidrTier::Cidr30 => 30,
            CidrTier::Cidr24 => 24,
            CidrTier::Cidr20 => 20,
            CidrTier::Cidr16 => 16,
            CidrTier::Cidr12 => 12,
            CidrTier::Cidr8 => 8,
        }
    }

    pub fn from_prefix(prefix: u8) -> Option<CidrTier> {
        Self::ALL.into_iter().find(|t| t.prefix_len() == prefix)
    }

    /// Number of addresses in the block.
    pub fn available_ips(self) -> u64 {
        1u64 << (32 - self.prefix_len() as u32)
    }

    /// Dotted-quad subnet mask, e.g. `255.255.255.0` for /24.
    pub fn subnet_mask(self) -> String {
        let mask: u32 = u32::MAX << (32 - self.prefix_len() as u32);
        let [a, b, c, d] = mask.to_be_bytes();
        format!("{a}.{b}.{c}.{d}")
    }

    /// The next larger tier, or `None` at the top of the ladder.
    pub fn next(self) -> Option<CidrTier> {
        let idx = Self::ALL.iter().position(|&t| t == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Display name, e.g. `/24`.
    pub fn name(self) -> String {
        format!("/{}", self.prefix_len())
    }
}

impl fmt::Display for CidrTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.prefix_len())
    }
}
