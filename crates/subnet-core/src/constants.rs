//! Simulation constants and tuning parameters.

// --- Nodes ---

/// Base max health per node type (level 0).
pub const HOST_BASE_MAX_HEALTH: f64 = 50.0;
pub const ROUTER_BASE_MAX_HEALTH: f64 = 100.0;
pub const HONEYPOT_BASE_MAX_HEALTH: f64 = 200.0;
pub const VPN_BASE_MAX_HEALTH: f64 = 75.0;
pub const TOR_BASE_MAX_HEALTH: f64 = 75.0;
pub const DDOS_PROTECT_BASE_MAX_HEALTH: f64 = 150.0;

/// Max health gained per level, as a fraction of base.
pub const MAX_HEALTH_PER_LEVEL: f64 = 0.1;

/// Level assigned to freshly created nodes.
pub const STARTING_LEVEL: u32 = 1;

// --- Hosts ---

/// Income per second of a level-1 host before multipliers.
pub const HOST_BASE_INCOME: f64 = 10.0;

/// Minimum interval between two income payouts (ms).
pub const HOST_INCOME_INTERVAL_MS: f64 = 1000.0;

/// Distance of auto-generated hosts from their router.
pub const HOST_RING_RADIUS: f64 = 40.0;

// --- Routers ---

/// Slot count stored on new routers. The effective count is tier-derived.
pub const ROUTER_DEFAULT_SLOTS: u32 = 4;

/// Slots granted at the reference tier (/24) before level bonus.
pub const ROUTER_BASE_SLOTS: f64 = 4.0;

/// Prefix length at which routers get exactly `ROUTER_BASE_SLOTS`.
pub const ROUTER_REFERENCE_PREFIX: f64 = 24.0;

/// Prefix bits per doubling of router capacity.
pub const ROUTER_PREFIX_BITS_PER_DOUBLING: f64 = 4.0;

// --- Honeypots ---

/// Aggro radius at level 0.
pub const HONEYPOT_BASE_AGGRO_RADIUS: f64 = 200.0;

/// Aggro radius gained per level, as a fraction of base.
pub const HONEYPOT_AGGRO_PER_LEVEL: f64 = 0.15;

/// Local honeypot threat lost per millisecond.
pub const HONEYPOT_THREAT_DECAY_PER_MS: f64 = 0.001;

/// Share of a redirected attack's damage added to the honeypot's threat.
pub const HONEYPOT_THREAT_SHARE: f64 = 0.1;

// --- Upgrade costs: base * growth^level ---

pub const HOST_UPGRADE_BASE: f64 = 50.0;
pub const HOST_UPGRADE_GROWTH: f64 = 1.5;
pub const ROUTER_UPGRADE_BASE: f64 = 100.0;
pub const ROUTER_UPGRADE_GROWTH: f64 = 2.0;
pub const HONEYPOT_UPGRADE_BASE: f64 = 300.0;
pub const HONEYPOT_UPGRADE_GROWTH: f64 = 2.0;

// --- Connections ---

/// Default maximum length of a new connection (world units).
pub const DEFAULT_MAX_CONNECTION_RANGE: f64 = 200.0;

/// Throughput capacity per connection level.
pub const THROUGHPUT_PER_LEVEL: f64 = 100.0;

// --- Attacks ---

/// TOR nodes hide every other node strictly closer than this.
pub const TOR_OBFUSCATION_RADIUS: f64 = 150.0;

/// DDoS protectors cover every node within this radius (inclusive).
pub const DDOS_PROTECT_RADIUS: f64 = 150.0;

/// Damage multiplier inside DDoS protection.
pub const DDOS_DAMAGE_FACTOR: f64 = 0.5;

// --- Threat ---

/// Upper bound of the global threat level.
pub const MAX_THREAT: f64 = 100.0;

/// Cap of the visible-area threat component.
pub const AREA_THREAT_CAP: f64 = 50.0;

/// Revealed area per point of area threat.
pub const AREA_THREAT_DIVISOR: f64 = 10_000.0;

/// Cap of the node-count threat component.
pub const COUNT_THREAT_CAP: f64 = 30.0;

/// Threat per registered node.
pub const COUNT_THREAT_PER_NODE: f64 = 2.0;

/// Global threat decay per second.
pub const THREAT_DECAY_PER_SEC: f64 = 0.1;

/// Fraction of `MAX_THREAT` at which the AI firewall should engage.
pub const AI_FIREWALL_THRESHOLD: f64 = 0.7;

// --- Vision ---

/// Vision radius at prefix length 32.
pub const BASE_VISION_RADIUS: f64 = 200.0;

/// Vision gained per prefix bit below 32.
pub const VISION_PER_PREFIX_BIT: f64 = 50.0;

/// Side length of the square world used for visibility estimates.
pub const WORLD_SIZE: f64 = 4000.0;

// --- Prestige ---

/// Lifetime bandwidth divisor inside the prestige square root.
pub const PRESTIGE_BANDWIDTH_DIVISOR: f64 = 1000.0;

/// Multiplier gain per unit of bandwidth bonus (income and bandwidth).
pub const PRESTIGE_BANDWIDTH_GAIN: f64 = 0.1;

/// Extra prestige bonus per completed prestige.
pub const PRESTIGE_COUNT_BONUS: f64 = 0.1;

/// Vision multiplier gain per unit of prestige bonus.
pub const PRESTIGE_VISION_GAIN: f64 = 0.05;

// --- Raids ---

/// Default interval between automated raids (ms).
pub const RAID_DEFAULT_INTERVAL_MS: f64 = 10_000.0;

/// Default raid damage.
pub const RAID_DEFAULT_DAMAGE: f64 = 20.0;

/// Default raid duration (ms).
pub const RAID_DEFAULT_DURATION_MS: f64 = 5000.0;
