//! The node stores a simulation mutates every tick.

use crate::attack::{AttackEngine, CaptureHook};
use crate::fog::FogOfWar;
use crate::registry::NodeRegistry;
use crate::topology::Topology;

/// Registry plus the layers that track node ids alongside it.
/// Ids enter and leave all four together through `world_setup`.
#[derive(Default)]
pub struct World {
    pub registry: NodeRegistry,
    pub topology: Topology,
    pub attacks: AttackEngine,
    pub fog: FogOfWar,
}

impl World {
    pub fn new(max_connection_range: f64) -> Self {
        Self {
            registry: NodeRegistry::new(),
            topology: Topology::new(max_connection_range),
            attacks: AttackEngine::new(),
            fog: FogOfWar::new(),
        }
    }

    pub fn set_capture_hook(&mut self, hook: Box<dyn CaptureHook>) {
        self.attacks.set_capture_hook(hook);
    }

    /// Empty every store. The connection range and capture hook are kept.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.topology.clear();
        self.attacks.clear();
        self.fog.clear();
    }
}
