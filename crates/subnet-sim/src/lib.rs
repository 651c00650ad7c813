//! Simulation engine for SUBNET.
//!
//! Owns the node registry, topology, attack engine, threat and fog state,
//! advances them once per externally driven tick, and produces
//! GameStateSnapshots for the frontend.

pub mod attack;
pub mod config;
pub mod engine;
pub mod error;
pub mod fog;
pub mod progression;
pub mod registry;
pub mod scenario;
pub mod systems;
pub mod threat;
pub mod topology;
pub mod world;
pub mod world_setup;

pub use config::{ConfigError, RaidConfig, SimConfig};
pub use engine::SimulationEngine;
pub use error::CommandError;
pub use subnet_core as core;
