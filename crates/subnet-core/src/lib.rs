//! Core types and definitions for the SUBNET simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! node records, commands, state snapshots, events, constants, and the
//! pure geometry and CIDR helpers the simulation is built on.
//! It has no dependency on any rendering or runtime framework.

pub mod cidr;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod math;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
