//! Per-tick passes over the world.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They own no state beyond the schedules handed to them.

pub mod cleanup;
pub mod host_spawner;
pub mod raid_spawner;
pub mod snapshot;
