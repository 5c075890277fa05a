//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the task scheduler, the arena walls,
//! input state, timing, and asset stores. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – frame lists per animation set, shared across actors
//! - `arena` – arena walls and the collision query handed to behaviors
//! - `input` – per-tick directional and attack intent of the player
//! - `renderqueue` – per-frame snapshot of what to draw
//! - `scheduler` – tick-based timeouts and intervals
//! - `simconfig` – INI-backed simulation settings
//! - `simrng` – seeded random source
//! - `spawnqueue` – effect spawns requested by behaviors during a tick
//! - `tickclock` – fixed-step accumulator turning frame time into ticks
pub mod animationstore;
pub mod arena;
pub mod input;
pub mod renderqueue;
pub mod scheduler;
pub mod simconfig;
pub mod simrng;
pub mod spawnqueue;
pub mod tickclock;
