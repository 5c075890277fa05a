//! Simulation systems.
//!
//! This module groups the ECS systems that advance one simulation tick and
//! the per-frame render snapshot. [`crate::game::build_tick_schedule`] chains
//! them in order.
//!
//! Submodules overview
//! - [`input`] – turn [`crate::resources::input::InputState`] into player intent
//! - [`scheduler`] – advance the task scheduler by one tick
//! - [`effects`] – age and move effects, spawn the ones requested this tick
//! - [`actors`] – run every actor's update with its tick context
//! - [`combat`] – apply effect hits and monster contact damage
//! - [`removal`] – destroy and despawn entities marked for removal
//! - [`render`] – collect the render snapshot
//! - [`time`] – feed frame time into the tick clock

pub mod actors;
pub mod combat;
pub mod effects;
pub mod input;
pub mod removal;
pub mod render;
pub mod scheduler;
pub mod time;
