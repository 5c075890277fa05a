//! actorcore library.
//!
//! A tick-driven actor core: frame animation, action arbitration with
//! priority rules, pluggable behaviors and a cooperative task scheduler,
//! run on bevy_ecs. This module exposes the components, resources, systems
//! and behaviors for use in integration tests and as a reusable library.

pub mod behaviors;
pub mod components;
pub mod error;
pub mod game;
pub mod resources;
pub mod systems;
