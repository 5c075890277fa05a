//! ECS components for entities.
//!
//! This module groups the component types attached to entities in the
//! simulation world, plus the plain value types they are built from.
//!
//! Submodules overview:
//! - [`actor`] – actor state, behavior registry and the per-tick update
//! - [`animation`] – frames and the tick-driven frame animator
//! - [`arbiter`] – current action selection with priority rules
//! - [`boundingbox`] – axis-aligned box used for hitboxes and hurt boxes
//! - [`effect`] – short-lived hurt boxes spawned by attacks
//! - [`health`] – hit points
//! - [`markers`] – tag components (player, monster, pending removal)

pub mod actor;
pub mod animation;
pub mod arbiter;
pub mod boundingbox;
pub mod effect;
pub mod health;
pub mod markers;
