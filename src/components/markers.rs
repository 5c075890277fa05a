//! Tag components.
//!
//! - [`Player`] – the actor driven by [`InputState`](crate::resources::input::InputState)
//! - [`Monster`] – chasing actors that hurt the player on contact
//! - [`PendingRemoval`] – queued for the end-of-tick sweep

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

#[derive(Component, Clone, Copy, Debug)]
pub struct Monster {
    /// Damage dealt each tick the monster overlaps the player.
    pub contact_damage: f32,
}

/// Entity is finished and will be despawned by
/// [`sweep_pending_removal`](crate::systems::removal::sweep_pending_removal).
///
/// Systems skip entities carrying this marker, so nothing is removed while
/// another system is iterating.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PendingRemoval;
