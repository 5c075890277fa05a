//! Clock update.
//!
//! Feeds wall-clock time into the [`TickClock`](crate::resources::tickclock::TickClock)
//! resource and reports how many fixed ticks are due.
use std::time::Duration;

use bevy_ecs::prelude::*;

use crate::resources::tickclock::TickClock;

/// Accumulate `elapsed` and return the number of ticks to run this frame.
pub fn advance_clock(world: &mut World, elapsed: Duration) -> u32 {
    world.resource_mut::<TickClock>().accumulate(elapsed)
}
