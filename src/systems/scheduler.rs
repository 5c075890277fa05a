//! Scheduler step.
//!
//! Runs once per tick, ahead of every system that queries task readiness.
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::scheduler::TaskScheduler;

/// Advance every live task by one tick.
pub fn tick_scheduler(mut scheduler: ResMut<TaskScheduler>) {
    let finished = scheduler.tick();
    if !finished.is_empty() {
        trace!(
            "tick {}: {} task(s) finished, {} live",
            scheduler.ticks(),
            finished.len(),
            scheduler.len()
        );
    }
}
