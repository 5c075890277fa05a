//! Monster pursuit.
//!
//! Always ready, but only re-decides when its previous decision timeout is
//! done. A decision points the direction flags at the target box and, on a
//! coin flip, adds one perpendicular direction so monsters do not line up
//! behind each other. Perpendicular picks that would run straight into a wall
//! within `wall_margin` pixels are discarded.

use log::trace;
use smallvec::SmallVec;

use crate::behaviors::{Behavior, TickContext};
use crate::components::actor::{ActorState, Direction};
use crate::components::boundingbox::BoundingBox;
use crate::resources::scheduler::{TaskId, TaskScheduler};

#[derive(Debug, Clone)]
pub struct ChaseBehavior {
    decision: Option<TaskId>,
    /// Exclusive upper bound of the random delay between decisions.
    pub decision_max: u32,
    pub wall_margin: f32,
}

impl ChaseBehavior {
    pub fn new(decision_max: u32, wall_margin: f32) -> Self {
        Self {
            decision: None,
            decision_max,
            wall_margin,
        }
    }

    pub fn decision(&self) -> Option<TaskId> {
        self.decision
    }

    fn aim(actor: &mut ActorState, own: &BoundingBox, target: &BoundingBox) {
        let (min, size) = (own.min(), own.max() - own.min());
        let (target_min, target_size) = (target.min(), target.max() - target.min());

        actor.directions.clear();
        if target_min.y + target_size.y < min.y {
            actor.directions.set(Direction::Up, true);
        }
        if target_min.x > min.x + size.x {
            actor.directions.set(Direction::Right, true);
        }
        if target_min.y > min.y + size.y {
            actor.directions.set(Direction::Down, true);
        }
        if target_min.x + target_size.x < min.x {
            actor.directions.set(Direction::Left, true);
        }
    }

    fn sidestep(&self, actor: &mut ActorState, own: &BoundingBox, ctx: &mut TickContext<'_>) {
        let directions = actor.directions;
        let pair = if !directions.get(Direction::Up) && !directions.get(Direction::Down) {
            [Direction::Up, Direction::Down]
        } else if !directions.get(Direction::Left) && !directions.get(Direction::Right) {
            [Direction::Left, Direction::Right]
        } else {
            return;
        };

        let candidates: SmallVec<[Direction; 2]> = pair
            .into_iter()
            .filter(|direction| {
                let ahead = own.translated(direction.unit() * self.wall_margin);
                !ctx.boundary.collides_with_boundary(&ahead)
            })
            .collect();

        if !candidates.is_empty() {
            let pick = candidates[ctx.rng.usize(0..candidates.len())];
            actor.directions.set(pick, true);
        }
    }
}

impl Behavior for ChaseBehavior {
    fn label(&self) -> &str {
        "chase"
    }

    fn is_ready(&self, _actor: &ActorState) -> bool {
        true
    }

    fn perform(&mut self, actor: &mut ActorState, ctx: &mut TickContext<'_>) {
        if !ctx.scheduler.is_task_done(self.decision) {
            return;
        }

        let delay = if self.decision_max == 0 {
            0
        } else {
            ctx.rng.u32(0..self.decision_max)
        };
        self.decision = Some(ctx.scheduler.set_timeout(delay));

        let Some(target) = ctx.target else {
            actor.directions.clear();
            return;
        };

        let own = actor.bounding_box();
        Self::aim(actor, &own, &target);
        if ctx.rng.bool() {
            self.sidestep(actor, &own, ctx);
        }
        trace!(
            "chase decision: {:?}, next in {} ticks",
            actor.directions.active().collect::<SmallVec<[Direction; 4]>>(),
            delay
        );
    }

    fn release(&mut self, scheduler: &mut TaskScheduler) {
        if let Some(task) = self.decision.take() {
            scheduler.cancel(task);
        }
    }
}
