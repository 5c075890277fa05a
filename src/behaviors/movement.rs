//! Default movement behavior.

use crate::behaviors::{Behavior, TickContext};
use crate::components::actor::{ActorState, Direction, Facing};
use crate::components::arbiter::MOVE;

/// Ready while any direction is held.
///
/// Each held direction displaces the actor by `speed`. Facing follows a
/// horizontal direction only when its opposite is not held too. A move that
/// ends inside a wall is undone completely.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveBehavior;

impl Behavior for MoveBehavior {
    fn label(&self) -> &str {
        MOVE
    }

    fn actions(&self) -> &'static [&'static str] {
        &[MOVE]
    }

    fn is_ready(&self, actor: &ActorState) -> bool {
        actor.directions.any()
    }

    fn perform(&mut self, actor: &mut ActorState, ctx: &mut TickContext<'_>) {
        if actor.action() != MOVE && !actor.set_action(MOVE) {
            return;
        }

        let origin = actor.position;
        let directions = actor.directions;
        for direction in directions.active() {
            actor.position += direction.unit() * actor.speed;
            match direction {
                Direction::Right if !directions.get(Direction::Left) => actor.facing = Facing::Right,
                Direction::Left if !directions.get(Direction::Right) => actor.facing = Facing::Left,
                _ => {}
            }
        }

        if ctx.boundary.collides_with_boundary(&actor.bounding_box()) {
            actor.position = origin;
        }
    }
}
