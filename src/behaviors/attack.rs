//! Cooldown-gated attack.
//!
//! Holding the attack input keeps `will_attack` set. The first ready tick
//! starts the `attack` action, latches `has_attacked` and schedules a
//! cooldown of `interval` ticks. While the latch is set the behavior only
//! asks the actor to stop; the actor's [`StopRule::AwaitAttackCycle`] keeps
//! the swing running until its animation completes a full cycle, and the
//! successful stop releases the latch so the next swing can start once the
//! cooldown is done.
//!
//! [`StopRule::AwaitAttackCycle`]: crate::components::actor::StopRule::AwaitAttackCycle

use log::debug;

use crate::behaviors::{Behavior, TickContext};
use crate::components::actor::ActorState;
use crate::components::arbiter::ATTACK;
use crate::components::effect::EffectTemplate;
use crate::resources::scheduler::TaskId;

/// What happens when an attack actually starts.
#[derive(Debug, Clone, Default)]
pub enum AttackHook {
    #[default]
    None,
    /// Queue an effect placed relative to the attacker.
    SpawnEffect(EffectTemplate),
}

#[derive(Debug, Clone)]
pub struct AttackState {
    /// Set by input (or AI) while the attack is requested.
    pub will_attack: bool,
    /// An attack started during the current press and has not been stopped.
    pub has_attacked: bool,
    /// Cooldown between attacks, in ticks.
    pub interval: u32,
    /// Cooldown task of the previous attack; `None` before the first one.
    pub cooldown: Option<TaskId>,
    pub hook: AttackHook,
}

impl AttackState {
    pub fn new(interval: u32, hook: AttackHook) -> Self {
        Self {
            will_attack: false,
            has_attacked: false,
            interval,
            cooldown: None,
            hook,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackBehavior;

impl Behavior for AttackBehavior {
    fn label(&self) -> &str {
        ATTACK
    }

    fn actions(&self) -> &'static [&'static str] {
        &[ATTACK]
    }

    fn is_ready(&self, actor: &ActorState) -> bool {
        actor.attack.as_ref().is_some_and(|attack| attack.will_attack)
    }

    fn perform(&mut self, actor: &mut ActorState, ctx: &mut TickContext<'_>) {
        let Some(cooldown) = actor.attack.as_ref().map(|attack| attack.cooldown) else {
            return;
        };

        if actor.has_attacked() {
            actor.request_stop();
            return;
        }

        if !ctx.scheduler.is_task_done(cooldown) {
            return;
        }

        if !actor.set_action(ATTACK) {
            return;
        }
        let (position, facing) = (actor.position, actor.facing);

        let Some(attack) = actor.attack.as_mut() else {
            return;
        };
        attack.has_attacked = true;
        let task = ctx.scheduler.set_timeout(attack.interval);
        attack.cooldown = Some(task);
        debug!(
            "attack started at {:?}, cooldown {} for {} ticks",
            position, task, attack.interval
        );

        if let AttackHook::SpawnEffect(template) = &attack.hook {
            ctx.spawns.push(template.spawn_at(position, facing, ctx.entity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::actor::{Actor, Facing};
    use crate::components::animation::{Frame, FrameAnimator};
    use crate::components::arbiter::{ActionArbiter, IDLE, MOVE};
    use crate::components::effect::Faction;
    use crate::resources::arena::NoBoundary;
    use crate::resources::scheduler::TaskScheduler;
    use glam::Vec2;
    use rustc_hash::FxHashMap;

    fn attacker(hook: AttackHook) -> Actor {
        let mut animations = FxHashMap::default();
        animations.insert(
            IDLE.to_string(),
            FrameAnimator::new(vec![Frame::blank(8.0, 8.0).with_duration(9)]).expect("frames"),
        );
        animations.insert(
            MOVE.to_string(),
            FrameAnimator::new(vec![Frame::blank(8.0, 8.0).with_duration(9)]).expect("frames"),
        );
        animations.insert(
            ATTACK.to_string(),
            FrameAnimator::new(vec![Frame::blank(8.0, 8.0).with_duration(1); 2]).expect("frames"),
        );
        let arbiter = ActionArbiter::new(animations, IDLE).expect("arbiter");
        Actor::mover(arbiter, Vec2::new(40.0, 40.0), 1.0)
            .and_then(|actor| actor.with_attack(10, hook))
            .expect("attacker")
    }

    #[test]
    fn first_attack_latches_and_schedules_cooldown() {
        let mut scheduler = TaskScheduler::new();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut spawns = Vec::new();
        let mut actor = attacker(AttackHook::None);
        actor.state_mut().attack.as_mut().expect("attack").will_attack = true;

        scheduler.tick();
        actor.update(&mut TickContext::new(
            &mut scheduler,
            &NoBoundary,
            &mut rng,
            &mut spawns,
        ));

        let state = actor.state();
        assert_eq!(state.action(), ATTACK);
        assert!(state.has_attacked());
        let cooldown = state.attack.as_ref().and_then(|a| a.cooldown).expect("cooldown");
        assert_eq!(scheduler.remaining(cooldown), Some(10));
        assert!(spawns.is_empty());
    }

    #[test]
    fn denied_transition_starts_no_cooldown() {
        let mut scheduler = TaskScheduler::new();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut spawns = Vec::new();
        let mut animations = FxHashMap::default();
        for action in [IDLE, MOVE, ATTACK] {
            animations.insert(
                action.to_string(),
                FrameAnimator::new(vec![Frame::blank(8.0, 8.0).with_duration(9)]).expect("frames"),
            );
        }
        // attack registered without priority, actor busy moving mid-frame
        let arbiter = ActionArbiter::new(animations, MOVE).expect("arbiter");
        let mut actor = Actor::new(arbiter, Vec2::ZERO)
            .with_behavior(AttackBehavior)
            .expect("attacker");
        let mut attack = AttackState::new(10, AttackHook::None);
        attack.will_attack = true;
        actor.state_mut().attack = Some(attack);

        scheduler.tick();
        actor.update(&mut TickContext::new(
            &mut scheduler,
            &NoBoundary,
            &mut rng,
            &mut spawns,
        ));

        let state = actor.state();
        assert_eq!(state.action(), MOVE);
        assert!(!state.has_attacked());
        assert_eq!(state.attack.as_ref().and_then(|a| a.cooldown), None);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn held_attack_requests_stop_instead_of_repeating() {
        let mut scheduler = TaskScheduler::new();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut spawns = Vec::new();
        let mut actor = attacker(AttackHook::None);
        actor.state_mut().attack.as_mut().expect("attack").will_attack = true;

        for _ in 0..2 {
            scheduler.tick();
            actor.update(&mut TickContext::new(
                &mut scheduler,
                &NoBoundary,
                &mut rng,
                &mut spawns,
            ));
        }
        assert!(actor.state().arbiter.will_stop);
        assert_eq!(actor.state().action(), ATTACK);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn spawn_hook_queues_effect_in_front_of_attacker() {
        let mut scheduler = TaskScheduler::new();
        let mut rng = fastrand::Rng::with_seed(0);
        let mut spawns = Vec::new();
        let template = EffectTemplate::new(
            FrameAnimator::new(vec![Frame::blank(4.0, 4.0)]).expect("frames"),
            Faction::Player,
            1,
        )
        .with_offsets(Vec2::new(12.0, 0.0), Vec2::new(-4.0, 0.0));
        let mut actor = attacker(AttackHook::SpawnEffect(template));
        actor.state_mut().facing = Facing::Left;
        actor.state_mut().attack.as_mut().expect("attack").will_attack = true;

        scheduler.tick();
        actor.update(&mut TickContext::new(
            &mut scheduler,
            &NoBoundary,
            &mut rng,
            &mut spawns,
        ));

        assert_eq!(spawns.len(), 1);
        assert_eq!(spawns[0].position, Vec2::new(36.0, 40.0));
        assert_eq!(spawns[0].facing, Facing::Left);
    }
}
