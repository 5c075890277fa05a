use bevy_ecs::prelude::Component;

/// Hit points of an actor. Fractional damage is allowed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub total: f32,
    pub current: f32,
}

impl Health {
    pub fn new(total: f32) -> Self {
        Self {
            total,
            current: total,
        }
    }

    /// Subtract `amount`; returns true when this blow was fatal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = !self.is_dead();
        self.current -= amount;
        was_alive && self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining share of `total`, clamped to `0..=1`.
    pub fn fraction(&self) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.current / self.total).clamp(0.0, 1.0)
    }
}
