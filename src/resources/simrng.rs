use bevy_ecs::prelude::Resource;

/// Seeded random source shared by spawning and monster AI.
///
/// A fixed seed replays the same run tick for tick.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub fastrand::Rng);

impl SimRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}
