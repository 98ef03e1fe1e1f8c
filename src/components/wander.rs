use bevy_ecs::prelude::Component;

/// Wanders between random sprite objects whenever idle.
#[derive(Debug, Clone, Component)]
pub struct Wander {
    pub speed: f32,
    pub rng: fastrand::Rng,
}

impl Wander {
    pub fn new(speed: f32, seed: u64) -> Self {
        Self {
            speed,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}
