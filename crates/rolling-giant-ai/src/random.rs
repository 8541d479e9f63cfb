//! Random sampling with a round-scoped deterministic source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform sampler in `[0, 1)`.
///
/// Uses the round's seeded generator while a round is active and silently
/// falls back to the thread-local generator otherwise.
#[derive(Debug, Clone, Default)]
pub struct SessionRng {
    round: Option<ChaCha8Rng>,
}

impl SessionRng {
    /// No round generator: every sample comes from the fallback.
    pub fn unseeded() -> Self {
        Self { round: None }
    }

    pub fn for_round(seed: u64) -> Self {
        Self {
            round: Some(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn begin_round(&mut self, seed: u64) {
        self.round = Some(ChaCha8Rng::seed_from_u64(seed));
    }

    pub fn has_round(&self) -> bool {
        self.round.is_some()
    }

    pub fn next_unit(&mut self) -> f32 {
        match self.round.as_mut() {
            Some(rng) => rng.gen::<f32>(),
            None => rand::random::<f32>(),
        }
    }

    /// Uniform value between `min` and `max`.
    pub fn between(&mut self, min: f32, max: f32) -> f32 {
        let t = self.next_unit();
        min + (max - min) * t
    }
}
