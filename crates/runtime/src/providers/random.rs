//! Placeholder strategy: shoot in a uniformly random direction every turn.

use async_trait::async_trait;
use game_core::action::DEGREES;
use game_core::{Action, WorldState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::api::{ActionProvider, Result};

/// Fires at a random whole-degree angle each turn, ignoring the world.
#[derive(Debug, Clone)]
pub struct RandomShooter {
    rng: StdRng,
}

impl RandomShooter {
    /// Seeds from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence, for reproducible runs and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShooter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionProvider for RandomShooter {
    async fn provide_action(&mut self, _state: &WorldState) -> Result<Action> {
        let angle = self.rng.gen_range(0..DEGREES);
        trace!(angle, "random shot");
        Ok(Action::shoot(angle))
    }
}
