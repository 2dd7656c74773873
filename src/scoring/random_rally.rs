//! Random rally controller for simulations
//!
//! Each point goes to player one with a fixed probability. Seeded
//! controllers replay the exact same match.

use crate::core::Player;
use crate::scoring::rally::RallyController;
use crate::scoring::ScoreView;
use crate::{Result, TennisError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub struct RandomRallyController {
    p1_point_probability: f64,
    rng: ChaCha12Rng,
}

impl RandomRallyController {
    /// Even contest with an entropy-seeded RNG
    pub fn new() -> Self {
        RandomRallyController {
            p1_point_probability: 0.5,
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Even contest with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        RandomRallyController {
            p1_point_probability: 0.5,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Weight points towards one side; `p1_point_probability` must lie in [0, 1]
    pub fn with_probability(mut self, p1_point_probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p1_point_probability) {
            return Err(TennisError::InvalidConfiguration(format!(
                "point probability must be within [0, 1] (got {p1_point_probability})"
            )));
        }
        self.p1_point_probability = p1_point_probability;
        Ok(self)
    }

    pub fn p1_point_probability(&self) -> f64 {
        self.p1_point_probability
    }
}

impl Default for RandomRallyController {
    fn default() -> Self {
        Self::new()
    }
}

impl RallyController for RandomRallyController {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_point_winner(&mut self, _view: &ScoreView) -> Option<Player> {
        if self.rng.gen_bool(self.p1_point_probability) {
            Some(Player::One)
        } else {
            Some(Player::Two)
        }
    }
}
