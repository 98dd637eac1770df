//! Random number source for the simulation
//!
//! Every random decision (spawn chances, move plans, placement jitter, spin)
//! goes through `RandomSource::rand_int` so a run is reproducible from its
//! seed and tests can script exact outcomes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Inclusive uniform integer draws
pub trait RandomSource {
    /// Uniform integer in `low..=high`. Returns `low` when the range is empty.
    fn rand_int(&mut self, low: i32, high: i32) -> i32;

    /// True with probability 1 / max(a, b)
    ///
    /// Spawn rates shrink `a` as the level rises while `b` acts as a floor.
    fn chance_of(&mut self, a: i32, b: i32) -> bool {
        let odds = a.max(b).max(1);
        self.rand_int(0, odds - 1) == 0
    }
}

/// Seeded PCG generator
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SimRng {
    fn rand_int(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed list of draws, clamped into each requested range
///
/// Once the script runs out every draw returns the low end of its range.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: std::collections::VecDeque<i32>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(draws: &[i32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn rand_int(&mut self, low: i32, high: i32) -> i32 {
        match self.draws.pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => low,
        }
    }
}
