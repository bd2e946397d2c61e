//! Tuning knobs of the factorization pipeline.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Settings for [factor_with_settings](crate::poly::factor::Factorize::factor_with_settings).
///
/// The defaults are used by [factor](crate::poly::factor::Factorize::factor).
/// All randomness of the pipeline is derived from `seed`, so that two runs with
/// the same settings produce the same factors in the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorizationSettings {
    /// Seed of the random number generator.
    pub seed: u64,
    /// The number of times Wang's algorithm is restarted with a wider
    /// evaluation range before giving up.
    pub max_wang_retries: usize,
    /// The number of times the evaluation range is widened while
    /// searching for valid evaluation points.
    pub max_evaluation_widenings: usize,
    /// The number of valid evaluation points that are collected
    /// before the best one is selected.
    pub evaluation_configurations: usize,
    /// The number of random points that are tested per evaluation range.
    pub tries_per_widening: usize,
    /// The initial bound `b` of the evaluation range `[-b, b]`.
    pub starting_modulus: i64,
}

impl Default for FactorizationSettings {
    fn default() -> Self {
        FactorizationSettings {
            seed: 0x5eed_f00d,
            max_wang_retries: 32,
            max_evaluation_widenings: 64,
            evaluation_configurations: 3,
            tries_per_widening: 5,
            starting_modulus: 3,
        }
    }
}

impl FactorizationSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_wang_retries(mut self, retries: usize) -> Self {
        self.max_wang_retries = retries;
        self
    }

    pub fn with_max_evaluation_widenings(mut self, widenings: usize) -> Self {
        self.max_evaluation_widenings = widenings;
        self
    }

    pub fn with_evaluation_configurations(mut self, configurations: usize) -> Self {
        self.evaluation_configurations = configurations.max(1);
        self
    }

    pub fn with_tries_per_widening(mut self, tries: usize) -> Self {
        self.tries_per_widening = tries.max(1);
        self
    }

    pub fn with_starting_modulus(mut self, modulus: i64) -> Self {
        self.starting_modulus = modulus.max(1);
        self
    }

    /// Create the random number generator that drives the pipeline.
    pub fn rng(&self) -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(self.seed)
    }
}
