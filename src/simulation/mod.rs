pub mod field;
pub mod round;
pub mod score;
pub mod settings;

pub use field::{compare_simulated, simulate_field};
pub use round::{field_thresholds, simulate_multiple_rounds};
pub use score::{base_score, metric_value, rank_by_stats_model, simulated_score};
pub use settings::{
    DEFAULT_RANDOM_SPREAD, DEFAULT_ROUND_RANGE, DEFAULT_SIMULATION_ROUNDS, MAX_SIMULATION_ROUNDS,
    MissingMetricPolicy, SimulationSettings, VarianceModel,
};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded when the settings carry a seed, otherwise from OS entropy.
#[must_use]
pub fn rng_for(settings: &SimulationSettings) -> StdRng {
    match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
