use crate::error::CoreError;
use crate::model::{Golfer, SimulatedGolfer, WeightSet};
use crate::simulation::round::{PreparedField, run_trials};
use crate::simulation::settings::SimulationSettings;
use rand::Rng;
use std::cmp::Ordering;

/// Below this simulated win percentage, ordering falls back to the betting market.
pub const NEGLIGIBLE_WIN_PERCENTAGE: f64 = 0.5;

/// Simulates every golfer once as the target against the rest of the field.
///
/// Base scores are computed once for the batch. The result is ordered by
/// [`compare_simulated`].
///
/// # Errors
///
/// Will return `Err` if the settings are invalid or a base score cannot be computed
pub fn simulate_field<R: Rng + ?Sized>(
    golfers: &[Golfer],
    weights: &WeightSet,
    settings: &SimulationSettings,
    rng: &mut R,
) -> Result<Vec<SimulatedGolfer>, CoreError> {
    settings.validate()?;
    let field = PreparedField::prepare(golfers, weights, settings)?;
    tracing::debug!(
        field_size = field.len(),
        rounds = settings.rounds,
        "simulating field"
    );

    let mut results: Vec<SimulatedGolfer> = field
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| SimulatedGolfer {
            id: entry.golfer.id.clone(),
            name: entry.golfer.name.clone(),
            base_score: entry.base_score,
            implied_probability: entry.implied_probability,
            stats: run_trials(&field, idx, settings.rounds, settings.random_spread, &mut *rng),
        })
        .collect();

    results.sort_by(compare_simulated);
    Ok(results)
}

/// Win percentage descending; among players with a negligible win percentage,
/// implied probability descending instead. Average finish breaks remaining ties.
#[must_use]
pub fn compare_simulated(a: &SimulatedGolfer, b: &SimulatedGolfer) -> Ordering {
    let a_negligible = a.stats.win_percentage < NEGLIGIBLE_WIN_PERCENTAGE;
    let b_negligible = b.stats.win_percentage < NEGLIGIBLE_WIN_PERCENTAGE;
    match (a_negligible, b_negligible) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => b.stats.win_percentage.total_cmp(&a.stats.win_percentage),
        (true, true) => b.implied_probability.total_cmp(&a.implied_probability),
    }
    .then_with(|| a.stats.average_finish.total_cmp(&b.stats.average_finish))
}
