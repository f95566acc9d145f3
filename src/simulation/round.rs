use crate::error::CoreError;
use crate::model::{Golfer, SimulationStats, WeightSet};
use crate::odds::{odds_variance_scale, resolve_implied_probability};
use crate::simulation::score::{base_score, simulated_score};
use crate::simulation::settings::{SimulationSettings, VarianceModel};
use rand::Rng;

pub const TOP10_FIELD_FRACTION: f64 = 0.1;
pub const TOP25_FIELD_FRACTION: f64 = 0.25;

#[derive(Debug, Clone)]
pub(crate) struct FieldEntry<'a> {
    pub golfer: &'a Golfer,
    pub base_score: f64,
    pub implied_probability: f64,
    pub variance_scale: f64,
}

/// A field with base scores and variance scales computed once per batch.
#[derive(Debug, Clone)]
pub(crate) struct PreparedField<'a> {
    pub entries: Vec<FieldEntry<'a>>,
}

impl<'a> PreparedField<'a> {
    pub fn prepare<I>(
        golfers: I,
        weights: &WeightSet,
        settings: &SimulationSettings,
    ) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = &'a Golfer>,
    {
        let entries = golfers
            .into_iter()
            .map(|golfer| {
                let implied_probability = resolve_implied_probability(golfer);
                let variance_scale = match settings.variance {
                    VarianceModel::OddsScaled => odds_variance_scale(implied_probability),
                    VarianceModel::Fixed(scale) => scale,
                };
                Ok(FieldEntry {
                    golfer,
                    base_score: base_score(golfer, weights, settings.missing)?,
                    implied_probability,
                    variance_scale,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        let field = Self { entries };
        let zero_scores = field.zero_score_count();
        if zero_scores > 1 {
            // randomization scales the base score, so these tie in every trial
            tracing::warn!(
                zero_scores,
                "several players have a zero base score; the first listed wins their ties"
            );
        }
        Ok(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Players whose base score is exactly zero, usually because they have no data.
    pub fn zero_score_count(&self) -> usize {
        self.entries.iter().filter(|e| e.base_score == 0.0).count()
    }
}

/// Finish-position cutoffs that scale with the field: `ceil(size × fraction)`.
#[must_use]
pub fn field_thresholds(field_size: usize) -> (usize, usize) {
    let size = field_size as f64;
    (
        (size * TOP10_FIELD_FRACTION).ceil() as usize,
        (size * TOP25_FIELD_FRACTION).ceil() as usize,
    )
}

fn random_factor<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    if spread == 0.0 {
        0.0
    } else {
        rng.gen_range(-spread..spread)
    }
}

/// Runs `rounds` trials of the whole field and records where `target` finishes.
pub(crate) fn run_trials<R: Rng + ?Sized>(
    field: &PreparedField<'_>,
    target: usize,
    rounds: u32,
    spread: f64,
    rng: &mut R,
) -> SimulationStats {
    let field_size = field.len();
    let (top10_threshold, top25_threshold) = field_thresholds(field_size);

    let mut total_position: u64 = 0;
    let mut total_score = 0.0;
    let mut wins = 0;
    let mut top10_finishes = 0;
    let mut top25_finishes = 0;

    let mut round_scores: Vec<(usize, f64)> = Vec::with_capacity(field_size);
    for _ in 0..rounds {
        round_scores.clear();
        for (idx, entry) in field.entries.iter().enumerate() {
            let r = random_factor(rng, spread);
            round_scores.push((idx, simulated_score(entry.base_score, r, entry.variance_scale)));
        }

        // lower is better; the sort is stable so ties keep field order
        round_scores.sort_by(|a, b| a.1.total_cmp(&b.1));

        let Some(slot) = round_scores.iter().position(|(idx, _)| *idx == target) else {
            continue;
        };
        let position = slot + 1;
        total_position += position as u64;
        total_score += round_scores[slot].1;

        if position == 1 {
            wins += 1;
        }
        if position <= top10_threshold {
            top10_finishes += 1;
        }
        if position <= top25_threshold {
            top25_finishes += 1;
        }
    }

    let n = f64::from(rounds);
    SimulationStats {
        trials: rounds,
        wins,
        top10_finishes,
        top25_finishes,
        average_finish: total_position as f64 / n,
        win_percentage: f64::from(wins) / n * 100.0,
        top10_percentage: f64::from(top10_finishes) / n * 100.0,
        top25_percentage: f64::from(top25_finishes) / n * 100.0,
        average_score: total_score / n,
    }
}

/// Estimates `target`'s finish distribution against `competitors`.
///
/// A competitor sharing the target's id is the target itself and is skipped,
/// so the field size is `competitors (minus target) + 1`.
///
/// # Errors
///
/// Will return `Err` if the settings are invalid or a base score cannot be computed
pub fn simulate_multiple_rounds<R: Rng + ?Sized>(
    target: &Golfer,
    competitors: &[Golfer],
    weights: &WeightSet,
    settings: &SimulationSettings,
    rng: &mut R,
) -> Result<SimulationStats, CoreError> {
    settings.validate()?;
    let field = PreparedField::prepare(
        std::iter::once(target).chain(competitors.iter().filter(|c| c.id != target.id)),
        weights,
        settings,
    )?;
    Ok(run_trials(&field, 0, settings.rounds, settings.random_spread, rng))
}
