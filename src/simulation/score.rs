use crate::error::CoreError;
use crate::model::{Golfer, Metric, ModelScore, WeightSet};
use crate::simulation::settings::MissingMetricPolicy;

fn sum2(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? + b?)
}

/// The raw value of `metric` for `golfer`, or `None` if the provider had no data.
#[must_use]
pub fn metric_value(golfer: &Golfer, metric: Metric) -> Option<f64> {
    let sg = &golfer.strokes_gained;
    let prox = &golfer.proximity;
    let scoring = &golfer.scoring;
    match metric {
        Metric::Total => sg.total,
        Metric::OTT => sg.tee,
        Metric::APP => sg.approach,
        Metric::ARG => sg.around,
        Metric::P => sg.putting,
        Metric::T2G => Some(sg.total? - sg.putting?),
        Metric::BS => sum2(sg.tee, sg.approach),
        Metric::DrivingDist => golfer.driving.distance,
        Metric::DrivingAcc => golfer.driving.accuracy,
        Metric::Gir => golfer.driving.gir,
        Metric::Prox100_125 => prox.yards_100_125,
        Metric::Prox125_150 => prox.yards_125_150,
        Metric::Prox150_175 => prox.yards_150_175,
        Metric::Prox175_200 => prox.yards_175_200,
        Metric::Prox200_225 => prox.yards_200_225,
        Metric::Prox225Plus => prox.yards_225_plus,
        Metric::BogeyAvoid => scoring.bogey_avoidance,
        Metric::TotalBirdies => scoring.total_birdies,
        Metric::Par3BirdieOrBetter => scoring.par3_birdie_or_better,
        Metric::Par4BirdieOrBetter => scoring.par4_birdie_or_better,
        Metric::Par5BirdieOrBetter => scoring.par5_birdie_or_better,
        Metric::BirdieConversion => scoring.birdie_or_better_conversion,
        Metric::Par3Scoring => scoring.par3_scoring_avg,
        Metric::Par4Scoring => scoring.par4_scoring_avg,
        Metric::Par5Scoring => scoring.par5_scoring_avg,
        Metric::EaglesPerHole => scoring.eagles_per_hole,
        Metric::BirdieAvg => scoring.birdie_average,
        Metric::BirdieOrBetterPct => scoring.birdie_or_better_percentage,
    }
}

/// Weighted linear combination of the golfer's metrics, weights taken as percentages.
///
/// # Errors
///
/// Will return `Err` if a weighted metric is missing and `policy` is `Reject`
pub fn base_score(
    golfer: &Golfer,
    weights: &WeightSet,
    policy: MissingMetricPolicy,
) -> Result<f64, CoreError> {
    let mut score = 0.0;
    for w in weights.weights() {
        let value = match (metric_value(golfer, w.metric), policy) {
            (Some(v), _) => v,
            (None, MissingMetricPolicy::Substitute(default)) => default,
            (None, MissingMetricPolicy::Reject) => {
                return Err(CoreError::IncompleteData {
                    player: golfer.name.clone(),
                    metric: w.metric,
                });
            }
        };
        score += value * (w.weight / 100.0);
    }
    Ok(score)
}

#[must_use]
pub fn simulated_score(base_score: f64, random_factor: f64, variance_scale: f64) -> f64 {
    base_score * (1.0 + random_factor * variance_scale)
}

/// Deterministic ranking by weighted score, highest first.
///
/// # Errors
///
/// Will return `Err` if a golfer is missing a weighted metric under `Reject`
pub fn rank_by_stats_model(
    golfers: &[Golfer],
    weights: &WeightSet,
    policy: MissingMetricPolicy,
) -> Result<Vec<ModelScore>, CoreError> {
    let mut scored = golfers
        .iter()
        .map(|g| {
            Ok(ModelScore {
                id: g.id.clone(),
                name: g.name.clone(),
                score: base_score(g, weights, policy)?,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricWeight;

    fn weights(pairs: &[(Metric, f64)]) -> WeightSet {
        WeightSet::new(
            pairs
                .iter()
                .map(|(metric, weight)| MetricWeight {
                    metric: *metric,
                    weight: *weight,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn derived_metrics() {
        let mut g = Golfer::new("1", "A");
        g.strokes_gained.total = Some(2.0);
        g.strokes_gained.putting = Some(0.5);
        g.strokes_gained.tee = Some(0.7);
        assert_eq!(metric_value(&g, Metric::T2G), Some(1.5));
        // approach missing
        assert_eq!(metric_value(&g, Metric::BS), None);
    }

    #[test]
    fn weights_are_percentages() {
        let mut g = Golfer::new("1", "A");
        g.strokes_gained.tee = Some(2.0);
        g.strokes_gained.putting = Some(4.0);
        let w = weights(&[(Metric::OTT, 50.0), (Metric::P, 25.0)]);
        let s = base_score(&g, &w, MissingMetricPolicy::default()).unwrap();
        assert!((s - 2.0).abs() < 1e-12);
    }

    #[test]
    fn missing_data_policies() {
        let g = Golfer::new("1", "Blank");
        let w = weights(&[(Metric::APP, 100.0)]);
        assert_eq!(
            base_score(&g, &w, MissingMetricPolicy::Substitute(3.0)).unwrap(),
            3.0
        );
        assert_eq!(
            base_score(&g, &w, MissingMetricPolicy::Reject),
            Err(CoreError::IncompleteData {
                player: "Blank".to_string(),
                metric: Metric::APP
            })
        );
    }

    #[test]
    fn zero_random_factor_is_base() {
        assert_eq!(simulated_score(12.5, 0.0, 0.9), 12.5);
        assert!((simulated_score(10.0, 0.5, 0.4) - 12.0).abs() < 1e-9);
    }
}
