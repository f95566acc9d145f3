mod common;

use common::{tee_golfer, tee_only_weights};
use rand::SeedableRng;
use rand::rngs::StdRng;
use teeline::CoreError;
use teeline::model::{Golfer, Metric, MetricWeight, WeightSet};
use teeline::simulation::{
    MAX_SIMULATION_ROUNDS, MissingMetricPolicy, SimulationSettings, VarianceModel,
    rank_by_stats_model, rng_for, simulate_field, simulate_multiple_rounds,
};

fn deterministic(rounds: u32) -> SimulationSettings {
    SimulationSettings {
        rounds,
        variance: VarianceModel::Fixed(0.0),
        ..SimulationSettings::default()
    }
}

fn three_player_field() -> Vec<Golfer> {
    vec![
        tee_golfer("p10", 10.0),
        tee_golfer("p20", 20.0),
        tee_golfer("p30", 30.0),
    ]
}

#[test]
fn test1_lowest_base_score_wins_without_variance() {
    let field = three_player_field();
    let mut rng = StdRng::seed_from_u64(1);
    let stats = simulate_multiple_rounds(
        &field[0],
        &field[1..],
        &tee_only_weights(),
        &deterministic(5),
        &mut rng,
    )
    .unwrap();

    assert_eq!(stats.trials, 5);
    assert_eq!(stats.wins, 5);
    assert_eq!(stats.average_finish, 1.0);
    assert_eq!(stats.win_percentage, 100.0);
    assert_eq!(stats.average_score, 10.0);
}

#[test]
fn test1_worst_player_finishes_last_without_variance() {
    let field = three_player_field();
    let mut rng = StdRng::seed_from_u64(1);
    let stats = simulate_multiple_rounds(
        &field[2],
        &field[..2],
        &tee_only_weights(),
        &deterministic(5),
        &mut rng,
    )
    .unwrap();

    assert_eq!(stats.average_finish, 3.0);
    assert_eq!(stats.wins, 0);
    // field of 3: both cutoffs are ceil(0.3) = ceil(0.75) = 1
    assert_eq!(stats.top25_finishes, 0);
}

#[test]
fn test1_target_listed_among_competitors_is_counted_once() {
    let field = three_player_field();
    let mut rng = StdRng::seed_from_u64(1);
    let stats = simulate_multiple_rounds(
        &field[1],
        &field[..2],
        &tee_only_weights(),
        &deterministic(10),
        &mut rng,
    )
    .unwrap();

    assert_eq!(stats.average_finish, 2.0);
}

#[test]
fn test1_degenerate_best_player_always_wins() {
    let mut field: Vec<Golfer> = (0..30)
        .map(|i| tee_golfer(&format!("g{i}"), 5.0 + f64::from(i)))
        .collect();
    field[0] = field[0].clone().with_american_odds(-10_000.0);
    let mut rng = StdRng::seed_from_u64(99);
    let stats = simulate_multiple_rounds(
        &field[0],
        &field[1..],
        &tee_only_weights(),
        &deterministic(10_000),
        &mut rng,
    )
    .unwrap();

    assert_eq!(stats.wins, 10_000);
    assert_eq!(stats.win_percentage, 100.0);
}

#[test]
fn test1_field_orders_negligible_players_by_market() {
    let golfers = vec![
        tee_golfer("p20", 20.0).with_american_odds(5000.0),
        tee_golfer("p30", 30.0).with_american_odds(200.0),
        tee_golfer("p10", 10.0),
    ];
    let mut rng = StdRng::seed_from_u64(3);
    let results =
        simulate_field(&golfers, &tee_only_weights(), &deterministic(20), &mut rng).unwrap();

    let order: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["p10", "p30", "p20"]);
    assert_eq!(results[0].stats.win_percentage, 100.0);
    assert!((results[1].implied_probability - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(results[2].implied_probability, 100.0 / 5100.0);
}

#[test]
fn test1_random_trials_respect_count_invariants() {
    let golfers: Vec<Golfer> = (0..12)
        .map(|i| {
            tee_golfer(&format!("g{i}"), 1.0 + f64::from(i) * 0.25)
                .with_american_odds(400.0 + f64::from(i) * 300.0)
        })
        .collect();
    let settings = SimulationSettings {
        rounds: 300,
        seed: Some(11),
        ..SimulationSettings::default()
    };
    let mut rng = rng_for(&settings);
    let results = simulate_field(&golfers, &tee_only_weights(), &settings, &mut rng).unwrap();

    assert_eq!(results.len(), golfers.len());
    for r in &results {
        assert_eq!(r.stats.trials, 300);
        assert!(r.stats.average_finish >= 1.0 && r.stats.average_finish <= golfers.len() as f64);
        assert!(r.stats.wins <= r.stats.trials);
        assert!(r.stats.top10_finishes <= r.stats.top25_finishes);
        assert!(r.stats.top10_percentage <= r.stats.top25_percentage);
    }
}

#[test]
fn test1_seeded_runs_are_reproducible() {
    let golfers = three_player_field();
    let settings = SimulationSettings {
        rounds: 50,
        seed: Some(42),
        ..SimulationSettings::default()
    };
    let first = simulate_field(&golfers, &tee_only_weights(), &settings, &mut rng_for(&settings))
        .unwrap();
    let second = simulate_field(&golfers, &tee_only_weights(), &settings, &mut rng_for(&settings))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test1_invalid_settings_are_rejected() {
    let golfers = three_player_field();
    let mut rng = StdRng::seed_from_u64(0);
    let err =
        simulate_field(&golfers, &tee_only_weights(), &deterministic(0), &mut rng).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettings(_)));

    let settings = SimulationSettings {
        random_spread: f64::NAN,
        ..SimulationSettings::default()
    };
    let err = simulate_field(&golfers, &tee_only_weights(), &settings, &mut rng).unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettings(_)));

    let err = simulate_field(
        &golfers,
        &tee_only_weights(),
        &deterministic(MAX_SIMULATION_ROUNDS + 1),
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettings(_)));
}

#[test]
fn test1_missing_metrics_follow_policy() {
    let golfers = vec![tee_golfer("a", 2.0), Golfer::new("b", "No Data")];
    let weights = WeightSet::new(vec![
        MetricWeight {
            metric: Metric::OTT,
            weight: 50.0,
        },
        MetricWeight {
            metric: Metric::P,
            weight: 50.0,
        },
    ])
    .unwrap();

    let ranking =
        rank_by_stats_model(&golfers, &weights, MissingMetricPolicy::Substitute(0.0)).unwrap();
    assert_eq!(ranking[0].id, "a");
    assert_eq!(ranking[0].score, 1.0);
    assert_eq!(ranking[1].score, 0.0);

    let err = rank_by_stats_model(&golfers, &weights, MissingMetricPolicy::Reject).unwrap_err();
    assert_eq!(
        err,
        CoreError::IncompleteData {
            player: "Player a".to_string(),
            metric: Metric::P,
        }
    );
}
