#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use teeline::model::{FantasyPlayer, Golfer, Metric, MetricWeight, WeightSet};
use teeline::optimizer::Site;
use teeline::provider::types::{ApproachResponse, ProjectionsResponse, RankingsResponse};
use teeline::provider::{
    ApproachRecord, HistoricalData, OddsResponse, ProjectionRecord, RankedPlayer, StatsProvider,
};
use teeline::CoreError;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_history() -> HistoricalData {
    HistoricalData::load(
        Some(&fixture_path("rounds.json")),
        Some(&fixture_path("scoring_stats.csv")),
    )
    .expect("fixture history loads")
}

/// Serves the JSON fixtures and counts how often the rankings feed is hit.
#[derive(Default)]
pub struct FixtureProvider {
    pub ranking_calls: AtomicUsize,
    pub fail_odds: bool,
}

impl FixtureProvider {
    pub fn failing() -> Self {
        Self {
            fail_odds: true,
            ..Self::default()
        }
    }

    pub fn ranking_calls(&self) -> usize {
        self.ranking_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsProvider for FixtureProvider {
    async fn rankings(&self) -> Result<Vec<RankedPlayer>, CoreError> {
        self.ranking_calls.fetch_add(1, Ordering::SeqCst);
        let resp: RankingsResponse =
            serde_json::from_str(include_str!("../fixtures/rankings.json"))?;
        Ok(resp.rankings)
    }

    async fn outright_odds(&self) -> Result<OddsResponse, CoreError> {
        if self.fail_odds {
            return Err(CoreError::Network("odds feed unavailable".to_string()));
        }
        Ok(serde_json::from_str(include_str!("../fixtures/odds.json"))?)
    }

    async fn approach_stats(&self) -> Result<Vec<ApproachRecord>, CoreError> {
        let resp: ApproachResponse =
            serde_json::from_str(include_str!("../fixtures/approach.json"))?;
        Ok(resp.data)
    }

    async fn fantasy_projections(&self, _site: Site) -> Result<Vec<ProjectionRecord>, CoreError> {
        let resp: ProjectionsResponse =
            serde_json::from_str(include_str!("../fixtures/projections.json"))?;
        Ok(resp.projections)
    }
}

/// A golfer whose only metric is strokes gained off the tee.
pub fn tee_golfer(id: &str, tee: f64) -> Golfer {
    let mut golfer = Golfer::new(id, format!("Player {id}"));
    golfer.strokes_gained.tee = Some(tee);
    golfer
}

pub fn tee_only_weights() -> WeightSet {
    WeightSet::new(vec![MetricWeight {
        metric: Metric::OTT,
        weight: 100.0,
    }])
    .expect("valid weights")
}

pub fn fantasy_player(id: &str, salary: i64, projected_points: f64) -> FantasyPlayer {
    FantasyPlayer {
        id: id.to_string(),
        name: id.to_string(),
        salary,
        projected_points,
        ownership: None,
    }
}

/// Twelve players with distinct value densities, salaries 6000..=11500.
pub fn fantasy_pool() -> Vec<FantasyPlayer> {
    (0..12)
        .map(|i| {
            let salary = 6000 + i * 500;
            let points = salary as f64 / 1000.0 * (1.0 + i as f64 / 100.0);
            fantasy_player(&format!("p{i}"), salary, points)
        })
        .collect()
}
