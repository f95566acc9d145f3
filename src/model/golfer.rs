use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StrokesGained {
    pub total: Option<f64>,
    pub tee: Option<f64>,
    pub approach: Option<f64>,
    pub around: Option<f64>,
    pub putting: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DrivingStats {
    pub distance: Option<f64>,
    pub accuracy: Option<f64>,
    pub gir: Option<f64>,
}

/// Average proximity to the hole, in feet, by approach distance band (yards).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProximityStats {
    pub yards_100_125: Option<f64>,
    pub yards_125_150: Option<f64>,
    pub yards_150_175: Option<f64>,
    pub yards_175_200: Option<f64>,
    pub yards_200_225: Option<f64>,
    pub yards_225_plus: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ScoringStats {
    pub bogey_avoidance: Option<f64>,
    pub total_birdies: Option<f64>,
    pub par3_birdie_or_better: Option<f64>,
    pub par4_birdie_or_better: Option<f64>,
    pub par5_birdie_or_better: Option<f64>,
    pub birdie_or_better_conversion: Option<f64>,
    pub par3_scoring_avg: Option<f64>,
    pub par4_scoring_avg: Option<f64>,
    pub par5_scoring_avg: Option<f64>,
    pub eagles_per_hole: Option<f64>,
    pub birdie_average: Option<f64>,
    pub birdie_or_better_percentage: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Odds {
    /// American format, e.g. `+450` or `-150`.
    pub american: Option<f64>,
    /// 0..=1; takes precedence over `american` when positive.
    pub implied_probability: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundRecord {
    pub event_name: String,
    pub course_name: String,
    pub round: i32,
    pub date: NaiveDate,
    pub score: Option<i32>,
    pub sg_total: Option<f64>,
    pub sg_ott: Option<f64>,
    pub sg_app: Option<f64>,
    pub sg_arg: Option<f64>,
    pub sg_putt: Option<f64>,
    pub driving_acc: Option<f64>,
    pub driving_dist: Option<f64>,
    pub gir: Option<f64>,
}

/// A player profile as handed to the simulator.
///
/// Immutable for the duration of a simulation run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Golfer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rank: Option<i32>,
    #[serde(default)]
    pub strokes_gained: StrokesGained,
    #[serde(default)]
    pub driving: DrivingStats,
    #[serde(default)]
    pub proximity: ProximityStats,
    #[serde(default)]
    pub scoring: ScoringStats,
    #[serde(default)]
    pub odds: Option<Odds>,
    #[serde(default)]
    pub recent_rounds: Vec<RoundRecord>,
}

impl Golfer {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rank: None,
            strokes_gained: StrokesGained::default(),
            driving: DrivingStats::default(),
            proximity: ProximityStats::default(),
            scoring: ScoringStats::default(),
            odds: None,
            recent_rounds: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_american_odds(mut self, american: f64) -> Self {
        self.odds = Some(Odds {
            american: Some(american),
            implied_probability: None,
            last_updated: None,
        });
        self
    }
}

/// Aggregate outcome of repeated trials for one player.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SimulationStats {
    pub trials: u32,
    pub wins: u32,
    pub top10_finishes: u32,
    pub top25_finishes: u32,
    pub average_finish: f64,
    pub win_percentage: f64,
    pub top10_percentage: f64,
    pub top25_percentage: f64,
    pub average_score: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimulatedGolfer {
    pub id: String,
    pub name: String,
    pub base_score: f64,
    pub implied_probability: f64,
    pub stats: SimulationStats,
}

/// One row of the deterministic weighted-metric ranking.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelScore {
    pub id: String,
    pub name: String,
    pub score: f64,
}
