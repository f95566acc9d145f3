use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FantasyPlayer {
    pub id: String,
    pub name: String,
    /// Whole dollars; only players with a positive salary are optimizable.
    pub salary: i64,
    pub projected_points: f64,
    #[serde(default)]
    pub ownership: Option<f64>,
}

impl FantasyPlayer {
    /// Projected points per salary dollar.
    #[must_use]
    pub fn value_density(&self) -> f64 {
        self.projected_points / self.salary as f64
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FantasyLineup {
    pub id: String,
    pub players: Vec<String>,
    pub total_salary: i64,
    pub projected_points: f64,
}

impl FantasyLineup {
    #[must_use]
    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum FeasibilityMode {
    /// Reserve the cheapest still-eligible players for the open spots.
    #[default]
    Strict,
    /// Reserve `open spots × cheapest salary in the pool`.
    GlobalMinimum,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FantasySettings {
    pub site: String,
    pub lineups: usize,
    /// Percentage, 0..=100.
    pub max_exposure: f64,
    pub budget: i64,
    #[serde(default)]
    pub feasibility: FeasibilityMode,
}

impl Default for FantasySettings {
    fn default() -> Self {
        Self {
            site: "draftkings".to_string(),
            lineups: 1,
            max_exposure: 100.0,
            budget: 50_000,
            feasibility: FeasibilityMode::Strict,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LineupBatch {
    pub lineups: Vec<FantasyLineup>,
    pub requested: usize,
    pub generated_cap: usize,
    /// Set when the batch stopped before reaching `generated_cap`.
    pub stop_reason: Option<String>,
}

impl LineupBatch {
    /// Share of lineups containing `player_id`, 0..=1.
    #[must_use]
    pub fn exposure(&self, player_id: &str) -> f64 {
        if self.lineups.is_empty() {
            return 0.0;
        }
        let count = self.lineups.iter().filter(|l| l.contains(player_id)).count();
        count as f64 / self.lineups.len() as f64
    }
}
