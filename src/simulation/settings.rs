use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIMULATION_ROUNDS: u32 = 200;
pub const DEFAULT_ROUND_RANGE: usize = 12;
/// Upper bound on trials per player in a single run.
pub const MAX_SIMULATION_ROUNDS: u32 = 100_000;
/// Random factors are drawn uniformly from `[-spread, spread)`.
pub const DEFAULT_RANDOM_SPREAD: f64 = 0.5;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "scale")]
pub enum VarianceModel {
    /// Scale derived from each player's implied win probability.
    #[default]
    OddsScaled,
    /// Same scale for every player; `Fixed(0.0)` makes trials deterministic.
    Fixed(f64),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum MissingMetricPolicy {
    Substitute(f64),
    Reject,
}

impl Default for MissingMetricPolicy {
    fn default() -> Self {
        Self::Substitute(0.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub rounds: u32,
    /// Number of most recent rounds averaged when building profiles from history.
    /// Profiles supplied by the caller are used as given.
    pub round_range: usize,
    pub random_spread: f64,
    pub variance: VarianceModel,
    pub missing: MissingMetricPolicy,
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_SIMULATION_ROUNDS,
            round_range: DEFAULT_ROUND_RANGE,
            random_spread: DEFAULT_RANDOM_SPREAD,
            variance: VarianceModel::OddsScaled,
            missing: MissingMetricPolicy::default(),
            seed: None,
        }
    }
}

impl SimulationSettings {
    /// # Errors
    ///
    /// Will return `Err` if the round count or round range is out of range, or the
    /// spread or fixed scale is unusable
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.rounds == 0 || self.rounds > MAX_SIMULATION_ROUNDS {
            return Err(CoreError::InvalidSettings(format!(
                "simulation rounds must be between 1 and {MAX_SIMULATION_ROUNDS}, got {}",
                self.rounds
            )));
        }
        if self.round_range == 0 {
            return Err(CoreError::InvalidSettings(
                "round range must be at least 1".to_string(),
            ));
        }
        if !self.random_spread.is_finite() || self.random_spread < 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "random spread must be finite and non-negative, got {}",
                self.random_spread
            )));
        }
        if let VarianceModel::Fixed(scale) = self.variance {
            if !scale.is_finite() || scale < 0.0 {
                return Err(CoreError::InvalidSettings(format!(
                    "fixed variance scale must be finite and non-negative, got {scale}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        format!(
            "r{}:rr{}:s{}:v{:?}:m{:?}:seed{:?}",
            self.rounds,
            self.round_range,
            self.random_spread,
            self.variance,
            self.missing,
            self.seed
        )
    }
}
