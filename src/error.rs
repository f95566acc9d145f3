use crate::model::Metric;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("unsupported site: {0}")]
    UnsupportedSite(String),
    #[error("not enough players available: need {needed}, have {available}")]
    InsufficientPlayers { needed: usize, available: usize },
    #[error("{locked} locked players exceed roster size {roster_size}")]
    TooManyLocked { locked: usize, roster_size: usize },
    #[error("locked players cost {locked_salary}, budget is {budget}")]
    LockedOverBudget { locked_salary: i64, budget: i64 },
    #[error("salary total exceeds the supported range")]
    SalaryOverflow,
    #[error("could not fill all lineup spots within salary constraints ({open_spots} open)")]
    LineupIncomplete { open_spots: usize },
    #[error("metric {0} appears more than once in the weight set")]
    DuplicateMetric(Metric),
    #[error("weight for {metric} must be finite and non-negative, got {weight}")]
    InvalidWeight { metric: Metric, weight: f64 },
    #[error("player {player} has no value for {metric}")]
    IncompleteData { player: String, metric: Metric },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Errors caused by caller input rather than the environment.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedSite(_)
                | Self::InsufficientPlayers { .. }
                | Self::TooManyLocked { .. }
                | Self::LockedOverBudget { .. }
                | Self::SalaryOverflow
                | Self::LineupIncomplete { .. }
                | Self::DuplicateMetric(_)
                | Self::InvalidWeight { .. }
                | Self::IncompleteData { .. }
                | Self::InvalidSettings(_)
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for CoreError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for CoreError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
