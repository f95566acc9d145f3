pub mod datagolf;
pub mod history;
pub mod transform;
pub mod types;

pub use datagolf::{DATAGOLF_BASE_URL, DataGolfClient};
pub use history::{HistoricalData, HistoricalRound, ScoringStatRecord};
pub use transform::{
    FieldOptions, build_field, fantasy_pool, join_salaries, load_field, normalize_name,
};
pub use types::{ApproachRecord, OddsResponse, OutrightOdds, ProjectionRecord, RankedPlayer};

use crate::error::CoreError;
use crate::optimizer::Site;
use async_trait::async_trait;

/// Source of the live feeds the field and the fantasy pool are built from.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn rankings(&self) -> Result<Vec<RankedPlayer>, CoreError>;
    async fn outright_odds(&self) -> Result<OddsResponse, CoreError>;
    async fn approach_stats(&self) -> Result<Vec<ApproachRecord>, CoreError>;
    async fn fantasy_projections(&self, site: Site) -> Result<Vec<ProjectionRecord>, CoreError>;
}
