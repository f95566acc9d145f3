use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RankingsResponse {
    #[serde(default)]
    pub rankings: Vec<RankedPlayer>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RankedPlayer {
    pub dg_id: i64,
    pub player_name: String,
    #[serde(default)]
    pub datagolf_rank: Option<i32>,
    #[serde(default)]
    pub dg_skill_estimate: Option<f64>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OddsResponse {
    #[serde(default)]
    pub odds: Vec<OutrightOdds>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct OutrightOdds {
    pub dg_id: i64,
    pub player_name: String,
    #[serde(default, deserialize_with = "american_odds")]
    pub fanduel: Option<f64>,
    #[serde(default, deserialize_with = "american_odds")]
    pub draftkings: Option<f64>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ApproachResponse {
    #[serde(default)]
    pub data: Vec<ApproachRecord>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ApproachRecord {
    pub dg_id: i64,
    pub player_name: String,
    #[serde(default, rename = "100_150_fw_proximity_per_shot")]
    pub fw_100_150_proximity: Option<f64>,
    #[serde(default, rename = "150_200_fw_proximity_per_shot")]
    pub fw_150_200_proximity: Option<f64>,
    #[serde(default, rename = "over_200_fw_proximity_per_shot")]
    pub fw_over_200_proximity: Option<f64>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectionsResponse {
    #[serde(default)]
    pub projections: Vec<ProjectionRecord>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectionRecord {
    pub dg_id: i64,
    pub player_name: String,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub proj_points: Option<f64>,
    #[serde(default)]
    pub proj_ownership: Option<f64>,
}

/// Books publish prices as numbers or as strings like `"+450"`.
fn american_odds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_start_matches('+').parse::<f64>().ok(),
        _ => None,
    }
    .filter(|odds| *odds != 0.0))
}
