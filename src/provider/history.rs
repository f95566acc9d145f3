use crate::error::CoreError;
use crate::model::RoundRecord;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One row of the season scoring-stats export.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ScoringStatRecord {
    pub player_full_name: String,
    #[serde(rename = "statId")]
    pub stat_id: String,
    #[serde(default)]
    pub title: String,
    pub value: Option<f64>,
    pub rank: Option<i32>,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "fieldAverage")]
    pub field_average: Option<f64>,
    pub year: Option<i32>,
}

/// A single historical round as exported per player and course.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct HistoricalRound {
    #[serde(rename = "eventName")]
    pub event_name: String,
    #[serde(rename = "courseName")]
    pub course_name: String,
    pub round: i32,
    pub date: NaiveDate,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub sg_total: Option<f64>,
    #[serde(default)]
    pub sg_ott: Option<f64>,
    #[serde(default)]
    pub sg_app: Option<f64>,
    #[serde(default)]
    pub sg_arg: Option<f64>,
    #[serde(default)]
    pub sg_putt: Option<f64>,
    #[serde(default)]
    pub driving_acc: Option<f64>,
    #[serde(default)]
    pub driving_dist: Option<f64>,
    #[serde(default)]
    pub gir: Option<f64>,
}

impl From<HistoricalRound> for RoundRecord {
    fn from(r: HistoricalRound) -> Self {
        Self {
            event_name: r.event_name,
            course_name: r.course_name,
            round: r.round,
            date: r.date,
            score: r.score,
            sg_total: r.sg_total,
            sg_ott: r.sg_ott,
            sg_app: r.sg_app,
            sg_arg: r.sg_arg,
            sg_putt: r.sg_putt,
            driving_acc: r.driving_acc,
            driving_dist: r.driving_dist,
            gir: r.gir,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CourseRounds {
    #[serde(default)]
    pub rounds: Vec<HistoricalRound>,
}

/// Player name -> course name -> rounds.
pub type PlayerRounds = HashMap<String, HashMap<String, CourseRounds>>;

/// Offline history used to enrich the live feeds.
#[derive(Clone, Debug, Default)]
pub struct HistoricalData {
    pub rounds: PlayerRounds,
    pub scoring_stats: Vec<ScoringStatRecord>,
}

impl HistoricalData {
    /// Loads whichever history files are given; missing paths yield empty data.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a given file cannot be read or parsed
    pub fn load(rounds: Option<&Path>, scoring_stats: Option<&Path>) -> Result<Self, CoreError> {
        let rounds = match rounds {
            Some(path) => load_player_rounds(path)?,
            None => PlayerRounds::default(),
        };
        let scoring_stats = match scoring_stats {
            Some(path) => load_scoring_stats(path)?,
            None => Vec::new(),
        };
        tracing::info!(
            players = rounds.len(),
            stat_rows = scoring_stats.len(),
            "loaded historical data"
        );
        Ok(Self {
            rounds,
            scoring_stats,
        })
    }
}

/// # Errors
///
/// Will return `Err` if the file cannot be opened or a row fails to parse
pub fn load_scoring_stats(path: &Path) -> Result<Vec<ScoringStatRecord>, CoreError> {
    let file = std::fs::File::open(path)
        .map_err(|e| CoreError::Other(format!("{}: {e}", path.display())))?;
    read_scoring_stats(file)
}

/// # Errors
///
/// Will return `Err` if a row fails to parse
pub fn read_scoring_stats<R: Read>(reader: R) -> Result<Vec<ScoringStatRecord>, CoreError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// # Errors
///
/// Will return `Err` if the file cannot be read or is not valid rounds JSON
pub fn load_player_rounds(path: &Path) -> Result<PlayerRounds, CoreError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Other(format!("{}: {e}", path.display())))?;
    Ok(serde_json::from_str(&contents)?)
}
