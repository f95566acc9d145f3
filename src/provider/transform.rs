use crate::error::CoreError;
use crate::model::{
    DrivingStats, FantasyPlayer, Golfer, Odds, ProximityStats, RoundRecord, ScoringStats,
    StrokesGained,
};
use crate::odds::implied_probability;
use crate::provider::StatsProvider;
use crate::provider::history::{HistoricalData, ScoringStatRecord};
use crate::provider::types::{ApproachRecord, OddsResponse, ProjectionRecord, RankedPlayer};
use crate::simulation::DEFAULT_ROUND_RANGE;
use ahash::AHashMap;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Which history feeds into each golfer's averages.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOptions {
    /// Courses whose rounds count; empty means every course.
    pub selected_courses: Vec<String>,
    /// Newest rounds kept per player.
    pub round_range: usize,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            selected_courses: Vec::new(),
            round_range: DEFAULT_ROUND_RANGE,
        }
    }
}

/// Lowercased `first last` form; `"Scheffler, Scottie"` and `"Scottie Scheffler"` agree.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let ordered = match name.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => name.to_string(),
    };
    ordered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Fetches rankings, odds and approach data concurrently and assembles the field.
///
/// # Errors
///
/// Will return `Err` if any of the three feeds fails
pub async fn load_field(
    provider: &dyn StatsProvider,
    history: &HistoricalData,
    options: &FieldOptions,
) -> Result<Vec<Golfer>, CoreError> {
    let (rankings, odds, approach) = futures::try_join!(
        provider.rankings(),
        provider.outright_odds(),
        provider.approach_stats()
    )?;
    let golfers = build_field(&rankings, &odds, &approach, history, options);
    tracing::info!(
        ranked = rankings.len(),
        with_odds = golfers.len(),
        "assembled field"
    );
    Ok(golfers)
}

/// Joins the raw feeds into golfer profiles. Ranked players without odds are left out.
#[must_use]
pub fn build_field(
    rankings: &[RankedPlayer],
    odds: &OddsResponse,
    approach: &[ApproachRecord],
    history: &HistoricalData,
    options: &FieldOptions,
) -> Vec<Golfer> {
    let prices: AHashMap<i64, f64> = odds
        .odds
        .iter()
        .filter_map(|o| o.fanduel.map(|price| (o.dg_id, price)))
        .collect();
    let approach_by_id: AHashMap<i64, &ApproachRecord> =
        approach.iter().map(|a| (a.dg_id, a)).collect();
    let last_updated = odds
        .last_updated
        .as_deref()
        .and_then(parse_feed_timestamp)
        .unwrap_or_else(Utc::now);

    let mut stats_by_player: AHashMap<String, Vec<&ScoringStatRecord>> = AHashMap::new();
    for row in &history.scoring_stats {
        stats_by_player
            .entry(normalize_name(&row.player_full_name))
            .or_default()
            .push(row);
    }
    let rounds_by_player: AHashMap<String, &str> = history
        .rounds
        .keys()
        .map(|name| (normalize_name(name), name.as_str()))
        .collect();

    let mut ranked: Vec<&RankedPlayer> = rankings
        .iter()
        .filter(|p| prices.contains_key(&p.dg_id))
        .collect();
    ranked.sort_by_key(|p| p.datagolf_rank.unwrap_or(i32::MAX));

    ranked
        .into_iter()
        .map(|player| {
            let key = normalize_name(&player.player_name);
            let rounds = rounds_by_player
                .get(&key)
                .map(|name| recent_rounds(history, name, options))
                .unwrap_or_default();
            let american = prices.get(&player.dg_id).copied();

            let mut golfer = Golfer::new(player.dg_id.to_string(), player.player_name.clone());
            golfer.rank = player.datagolf_rank;
            golfer.strokes_gained = strokes_gained(&rounds);
            golfer.driving = driving(&rounds);
            golfer.proximity = approach_by_id
                .get(&player.dg_id)
                .map(|a| proximity(a))
                .unwrap_or_default();
            golfer.scoring = stats_by_player
                .get(&key)
                .map(|rows| scoring(rows))
                .unwrap_or_default();
            golfer.odds = Some(Odds {
                american,
                implied_probability: american.and_then(implied_probability),
                last_updated: Some(last_updated),
            });
            golfer.recent_rounds = rounds;
            golfer
        })
        .collect()
}

fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim().trim_end_matches("UTC").trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Newest `round_range` rounds for `player`, restricted to the selected courses.
fn recent_rounds(
    history: &HistoricalData,
    player: &str,
    options: &FieldOptions,
) -> Vec<RoundRecord> {
    let Some(courses) = history.rounds.get(player) else {
        return Vec::new();
    };
    let mut rounds: Vec<RoundRecord> = courses
        .iter()
        .filter(|(course, _)| {
            options.selected_courses.is_empty() || options.selected_courses.contains(course)
        })
        .flat_map(|(_, c)| c.rounds.iter().cloned().map(RoundRecord::from))
        .collect();
    rounds.sort_by(|a, b| b.date.cmp(&a.date).then(b.round.cmp(&a.round)));
    rounds.truncate(options.round_range);
    rounds
}

fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

fn strokes_gained(rounds: &[RoundRecord]) -> StrokesGained {
    StrokesGained {
        total: mean(rounds.iter().map(|r| r.sg_total)),
        tee: mean(rounds.iter().map(|r| r.sg_ott)),
        approach: mean(rounds.iter().map(|r| r.sg_app)),
        around: mean(rounds.iter().map(|r| r.sg_arg)),
        putting: mean(rounds.iter().map(|r| r.sg_putt)),
    }
}

fn driving(rounds: &[RoundRecord]) -> DrivingStats {
    DrivingStats {
        distance: mean(rounds.iter().map(|r| r.driving_dist)),
        accuracy: mean(rounds.iter().map(|r| r.driving_acc)),
        gir: mean(rounds.iter().map(|r| r.gir)),
    }
}

/// The approach feed reports three wide bands; each is split into two narrower ones.
fn proximity(a: &ApproachRecord) -> ProximityStats {
    let scaled = |v: Option<f64>, factor: f64| v.map(|v| v * factor);
    ProximityStats {
        yards_100_125: scaled(a.fw_100_150_proximity, 0.95),
        yards_125_150: scaled(a.fw_100_150_proximity, 1.05),
        yards_150_175: scaled(a.fw_150_200_proximity, 0.95),
        yards_175_200: scaled(a.fw_150_200_proximity, 1.05),
        yards_200_225: scaled(a.fw_over_200_proximity, 0.95),
        yards_225_plus: scaled(a.fw_over_200_proximity, 1.15),
    }
}

fn scoring(rows: &[&ScoringStatRecord]) -> ScoringStats {
    let stat = |id: &str| mean(rows.iter().filter(|r| r.stat_id == id).map(|r| r.value));
    ScoringStats {
        bogey_avoidance: stat("02414"),
        total_birdies: stat("107"),
        par3_birdie_or_better: stat("112"),
        par4_birdie_or_better: stat("113"),
        par5_birdie_or_better: stat("114"),
        birdie_or_better_conversion: stat("115"),
        par3_scoring_avg: stat("142"),
        par4_scoring_avg: stat("143"),
        par5_scoring_avg: stat("144"),
        eagles_per_hole: stat("155"),
        birdie_average: stat("156"),
        birdie_or_better_percentage: stat("352"),
    }
}

fn fantasy_player(
    id: String,
    name: String,
    projection: Option<&ProjectionRecord>,
) -> FantasyPlayer {
    FantasyPlayer {
        id,
        name,
        salary: projection.and_then(|p| p.salary).unwrap_or(0),
        projected_points: projection.and_then(|p| p.proj_points).unwrap_or(0.0),
        ownership: projection.and_then(|p| p.proj_ownership),
    }
}

/// Optimizer pool straight from a projections feed.
#[must_use]
pub fn fantasy_pool(projections: &[ProjectionRecord]) -> Vec<FantasyPlayer> {
    projections
        .iter()
        .map(|p| fantasy_player(p.dg_id.to_string(), p.player_name.clone(), Some(p)))
        .collect()
}

/// Attaches salaries and projections to an existing field by normalized name.
///
/// Unmatched golfers keep a zero salary and are dropped by the optimizer.
#[must_use]
pub fn join_salaries(golfers: &[Golfer], projections: &[ProjectionRecord]) -> Vec<FantasyPlayer> {
    let by_name: AHashMap<String, &ProjectionRecord> = projections
        .iter()
        .map(|p| (normalize_name(&p.player_name), p))
        .collect();
    golfers
        .iter()
        .map(|g| {
            let projection = by_name.get(&normalize_name(&g.name)).copied();
            if projection.is_none() {
                tracing::debug!(player = %g.name, "no salary found");
            }
            fantasy_player(g.id.clone(), g.name.clone(), projection)
        })
        .collect()
}
