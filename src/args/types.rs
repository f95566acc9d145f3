use crate::model::{FantasySettings, FeasibilityMode, MetricWeight, WeightSet};
use crate::provider::FieldOptions;
use crate::simulation::SimulationSettings;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Golf tournament simulator and DFS lineup optimizer")]
pub struct Cli {
    /// Optional TOML file; command-line values take precedence over it.
    #[arg(long, global = true, value_parser = crate::args::validation::check_readable_file)]
    pub config_toml: Option<PathBuf>,
    #[arg(long, global = true, env = "DATAGOLF_API_KEY", hide_env_values = true)]
    pub datagolf_api_key: Option<String>,
    #[arg(long, global = true)]
    pub datagolf_base_url: Option<String>,
    /// Player rounds history, `player -> course -> { rounds }`.
    #[arg(long, global = true, value_parser = crate::args::validation::check_readable_file)]
    pub rounds_json: Option<PathBuf>,
    /// Season scoring stats export.
    #[arg(long, global = true, value_parser = crate::args::validation::check_readable_file)]
    pub scoring_stats_csv: Option<PathBuf>,
    /// Restrict round history to these courses; repeatable.
    #[arg(long = "course", global = true)]
    pub courses: Vec<String>,
    #[arg(long, global = true)]
    pub round_range: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate the current field and print finishing probabilities.
    Simulate {
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// JSON array of `{ "metric": ..., "weight": ... }`.
        #[arg(long, value_parser = crate::args::validation::check_readable_file)]
        weights_json: Option<PathBuf>,
        /// Print only the first N players.
        #[arg(long)]
        top: Option<usize>,
        /// Rank by weighted stats only, without simulating.
        #[arg(long)]
        stats_model: bool,
    },
    /// Build salary-capped lineups from the site's projections.
    Optimize {
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        lineups: Option<usize>,
        /// Percentage of lineups a single player may appear in.
        #[arg(long)]
        max_exposure: Option<f64>,
        #[arg(long)]
        budget: Option<i64>,
        #[arg(long, value_enum)]
        feasibility: Option<FeasibilityMode>,
        /// Player id to force into every lineup; repeatable.
        #[arg(long = "lock")]
        locked: Vec<String>,
        /// Player id to keep out of every lineup; repeatable.
        #[arg(long = "exclude")]
        excluded: Vec<String>,
    },
    /// Convert American odds, or list the field's odds when none are given.
    Odds {
        #[arg(long, allow_hyphen_values = true)]
        american: Option<f64>,
        #[arg(long, default_value_t = 100.0)]
        stake: f64,
    },
    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        models_json: Option<PathBuf>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub datagolf: DataGolfFileConfig,
    #[serde(default)]
    pub history: HistoryFileConfig,
    #[serde(default)]
    pub simulation: SimulationFileConfig,
    #[serde(default)]
    pub optimizer: OptimizerFileConfig,
    #[serde(default)]
    pub server: ServerFileConfig,
    pub weights: Option<Vec<MetricWeight>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DataGolfFileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub tour: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryFileConfig {
    pub rounds_json: Option<PathBuf>,
    pub scoring_stats_csv: Option<PathBuf>,
    pub courses: Option<Vec<String>>,
    pub round_range: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulationFileConfig {
    pub rounds: Option<u32>,
    pub random_spread: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OptimizerFileConfig {
    pub site: Option<String>,
    pub lineups: Option<usize>,
    pub max_exposure: Option<f64>,
    pub budget: Option<i64>,
    pub feasibility: Option<FeasibilityMode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub models_json: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub tour: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryConfig {
    pub rounds_json: Option<PathBuf>,
    pub scoring_stats_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub models_json: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8081,
            models_json: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Simulate { top: Option<usize>, stats_model: bool },
    Optimize { locked: Vec<String>, excluded: Vec<String> },
    Odds { american: Option<f64>, stake: f64 },
    Serve,
}

/// Fully merged and validated settings for one run.
#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub mode: Mode,
    pub provider: ProviderConfig,
    pub history: HistoryConfig,
    pub field: FieldOptions,
    pub simulation: SimulationSettings,
    pub weights: WeightSet,
    pub fantasy: FantasySettings,
    pub server: ServerConfig,
}
