use super::types::{
    Cli, CleanArgs, Command, FileConfig, HistoryConfig, Mode, ProviderConfig, ServerConfig,
};
use crate::model::{FantasySettings, WeightSet};
use crate::provider::{DATAGOLF_BASE_URL, FieldOptions};
use crate::simulation::SimulationSettings;
use anyhow::{Context, Result, anyhow};
use std::path::Path;

/// Load config from CLI and optional TOML file.
///
/// # Errors
/// Returns an error if the config file or a weights file is unreadable or
/// invalid, or if the merged values fail validation.
pub fn load_config(cli: Cli) -> Result<CleanArgs> {
    let file_config = read_file_config(cli.config_toml.as_deref())?;

    let provider = ProviderConfig {
        api_key: cli.datagolf_api_key.or(file_config.datagolf.api_key),
        base_url: cli
            .datagolf_base_url
            .or(file_config.datagolf.base_url)
            .unwrap_or_else(|| DATAGOLF_BASE_URL.to_string()),
        tour: file_config.datagolf.tour.unwrap_or_else(|| "pga".to_string()),
    };
    let history = HistoryConfig {
        rounds_json: cli.rounds_json.or(file_config.history.rounds_json),
        scoring_stats_csv: cli
            .scoring_stats_csv
            .or(file_config.history.scoring_stats_csv),
    };

    let mut simulation = SimulationSettings::default();
    let mut field = FieldOptions::default();
    field.selected_courses = if cli.courses.is_empty() {
        file_config.history.courses.unwrap_or_default()
    } else {
        cli.courses
    };
    if let Some(round_range) = cli.round_range.or(file_config.history.round_range) {
        field.round_range = round_range;
        simulation.round_range = round_range;
    }
    if let Some(spread) = file_config.simulation.random_spread {
        simulation.random_spread = spread;
    }

    let mut weights = match file_config.weights {
        Some(weights) => WeightSet::new(weights).context("invalid [[weights]] in config toml")?,
        None => WeightSet::default(),
    };

    let mut fantasy = FantasySettings::default();
    let opt = file_config.optimizer;
    if let Some(site) = opt.site {
        fantasy.site = site;
    }
    if let Some(lineups) = opt.lineups {
        fantasy.lineups = lineups;
    }
    if let Some(max_exposure) = opt.max_exposure {
        fantasy.max_exposure = max_exposure;
    }
    if let Some(budget) = opt.budget {
        fantasy.budget = budget;
    }
    if let Some(feasibility) = opt.feasibility {
        fantasy.feasibility = feasibility;
    }

    let mut server = ServerConfig::default();
    if let Some(bind) = file_config.server.bind {
        server.bind = bind;
    }
    if let Some(port) = file_config.server.port {
        server.port = port;
    }
    server.models_json = file_config.server.models_json;

    let mode = match cli.command {
        Command::Simulate {
            rounds,
            seed,
            weights_json,
            top,
            stats_model,
        } => {
            simulation.rounds = rounds
                .or(file_config.simulation.rounds)
                .unwrap_or(simulation.rounds);
            simulation.seed = seed.or(file_config.simulation.seed);
            if let Some(path) = weights_json {
                weights = read_weights(&path)?;
            }
            Mode::Simulate { top, stats_model }
        }
        Command::Optimize {
            site,
            lineups,
            max_exposure,
            budget,
            feasibility,
            locked,
            excluded,
        } => {
            if let Some(site) = site {
                fantasy.site = site;
            }
            fantasy.lineups = lineups.unwrap_or(fantasy.lineups);
            fantasy.max_exposure = max_exposure.unwrap_or(fantasy.max_exposure);
            fantasy.budget = budget.unwrap_or(fantasy.budget);
            if let Some(feasibility) = feasibility {
                fantasy.feasibility = feasibility;
            }
            Mode::Optimize { locked, excluded }
        }
        Command::Odds { american, stake } => Mode::Odds { american, stake },
        Command::Serve {
            bind,
            port,
            models_json,
        } => {
            if let Some(bind) = bind {
                server.bind = bind;
            }
            server.port = port.unwrap_or(server.port);
            server.models_json = models_json.or(server.models_json);
            simulation.rounds = file_config.simulation.rounds.unwrap_or(simulation.rounds);
            simulation.seed = file_config.simulation.seed;
            Mode::Serve
        }
    };

    let args = CleanArgs {
        mode,
        provider,
        history,
        field,
        simulation,
        weights,
        fantasy,
        server,
    };
    args.validate().map_err(|e| anyhow!(e))?;
    Ok(args)
}

fn read_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read config toml {}", path.display()))?;
            toml::from_str::<FileConfig>(&contents)
                .with_context(|| format!("parse config toml {}", path.display()))
        }
        None => Ok(FileConfig::default()),
    }
}

fn read_weights(path: &Path) -> Result<WeightSet> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read weights json {}", path.display()))?;
    serde_json::from_str::<WeightSet>(&contents)
        .with_context(|| format!("parse weights json {}", path.display()))
}
