mod common;

use clap::Parser;
use common::fixture_path;
use std::error::Error;
use teeline::args::{Cli, Mode, load_config};
use teeline::model::{FeasibilityMode, Metric};
use teeline::simulation::MAX_SIMULATION_ROUNDS;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["teeline"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments parse")
}

#[test]
fn test5_file_values_are_overridden_by_flags() -> Result<(), Box<dyn Error>> {
    let config = fixture_path("config.toml");
    let args = load_config(cli(&[
        "--config-toml",
        config.to_str().ok_or("path")?,
        "--datagolf-api-key",
        "cli-key",
        "optimize",
        "--lineups",
        "3",
        "--lock",
        "18417",
        "--exclude",
        "9999",
    ]))?;

    assert_eq!(args.provider.api_key.as_deref(), Some("cli-key"));
    assert_eq!(args.provider.tour, "euro");
    assert_eq!(args.field.selected_courses, vec!["TPC Sawgrass".to_string()]);
    assert_eq!(args.field.round_range, 8);

    assert_eq!(args.fantasy.site, "fanduel");
    assert_eq!(args.fantasy.lineups, 3);
    assert_eq!(args.fantasy.max_exposure, 60.0);
    assert_eq!(args.fantasy.budget, 60_000);
    assert_eq!(args.fantasy.feasibility, FeasibilityMode::GlobalMinimum);
    assert_eq!(
        args.mode,
        Mode::Optimize {
            locked: vec!["18417".to_string()],
            excluded: vec!["9999".to_string()],
        }
    );

    assert_eq!(args.weights.weight_of(Metric::OTT), Some(60.0));
    assert!(args.weights.is_full_weight());
    assert_eq!(args.server.port, 9090);
    Ok(())
}

#[test]
fn test5_simulate_merges_settings_and_weights_file() -> Result<(), Box<dyn Error>> {
    let config = fixture_path("config.toml");
    let weights = fixture_path("weights.json");
    let args = load_config(cli(&[
        "--config-toml",
        config.to_str().ok_or("path")?,
        "--datagolf-api-key",
        "k",
        "--round-range",
        "4",
        "simulate",
        "--rounds",
        "50",
        "--weights-json",
        weights.to_str().ok_or("path")?,
        "--top",
        "10",
    ]))?;

    assert_eq!(args.simulation.rounds, 50);
    assert_eq!(args.simulation.seed, Some(7));
    assert_eq!(args.simulation.random_spread, 0.4);
    assert_eq!(args.simulation.round_range, 4);
    assert_eq!(args.field.round_range, 4);
    assert_eq!(args.weights.weight_of(Metric::Total), Some(50.0));
    assert_eq!(args.weights.weight_of(Metric::OTT), None);
    assert_eq!(
        args.mode,
        Mode::Simulate {
            top: Some(10),
            stats_model: false,
        }
    );
    Ok(())
}

#[test]
fn test5_defaults_without_config_file() -> Result<(), Box<dyn Error>> {
    let args = load_config(cli(&["--datagolf-api-key", "k", "serve"]))?;

    assert_eq!(args.simulation.rounds, 200);
    assert_eq!(args.field.round_range, 12);
    assert!(args.field.selected_courses.is_empty());
    assert_eq!(args.fantasy.site, "draftkings");
    assert_eq!(args.fantasy.budget, 50_000);
    assert_eq!(args.weights.total(), 80.0);
    assert_eq!(args.server.bind, "0.0.0.0");
    assert_eq!(args.server.port, 8081);
    assert_eq!(args.provider.base_url, "https://feeds.datagolf.com");
    assert_eq!(args.mode, Mode::Serve);
    Ok(())
}

#[test]
fn test5_odds_conversion_needs_no_key() -> Result<(), Box<dyn Error>> {
    let args = load_config(cli(&["odds", "--american", "-150", "--stake", "30"]))?;
    assert_eq!(
        args.mode,
        Mode::Odds {
            american: Some(-150.0),
            stake: 30.0,
        }
    );
    assert!(!args.needs_provider());
    Ok(())
}

#[test]
fn test5_feasibility_flag_parses_to_model_mode() -> Result<(), Box<dyn Error>> {
    let args = load_config(cli(&[
        "--datagolf-api-key",
        "k",
        "optimize",
        "--feasibility",
        "global_minimum",
    ]))?;
    assert_eq!(args.fantasy.feasibility, FeasibilityMode::GlobalMinimum);

    let args = load_config(cli(&["--datagolf-api-key", "k", "optimize"]))?;
    assert_eq!(args.fantasy.feasibility, FeasibilityMode::Strict);
    Ok(())
}

#[test]
fn test5_out_of_range_values_are_rejected() {
    let exposure = load_config(cli(&[
        "--datagolf-api-key",
        "k",
        "optimize",
        "--max-exposure",
        "150",
    ]));
    assert!(exposure.is_err());

    let lineups = load_config(cli(&["--datagolf-api-key", "k", "optimize", "--lineups", "0"]));
    assert!(lineups.is_err());

    let site = load_config(cli(&["--datagolf-api-key", "k", "optimize", "--site", "yahoo"]));
    assert!(site.is_err());

    let rounds = load_config(cli(&["--datagolf-api-key", "k", "simulate", "--rounds", "0"]));
    assert!(rounds.is_err());

    let too_many = MAX_SIMULATION_ROUNDS + 1;
    let rounds = load_config(cli(&[
        "--datagolf-api-key",
        "k",
        "simulate",
        "--rounds",
        too_many.to_string().as_str(),
    ]));
    assert!(rounds.is_err());
}

#[test]
fn test5_missing_key_is_rejected_for_live_commands() {
    if std::env::var_os("DATAGOLF_API_KEY").is_some() {
        eprintln!("Skipping: DATAGOLF_API_KEY is set in the environment");
        return;
    }
    let err = load_config(cli(&["simulate"])).unwrap_err();
    assert!(err.to_string().contains("API key"));
}

#[test]
fn test5_unreadable_config_is_a_parse_error() {
    let parsed = Cli::try_parse_from(["teeline", "--config-toml", "/no/such/file.toml", "serve"]);
    assert!(parsed.is_err());
}
