use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use teeline::args::{self, CleanArgs, Cli, Mode};
use teeline::model::Golfer;
use teeline::odds::{implied_probability, payout, resolve_implied_probability};
use teeline::optimizer::{Site, generate_optimal_lineups};
use teeline::provider::{DataGolfClient, HistoricalData, StatsProvider, fantasy_pool, load_field};
use teeline::server::{self, AppState};
use teeline::simulation::{rank_by_stats_model, rng_for, simulate_field};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = args::load_config(Cli::parse())?;

    match args.mode.clone() {
        Mode::Simulate { top, stats_model } => run_simulate(&args, top, stats_model).await,
        Mode::Optimize { locked, excluded } => run_optimize(&args, &locked, &excluded).await,
        Mode::Odds { american, stake } => run_odds(&args, american, stake).await,
        Mode::Serve => {
            let state = AppState::from_args(&args).context("prepare server state")?;
            server::run(state, &args.server.bind, args.server.port)
                .await
                .context("run HTTP server")
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn client(args: &CleanArgs) -> DataGolfClient {
    DataGolfClient::with_base_url(
        args.provider.api_key.clone().unwrap_or_default(),
        args.provider.base_url.clone(),
    )
    .tour(args.provider.tour.clone())
}

async fn fetch_field(args: &CleanArgs) -> Result<Vec<Golfer>> {
    let history = HistoricalData::load(
        args.history.rounds_json.as_deref(),
        args.history.scoring_stats_csv.as_deref(),
    )
    .context("load history files")?;
    load_field(&client(args), &history, &args.field)
        .await
        .context("fetch field from DataGolf")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_simulate(args: &CleanArgs, top: Option<usize>, stats_model: bool) -> Result<()> {
    let golfers = fetch_field(args).await?;
    let limit = top.unwrap_or(usize::MAX);
    if stats_model {
        let mut ranking = rank_by_stats_model(&golfers, &args.weights, args.simulation.missing)?;
        ranking.truncate(limit);
        return print_json(&ranking);
    }
    let mut rng = rng_for(&args.simulation);
    let mut results = simulate_field(&golfers, &args.weights, &args.simulation, &mut rng)?;
    results.truncate(limit);
    print_json(&results)
}

async fn run_optimize(args: &CleanArgs, locked: &[String], excluded: &[String]) -> Result<()> {
    let site: Site = args.fantasy.site.parse()?;
    let projections = client(args)
        .fantasy_projections(site)
        .await
        .with_context(|| format!("fetch {site} projections"))?;
    let pool = fantasy_pool(&projections);
    let batch = generate_optimal_lineups(&pool, &args.fantasy, locked, excluded)?;
    print_json(&batch)
}

async fn run_odds(args: &CleanArgs, american: Option<f64>, stake: f64) -> Result<()> {
    if let Some(american) = american {
        return print_json(&json!({
            "american": american,
            "implied_probability": implied_probability(american),
            "stake": stake,
            "payout": payout(american, stake),
        }));
    }
    let golfers = fetch_field(args).await?;
    let rows: Vec<_> = golfers
        .iter()
        .map(|g| {
            let american = g.odds.as_ref().and_then(|o| o.american);
            json!({
                "id": g.id,
                "name": g.name,
                "american": american,
                "implied_probability": resolve_implied_probability(g),
                "payout": american.map_or(0.0, |a| payout(a, stake)),
            })
        })
        .collect();
    print_json(&rows)
}

