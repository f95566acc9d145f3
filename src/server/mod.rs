pub mod handlers;

use crate::args::CleanArgs;
use crate::cache::{CacheMap, new_cache_map};
use crate::error::CoreError;
use crate::model::{FantasySettings, Golfer, SavedModels, SimulatedGolfer, WeightSet};
use crate::provider::{DataGolfClient, FieldOptions, HistoricalData, StatsProvider};
use crate::simulation::SimulationSettings;
use actix_web::web::{self, Data};
use actix_web::{App, HttpResponse, HttpServer};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared across workers; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn StatsProvider>,
    pub history: Arc<HistoricalData>,
    pub field_options: FieldOptions,
    pub simulation: SimulationSettings,
    pub weights: WeightSet,
    pub fantasy: FantasySettings,
    pub field_cache: CacheMap<Vec<Golfer>>,
    pub simulation_cache: CacheMap<Vec<SimulatedGolfer>>,
    pub models: Arc<RwLock<SavedModels>>,
    pub models_path: Option<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self {
            provider,
            history: Arc::new(HistoricalData::default()),
            field_options: FieldOptions::default(),
            simulation: SimulationSettings::default(),
            weights: WeightSet::default(),
            fantasy: FantasySettings::default(),
            field_cache: new_cache_map(),
            simulation_cache: new_cache_map(),
            models: Arc::new(RwLock::new(SavedModels::default())),
            models_path: None,
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the history files or the saved-models file cannot be read
    pub fn from_args(args: &CleanArgs) -> Result<Self, CoreError> {
        let api_key = args.provider.api_key.clone().unwrap_or_default();
        let client = DataGolfClient::with_base_url(api_key, args.provider.base_url.clone())
            .tour(args.provider.tour.clone());
        let history = HistoricalData::load(
            args.history.rounds_json.as_deref(),
            args.history.scoring_stats_csv.as_deref(),
        )?;
        let models = match &args.server.models_json {
            Some(path) => SavedModels::load(path)?,
            None => SavedModels::default(),
        };

        let mut state = Self::new(Arc::new(client));
        state.history = Arc::new(history);
        state.field_options = args.field.clone();
        state.simulation = args.simulation;
        state.weights = args.weights.clone();
        state.fantasy = args.fantasy.clone();
        state.models = Arc::new(RwLock::new(models));
        state.models_path.clone_from(&args.server.models_json);
        Ok(state)
    }
}

/// JSON `{"error": ...}` with a status matching the failure.
#[must_use]
pub fn error_response(err: &CoreError) -> HttpResponse {
    let body = json!({"error": err.to_string()});
    match err {
        e if e.is_precondition() => HttpResponse::BadRequest().json(body),
        CoreError::NotFound(_) => HttpResponse::NotFound().json(body),
        CoreError::Network(_) => {
            tracing::error!(error = %err, "upstream feed failed");
            HttpResponse::BadGateway().json(body)
        }
        _ => {
            tracing::error!(error = %err, "request failed");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(json!({"error": err.to_string()}));
        actix_web::error::InternalError::from_response(err, response).into()
    }))
    .route("/health", web::get().to(HttpResponse::Ok))
    .route("/field", web::get().to(handlers::field))
    .route("/simulate", web::post().to(handlers::simulate))
    .route("/stats-model", web::post().to(handlers::stats_model))
    .route("/optimize", web::post().to(handlers::optimize))
    .route("/odds", web::get().to(handlers::odds))
    .route("/models", web::get().to(handlers::list_models))
    .route("/models", web::post().to(handlers::save_model))
    .route("/models/{id}", web::get().to(handlers::get_model))
    .route("/models/{id}", web::delete().to(handlers::delete_model));
}

/// # Errors
///
/// Will return `Err` if the address cannot be bound or the server fails
pub async fn run(state: AppState, bind: &str, port: u16) -> std::io::Result<()> {
    tracing::info!(bind, port, "starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}
