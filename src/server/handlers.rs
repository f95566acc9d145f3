use super::{AppState, error_response};
use crate::cache::{get_fresh, get_or_try_insert_with, store};
use crate::error::CoreError;
use crate::model::{FantasyPlayer, FantasySettings, Golfer, WeightSet};
use crate::odds::{payout, resolve_implied_probability};
use crate::optimizer::{Site, generate_optimal_lineups};
use crate::provider::{FieldOptions, fantasy_pool, load_field};
use crate::simulation::{
    MissingMetricPolicy, SimulationSettings, rank_by_stats_model, rng_for, simulate_field,
    simulate_multiple_rounds,
};
use actix_web::HttpResponse;
use actix_web::web::{self, Data};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;


#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SimulateRequest {
    /// Defaults to the provider's current field.
    pub golfers: Option<Vec<Golfer>>,
    pub weights: Option<WeightSet>,
    pub model_id: Option<Uuid>,
    pub settings: Option<SimulationSettings>,
    /// Simulate this player against the rest instead of the whole field.
    pub target: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct StatsModelRequest {
    pub golfers: Option<Vec<Golfer>>,
    pub weights: Option<WeightSet>,
    pub model_id: Option<Uuid>,
    pub missing: Option<MissingMetricPolicy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct OptimizeRequest {
    /// Defaults to the provider's projections for the site.
    pub players: Option<Vec<FantasyPlayer>>,
    pub settings: Option<FantasySettings>,
    pub locked: Vec<String>,
    pub excluded: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct OddsQuery {
    pub stake: Option<f64>,
}

#[derive(Serialize, Debug)]
pub struct OddsRow {
    pub id: String,
    pub name: String,
    pub american: Option<f64>,
    pub implied_probability: f64,
    pub payout: f64,
}

#[derive(Deserialize, Debug)]
pub struct SaveModelRequest {
    pub name: String,
    pub weights: WeightSet,
}

/// The provider's field with profiles averaged over `round_range` rounds, cached per range.
async fn field_with_range(state: &AppState, round_range: usize) -> Result<Vec<Golfer>, CoreError> {
    let options = FieldOptions {
        round_range,
        ..state.field_options.clone()
    };
    let key = format!("field:{round_range}");
    get_or_try_insert_with(&state.field_cache, &key, || {
        load_field(state.provider.as_ref(), &state.history, &options)
    })
    .await
}

async fn current_field(state: &AppState) -> Result<Vec<Golfer>, CoreError> {
    field_with_range(state, state.field_options.round_range).await
}

async fn resolve_weights(
    state: &AppState,
    weights: Option<WeightSet>,
    model_id: Option<Uuid>,
) -> Result<WeightSet, CoreError> {
    if let Some(weights) = weights {
        return Ok(weights);
    }
    match model_id {
        Some(id) => state
            .models
            .read()
            .await
            .get(id)
            .map(|m| m.weights.clone())
            .ok_or_else(|| CoreError::NotFound(format!("saved model {id}"))),
        None => Ok(state.weights.clone()),
    }
}

pub async fn field(state: Data<AppState>) -> HttpResponse {
    match current_field(&state).await {
        Ok(golfers) => HttpResponse::Ok().json(golfers),
        Err(e) => error_response(&e),
    }
}

pub async fn simulate(state: Data<AppState>, body: web::Json<SimulateRequest>) -> HttpResponse {
    let req = body.into_inner();
    let settings = req.settings.unwrap_or(state.simulation);
    if let Err(e) = settings.validate() {
        return error_response(&e);
    }
    let weights = match resolve_weights(&state, req.weights, req.model_id).await {
        Ok(weights) => weights,
        Err(e) => return error_response(&e),
    };
    let from_provider = req.golfers.is_none();
    let golfers = match req.golfers {
        Some(golfers) => golfers,
        None => match field_with_range(&state, settings.round_range).await {
            Ok(golfers) => golfers,
            Err(e) => return error_response(&e),
        },
    };

    if let Some(target_id) = req.target {
        let Some(target) = golfers.iter().find(|g| g.id == target_id).cloned() else {
            return error_response(&CoreError::NotFound(format!("player {target_id}")));
        };
        let implied_probability = resolve_implied_probability(&target);
        let stats = web::block(move || {
            let mut rng = rng_for(&settings);
            simulate_multiple_rounds(&target, &golfers, &weights, &settings, &mut rng)
                .map(|stats| (target, stats))
        })
        .await;
        return match stats {
            Ok(Ok((target, stats))) => HttpResponse::Ok().json(json!({
                "id": target.id,
                "name": target.name,
                "implied_probability": implied_probability,
                "stats": stats,
            })),
            Ok(Err(e)) => error_response(&e),
            Err(e) => error_response(&CoreError::Other(e.to_string())),
        };
    }

    let key = format!("{}|{}", weights.fingerprint(), settings.fingerprint());
    if from_provider {
        if let Some(results) = get_fresh(&state.simulation_cache, &key).await {
            return HttpResponse::Ok().json(results);
        }
    }
    let simulated = web::block(move || {
        let mut rng = rng_for(&settings);
        simulate_field(&golfers, &weights, &settings, &mut rng)
    })
    .await;
    match simulated {
        Ok(Ok(results)) => {
            if from_provider {
                store(&state.simulation_cache, key, results.clone()).await;
            }
            HttpResponse::Ok().json(results)
        }
        Ok(Err(e)) => error_response(&e),
        Err(e) => error_response(&CoreError::Other(e.to_string())),
    }
}

pub async fn stats_model(
    state: Data<AppState>,
    body: web::Json<StatsModelRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let weights = match resolve_weights(&state, req.weights, req.model_id).await {
        Ok(weights) => weights,
        Err(e) => return error_response(&e),
    };
    let golfers = match req.golfers {
        Some(golfers) => golfers,
        None => match current_field(&state).await {
            Ok(golfers) => golfers,
            Err(e) => return error_response(&e),
        },
    };
    let missing = req.missing.unwrap_or(state.simulation.missing);
    match rank_by_stats_model(&golfers, &weights, missing) {
        Ok(ranking) => HttpResponse::Ok().json(ranking),
        Err(e) => error_response(&e),
    }
}

pub async fn optimize(state: Data<AppState>, body: web::Json<OptimizeRequest>) -> HttpResponse {
    let req = body.into_inner();
    let settings = req.settings.unwrap_or_else(|| state.fantasy.clone());
    let players = match req.players {
        Some(players) => players,
        None => {
            let site = match settings.site.parse::<Site>() {
                Ok(site) => site,
                Err(e) => return error_response(&e),
            };
            match state.provider.fantasy_projections(site).await {
                Ok(projections) => fantasy_pool(&projections),
                Err(e) => return error_response(&e),
            }
        }
    };
    match generate_optimal_lineups(&players, &settings, &req.locked, &req.excluded) {
        Ok(batch) => HttpResponse::Ok().json(batch),
        Err(e) => error_response(&e),
    }
}

pub async fn odds(state: Data<AppState>, query: web::Query<OddsQuery>) -> HttpResponse {
    let stake = query.stake.unwrap_or(100.0);
    let golfers = match current_field(&state).await {
        Ok(golfers) => golfers,
        Err(e) => return error_response(&e),
    };
    let rows: Vec<OddsRow> = golfers
        .iter()
        .map(|g| {
            let american = g.odds.as_ref().and_then(|o| o.american);
            OddsRow {
                id: g.id.clone(),
                name: g.name.clone(),
                american,
                implied_probability: resolve_implied_probability(g),
                payout: american.map_or(0.0, |a| payout(a, stake)),
            }
        })
        .collect();
    HttpResponse::Ok().json(rows)
}

pub async fn list_models(state: Data<AppState>) -> HttpResponse {
    let models = state.models.read().await;
    HttpResponse::Ok().json(models.list())
}

pub async fn save_model(state: Data<AppState>, body: web::Json<SaveModelRequest>) -> HttpResponse {
    let req = body.into_inner();
    if req.name.trim().is_empty() {
        return error_response(&CoreError::InvalidSettings(
            "model name must not be empty".to_string(),
        ));
    }
    let mut models = state.models.write().await;
    let saved = models.save(req.name.trim(), req.weights).clone();
    if let Some(path) = &state.models_path {
        if let Err(e) = models.store(path) {
            return error_response(&e);
        }
    }
    tracing::info!(id = %saved.id, name = %saved.name, "saved model");
    HttpResponse::Created().json(saved)
}

pub async fn get_model(state: Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();
    let models = state.models.read().await;
    match models.get(id) {
        Some(model) => HttpResponse::Ok().json(model),
        None => error_response(&CoreError::NotFound(format!("saved model {id}"))),
    }
}

pub async fn delete_model(state: Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();
    let mut models = state.models.write().await;
    if !models.delete(id) {
        return error_response(&CoreError::NotFound(format!("saved model {id}")));
    }
    if let Some(path) = &state.models_path {
        if let Err(e) = models.store(path) {
            return error_response(&e);
        }
    }
    HttpResponse::NoContent().finish()
}
