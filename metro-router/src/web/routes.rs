//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::disruption::DisruptionError;
use crate::planner::{Engine, ResilienceReport, RouteError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/stations/:id/lines", get(station_lines))
        .route("/route", post(plan_route))
        .route("/route/alternatives", post(plan_alternatives))
        .route("/disruptions", get(current_disruptions))
        .route("/disruptions/delay", post(set_delay))
        .route("/disruptions/reset", post(reset_disruptions))
        .route("/disruptions/stations/:id/close", post(close_station))
        .route("/disruptions/stations/:id/open", post(open_station))
        .route(
            "/disruptions/stations/:id/lines/:line/close",
            post(close_station_line),
        )
        .route(
            "/disruptions/stations/:id/lines/:line/open",
            post(open_station_line),
        )
        .route("/resilience", post(resilience))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn require_station(engine: &Engine, id: &str) -> Result<(), AppError> {
    match engine.network().station(id) {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound {
            message: format!("unknown station: {id}"),
        }),
    }
}

/// All stations, sorted by name, with their current accessibility.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let engine = state.engine.read().await;
    let network = engine.network();
    let stations = network
        .station_ids_sorted()
        .into_iter()
        .filter_map(|id| network.station(id.as_str()))
        .map(|s| StationResult::from_station(s, engine.is_station_accessible(s.id.as_str())))
        .collect();

    Json(StationsResponse { stations })
}

async fn station_lines(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationLinesResponse>, AppError> {
    let engine = state.engine.read().await;
    require_station(&engine, &id)?;

    Ok(Json(StationLinesResponse {
        lines: engine
            .station_lines(&id)
            .iter()
            .map(|l| l.to_string())
            .collect(),
        station: id,
    }))
}

fn reject_same_endpoints(from: &str, to: &str) -> Result<(), AppError> {
    if from == to {
        return Err(AppError::BadRequest {
            message: "origin and destination must differ".to_string(),
        });
    }
    Ok(())
}

/// Best route under the requested criterion.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResult>, AppError> {
    reject_same_endpoints(&req.from, &req.to)?;

    let engine = state.engine.read().await;
    let criterion = req.criterion_or(engine.config().default_criterion);
    let route = engine.find_shortest_path(&req.from, &req.to, criterion)?;

    Ok(Json(RouteResult::from_route(&route)))
}

/// Best route followed by diverse alternatives.
async fn plan_alternatives(
    State(state): State<AppState>,
    Json(req): Json<AlternativesRequest>,
) -> Result<Json<AlternativesResponse>, AppError> {
    reject_same_endpoints(&req.from, &req.to)?;

    let engine = state.engine.read().await;
    let criterion = req.criterion_or(engine.config().default_criterion);
    let max_routes = engine.config().alternatives_for(req.max_routes);
    let routes = engine.find_alternative_routes(&req.from, &req.to, criterion, max_routes)?;

    Ok(Json(AlternativesResponse {
        routes: routes.iter().map(RouteResult::from_route).collect(),
    }))
}

async fn current_disruptions(State(state): State<AppState>) -> Json<DisruptionsResponse> {
    let engine = state.engine.read().await;
    Json(DisruptionsResponse::from_overlay(engine.overlay()))
}

async fn set_delay(
    State(state): State<AppState>,
    Json(req): Json<DelayRequest>,
) -> Result<Json<DisruptionsResponse>, AppError> {
    let mut engine = state.engine.write().await;
    engine.apply_delay_factor(req.factor)?;
    info!(factor = req.factor, "delay factor set");

    Ok(Json(DisruptionsResponse::from_overlay(engine.overlay())))
}

async fn reset_disruptions(State(state): State<AppState>) -> Json<DisruptionsResponse> {
    let mut engine = state.engine.write().await;
    engine.reset_all_closures();
    info!("disruptions reset");

    Json(DisruptionsResponse::from_overlay(engine.overlay()))
}

async fn close_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DisruptionsResponse>, AppError> {
    let mut engine = state.engine.write().await;
    require_station(&engine, &id)?;
    engine.close_station(&id);
    info!(station = %id, "station closed");

    Ok(Json(DisruptionsResponse::from_overlay(engine.overlay())))
}

async fn open_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DisruptionsResponse>, AppError> {
    let mut engine = state.engine.write().await;
    require_station(&engine, &id)?;
    engine.open_station(&id);
    info!(station = %id, "station reopened");

    Ok(Json(DisruptionsResponse::from_overlay(engine.overlay())))
}

async fn close_station_line(
    State(state): State<AppState>,
    Path((id, line)): Path<(String, String)>,
) -> Result<Json<DisruptionsResponse>, AppError> {
    let mut engine = state.engine.write().await;
    require_station(&engine, &id)?;
    engine.close_station_line(&id, &line)?;
    info!(station = %id, line = %line, "line closed at station");

    Ok(Json(DisruptionsResponse::from_overlay(engine.overlay())))
}

async fn open_station_line(
    State(state): State<AppState>,
    Path((id, line)): Path<(String, String)>,
) -> Result<Json<DisruptionsResponse>, AppError> {
    let mut engine = state.engine.write().await;
    require_station(&engine, &id)?;
    engine.open_station_line(&id, &line);
    info!(station = %id, line = %line, "line reopened at station");

    Ok(Json(DisruptionsResponse::from_overlay(engine.overlay())))
}

/// Close each requested station in turn and report the damage.
///
/// Runs on the blocking pool: each station costs a path search per pair of
/// stations.
async fn resilience(
    State(state): State<AppState>,
    Json(req): Json<ResilienceRequest>,
) -> Result<Json<ResilienceReport>, AppError> {
    let engine = Arc::clone(&state.engine);
    let report = tokio::task::spawn_blocking(move || {
        engine.blocking_read().analyze_resilience(req.stations.as_slice())
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("resilience analysis failed: {e}"),
    })?;

    Ok(Json(report))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::UnknownStation(_) | RouteError::NoRouteFound { .. } => {
                AppError::NotFound { message }
            }
            RouteError::StationClosed { .. } => AppError::Conflict { message },
        }
    }
}

impl From<DisruptionError> for AppError {
    fn from(e: DisruptionError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
