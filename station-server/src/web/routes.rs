//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use geojson::FeatureCollection;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, warn};

use crate::dataset::Dataset;
use crate::domain::Coord;
use crate::query::{
    QueryError, distance_between, export_lines, export_stations, located, nearest,
    parse_coordinate, parse_count, parse_uid,
};

use super::dto::*;
use super::state::AppState;

/// Content type for GeoJSON exports.
const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// Create the application router.
///
/// Every route answers cross-origin requests from any origin.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/stations_list", get(stations_list))
        .route("/nearest", get(nearest_stations))
        .route("/distance", get(station_distance))
        .route("/stations.geojson", get(stations_geojson))
        .route("/lines.geojson", get(lines_geojson))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Service status.
async fn index() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "API is running :)".to_string(),
    })
}

/// Run a query against a freshly loaded dataset on the blocking pool.
async fn run_query<T, F>(state: &AppState, query: F) -> Result<T, AppError>
where
    F: FnOnce(&Dataset) -> Result<T, QueryError> + Send + 'static,
    T: Send + 'static,
{
    let dataset = Arc::clone(&state.dataset);
    tokio::task::spawn_blocking(move || query(&dataset))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("query task failed: {e}"),
        })?
        .map_err(AppError::from)
}

/// All stations that have a geometry.
async fn stations_list(State(state): State<AppState>) -> Result<Json<Vec<StationResult>>, AppError> {
    let stations = run_query(&state, |dataset| {
        let stations = dataset.load_stations()?;
        let listed: Vec<StationResult> = located(&stations)
            .map(|l| StationResult::from_located(&l))
            .collect();
        Ok(listed)
    })
    .await?;

    Ok(Json(stations))
}

/// Stations closest to a point.
async fn nearest_stations(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<NeighbourResult>>, AppError> {
    let Query(pairs) = query?;
    let req = NearestRequest::from_pairs(&pairs);
    let lat = parse_coordinate("lat", req.lat.as_deref())?;
    let lon = parse_coordinate("lon", req.lon.as_deref())?;
    let n = parse_count(req.n.as_deref());

    let results = run_query(&state, move |dataset| {
        let stations = dataset.load_stations()?;
        let ranked: Vec<NeighbourResult> = nearest(&stations, Coord::new(lon, lat), n)
            .iter()
            .map(NeighbourResult::from_neighbour)
            .collect();
        Ok(ranked)
    })
    .await?;

    debug!(lat, lon, n, results = results.len(), "nearest stations");
    Ok(Json(results))
}

/// Distance and connecting line between two stations.
async fn station_distance(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<DistanceResponse>, AppError> {
    let Query(pairs) = query?;
    let req = DistanceRequest::from_pairs(&pairs);
    let from = parse_uid("from", req.from.as_deref())?;
    let to = parse_uid("to", req.to.as_deref())?;

    let response = run_query(&state, move |dataset| {
        let stations = dataset.load_stations()?;
        let distance = distance_between(&stations, from, to)?;
        Ok(DistanceResponse::from_distance(&distance))
    })
    .await?;

    Ok(Json(response))
}

/// The full stations layer as GeoJSON.
async fn stations_geojson(State(state): State<AppState>) -> Result<Response, AppError> {
    let collection = run_query(&state, export_stations).await?;
    Ok(geojson_response(collection))
}

/// The full railway layer as GeoJSON.
async fn lines_geojson(State(state): State<AppState>) -> Result<Response, AppError> {
    let collection = run_query(&state, export_lines).await?;
    Ok(geojson_response(collection))
}

fn geojson_response(collection: FeatureCollection) -> Response {
    (
        [(header::CONTENT_TYPE, GEOJSON_CONTENT_TYPE)],
        Json(collection),
    )
        .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        if e.is_client_error() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
