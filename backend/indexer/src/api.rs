//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::{EventKind, EventRecord};
use crate::summary::{summarize, ProjectSummary};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_events))
        .route("/project/summary", get(get_project_summary))
        .route("/contributors/:address/events", get(get_contributor_events))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Optional `event_type` filter, e.g. `project_funded`.
    pub kind: Option<String>,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct ContributorEventsResponse {
    pub contributor: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler failure rendered as a JSON error body.
pub struct ApiError(IndexerError);

impl From<IndexerError> for ApiError {
    fn from(err: IndexerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            IndexerError::UnknownKind(_) => StatusCode::BAD_REQUEST,
            _ => {
                error!("API request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events[?kind=<event_type>]`
///
/// Returns indexed events, optionally restricted to one kind.
pub async fn get_events(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    let events = match query.kind.as_deref() {
        Some(kind) => db::get_events_by_kind(&state.pool, kind.parse::<EventKind>()?).await?,
        None => db::get_all_events(&state.pool).await?,
    };
    Ok(Json(EventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /project/summary`
///
/// Funds, contribution count and current state, replayed from the indexed
/// events.
pub async fn get_project_summary(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ProjectSummary>, ApiError> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(summarize(&events)))
}

/// `GET /contributors/:address/events`
///
/// Returns every contribution made by the given address.
pub async fn get_contributor_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Result<Json<ContributorEventsResponse>, ApiError> {
    let events = db::get_contributions_by(&state.pool, &address).await?;
    Ok(Json(ContributorEventsResponse {
        contributor: address,
        count: events.len(),
        events,
    }))
}
