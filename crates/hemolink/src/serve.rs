// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hemolink serve` command: the HTTP surface over the engine.
//!
//! Transport only. The external account subsystem authenticates callers
//! and supplies donor_id/hospital_id; nothing here checks credentials.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hemolink_config::HemolinkConfig;
use hemolink_core::{
    BloodGroup, DonorId, DonorResponse, EmergencyRequest, HemolinkError, HospitalId,
    NotificationId,
};
use hemolink_engine::{compatibility, Engine};
use hemolink_storage::SqliteStorage;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine<SqliteStorage>,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Map engine errors onto HTTP statuses. Client-facing variants keep
/// their message; server-side failures get a sanitized body and the
/// detail goes to the log.
fn error_response(err: HemolinkError) -> Response {
    let (status, message) = match &err {
        HemolinkError::InvalidArgument { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        HemolinkError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        HemolinkError::AlreadyResolved { .. } => (StatusCode::CONFLICT, err.to_string()),
        HemolinkError::Storage { .. } | HemolinkError::Config(_) | HemolinkError::Internal(_) => {
            tracing::error!(error = %err, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    };
    (status, Json(ErrorBody { error: message })).into_response()
}

/// Request body for POST /v1/requests.
#[derive(Debug, Deserialize)]
struct RaiseBody {
    hospital_id: i64,
    location: String,
    blood_group: String,
    #[serde(default)]
    message: String,
}

/// Request body for POST /v1/notifications/{id}/respond.
#[derive(Debug, Deserialize)]
struct RespondBody {
    donor_id: i64,
    /// One of "accepted" or "rejected"; anything else is a 400.
    response: String,
}

/// Query parameters for GET /v1/donors.
#[derive(Debug, Deserialize)]
struct DonorSearchParams {
    blood_group: Option<String>,
    location: Option<String>,
}

async fn post_request(State(state): State<AppState>, Json(body): Json<RaiseBody>) -> Response {
    let request = EmergencyRequest {
        hospital_id: HospitalId(body.hospital_id),
        location: body.location,
        blood_group: body.blood_group,
        message: body.message,
    };
    match state.engine.raise_request(&request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn post_respond(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<RespondBody>,
) -> Response {
    let response = match DonorResponse::from_str(&body.response) {
        Ok(r) => r,
        Err(_) => {
            return error_response(HemolinkError::InvalidArgument {
                field: "response",
                reason: format!("`{}` is not one of accepted, rejected", body.response),
            });
        }
    };
    match state
        .engine
        .respond(NotificationId(id), DonorId(body.donor_id), response)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_notifications(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.engine.notifications_for(DonorId(id)).await {
        Ok(feed) => (StatusCode::OK, Json(feed)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_history(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.engine.history_for(DonorId(id)).await {
        Ok(feed) => (StatusCode::OK, Json(feed)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_donors(
    State(state): State<AppState>,
    Query(params): Query<DonorSearchParams>,
) -> Response {
    match state
        .engine
        .find_donors(params.blood_group.as_deref(), params.location.as_deref())
        .await
    {
        Ok(donors) => (StatusCode::OK, Json(donors)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_compatibility(Path(group): Path<String>) -> Response {
    match BloodGroup::from_str(&group) {
        Ok(group) => (StatusCode::OK, Json(compatibility::lookup(group))).into_response(),
        Err(_) => error_response(HemolinkError::InvalidArgument {
            field: "blood_group",
            reason: format!("`{group}` is not a recognized blood group"),
        }),
    }
}

async fn get_health() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

/// Build the full router. Separated from [`run_serve`] so tests can drive
/// it with `tower::ServiceExt::oneshot`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/v1/requests", post(post_request))
        .route("/v1/notifications/{id}/respond", post(post_respond))
        .route("/v1/donors", get(get_donors))
        .route("/v1/donors/{id}/notifications", get(get_notifications))
        .route("/v1/donors/{id}/history", get(get_history))
        .route("/v1/compatibility/{group}", get(get_compatibility))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize the tracing subscriber from the configured log level;
/// `RUST_LOG` still wins when set.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Run the `hemolink serve` command.
pub async fn run_serve(config: HemolinkConfig) -> Result<(), HemolinkError> {
    init_tracing(&config.log.level);

    info!(
        database_path = %config.storage.database_path,
        "starting hemolink serve"
    );

    let storage = Arc::new(SqliteStorage::open(&config.storage.database_path).await?);
    let state = AppState {
        engine: Engine::new(storage),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HemolinkError::Internal(format!("failed to bind to {addr}: {e}")))?;

    info!("hemolink listening on {addr}");

    axum::serve(listener, app(state))
        .await
        .map_err(|e| HemolinkError::Internal(format!("server error: {e}")))?;

    Ok(())
}
