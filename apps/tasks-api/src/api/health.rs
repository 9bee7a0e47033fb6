//! Readiness endpoint

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::json;

use crate::state::AppState;

pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}

/// Pings MongoDB and reports live connection counts
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "mongodb",
        Box::pin(async {
            let status = database::mongodb::check_health_detailed(&state.db).await;
            tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "MongoDB ping failed".to_string()))
            }
        }),
    )];

    let (status, mut body) = run_health_checks(checks).await;
    body["connections"] = json!(state.registry.connection_count());
    body["identities"] = json!(state.registry.identity_count());

    (status, Json(body)).into_response()
}
