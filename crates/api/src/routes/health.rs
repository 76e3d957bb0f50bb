//! Root-level liveness endpoint for load balancers and deploy checks.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the store answers, `degraded` otherwise.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Newest applied migration, so a deploy can confirm the schema moved.
    pub schema_version: Option<i64>,
    pub db_healthy: bool,
}

/// GET /health
///
/// Always answers 200; a store outage shows up as `degraded` in the body.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db_healthy, schema_version) = match troupe_db::schema_version(&state.pool).await {
        Ok(version) => (true, version),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            (false, None)
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: "troupe",
        version: env!("CARGO_PKG_VERSION"),
        schema_version,
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
