//! Service health probe

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: String,
    pub database: &'static str,
    pub version: &'static str,
}

/// Liveness and database readiness. Answers 503 with a degraded payload
/// when PostgreSQL is unreachable so load balancers can pull the instance.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_up = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    let (status_code, status, database) = if database_up {
        (StatusCode::OK, "ok", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
    };

    (
        status_code,
        Json(HealthStatus {
            status,
            environment: state.config.environment.clone(),
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
        .into_response()
}
