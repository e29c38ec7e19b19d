//! Lookup table HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::lookup::LookupService;
use crate::AppState;

/// List the fixed crop types
pub async fn list_crop_types(State(state): State<AppState>) -> impl IntoResponse {
    let service = LookupService::new(state.db.clone());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "crop_types": service.crop_types() })),
    )
        .into_response()
}

/// List registered varieties for a crop type
pub async fn list_varieties(
    State(state): State<AppState>,
    Path(crop_type_id): Path<i32>,
) -> impl IntoResponse {
    let service = LookupService::new(state.db.clone());

    match service.varieties(crop_type_id).await {
        Ok(varieties) => (
            StatusCode::OK,
            Json(serde_json::json!({ "varieties": varieties })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List rice ecosystems
pub async fn list_ecosystems(State(state): State<AppState>) -> impl IntoResponse {
    let service = LookupService::new(state.db.clone());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "ecosystems": service.ecosystems() })),
    )
        .into_response()
}

/// List land tenures
pub async fn list_tenures(State(state): State<AppState>) -> impl IntoResponse {
    let service = LookupService::new(state.db.clone());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "tenures": service.tenures() })),
    )
        .into_response()
}
