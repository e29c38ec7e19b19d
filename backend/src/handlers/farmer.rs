//! Farmer registry HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::farmer::{
    CreateFarmerInput, FarmerFilter, FarmerService, UpdateFarmerInput,
};
use crate::AppState;
use shared::Pagination;

/// List farmers with filters and pagination
pub async fn list_farmers(
    State(state): State<AppState>,
    Query(filter): Query<FarmerFilter>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = FarmerService::new(state.db.clone());

    match service.list_farmers(&filter, &pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific farmer
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FarmerService::new(state.db.clone());

    match service.get_farmer(farmer_id).await {
        Ok(farmer) => (StatusCode::OK, Json(farmer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Register a farmer
pub async fn create_farmer(
    State(state): State<AppState>,
    Json(input): Json<CreateFarmerInput>,
) -> impl IntoResponse {
    let service = FarmerService::new(state.db.clone());

    match service.create_farmer(input).await {
        Ok(farmer) => (StatusCode::CREATED, Json(farmer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a farmer
pub async fn update_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
    Json(input): Json<UpdateFarmerInput>,
) -> impl IntoResponse {
    let service = FarmerService::new(state.db.clone());

    match service.update_farmer(farmer_id, input).await {
        Ok(farmer) => (StatusCode::OK, Json(farmer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a farmer
pub async fn delete_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FarmerService::new(state.db.clone());

    match service.delete_farmer(farmer_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
