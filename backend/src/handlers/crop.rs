//! Crop record management HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::{require_super_admin, CurrentUser};
use crate::services::crop::{
    BulkIdsInput, CreateCropInput, CropFilter, CropService, MarkHarvestedInput, UpdateCropInput,
};
use crate::AppState;
use shared::Pagination;

/// List crop records with filters and pagination
pub async fn list_crops(
    State(state): State<AppState>,
    Query(filter): Query<CropFilter>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.list_crops(&filter, &pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific crop record
pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.get_crop(crop_id).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a crop record
pub async fn create_crop(
    State(state): State<AppState>,
    Json(input): Json<CreateCropInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.create_crop(input).await {
        Ok(crop) => (StatusCode::CREATED, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a crop record
pub async fn update_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
    Json(input): Json<UpdateCropInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.update_crop(crop_id, input).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Mark a crop record as harvested
pub async fn mark_harvested(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
    Json(input): Json<MarkHarvestedInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.mark_harvested(crop_id, input).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Soft-remove a crop record into the archive
pub async fn archive_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.archive_crop(crop_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Restore a crop record from the archive
pub async fn restore_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.restore_crop(crop_id).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Permanently delete an archived crop record (super admin only)
pub async fn delete_crop_permanent(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = require_super_admin(&user) {
        return e.into_response();
    }

    let service = CropService::new(state.db.clone(), &state.config);

    match service.delete_permanent(crop_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Archive several crop records at once
pub async fn bulk_archive_crops(
    State(state): State<AppState>,
    Json(input): Json<BulkIdsInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.bulk_archive(&input.ids).await {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "archived": count })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Restore several crop records from the archive
pub async fn bulk_restore_crops(
    State(state): State<AppState>,
    Json(input): Json<BulkIdsInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.bulk_restore(&input.ids).await {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "restored": count })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Permanently delete several archived crop records (super admin only)
pub async fn bulk_delete_crops_permanent(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<BulkIdsInput>,
) -> impl IntoResponse {
    if let Err(e) = require_super_admin(&user) {
        return e.into_response();
    }

    let service = CropService::new(state.db.clone(), &state.config);

    match service.bulk_delete_permanent(&input.ids).await {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": count })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Estimated peso value of a crop record's reported volumes
pub async fn get_crop_valuation(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.db.clone(), &state.config);

    match service.get_valuation(crop_id).await {
        Ok(valuation) => (StatusCode::OK, Json(valuation)).into_response(),
        Err(e) => e.into_response(),
    }
}
