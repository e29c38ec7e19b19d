//! Calamity incident triage HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::calamity::{
    CalamityService, CreateIncidentInput, IncidentFilter, SetStatusInput, UpdateIncidentInput,
};
use crate::AppState;
use shared::Pagination;

/// List incidents with filters and pagination
pub async fn list_incidents(
    State(state): State<AppState>,
    Query(filter): Query<IncidentFilter>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = CalamityService::new(state.db.clone());

    match service.list_incidents(&filter, &pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific incident
pub async fn get_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CalamityService::new(state.db.clone());

    match service.get_incident(incident_id).await {
        Ok(incident) => (StatusCode::OK, Json(incident)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new incident
pub async fn create_incident(
    State(state): State<AppState>,
    Json(input): Json<CreateIncidentInput>,
) -> impl IntoResponse {
    let service = CalamityService::new(state.db.clone());

    match service.create_incident(input).await {
        Ok(incident) => (StatusCode::CREATED, Json(incident)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Edit an incident
pub async fn update_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<Uuid>,
    Json(input): Json<UpdateIncidentInput>,
) -> impl IntoResponse {
    let service = CalamityService::new(state.db.clone());

    match service.update_incident(incident_id, input).await {
        Ok(incident) => (StatusCode::OK, Json(incident)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Apply a triage status transition
pub async fn set_incident_status(
    State(state): State<AppState>,
    Path(incident_id): Path<Uuid>,
    Json(input): Json<SetStatusInput>,
) -> impl IntoResponse {
    let service = CalamityService::new(state.db.clone());

    match service.set_status(incident_id, input).await {
        Ok(incident) => (StatusCode::OK, Json(incident)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an incident
pub async fn delete_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CalamityService::new(state.db.clone());

    match service.delete_incident(incident_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
