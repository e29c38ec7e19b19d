//! Reporting and export HTTP handlers

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::services::reporting::{ReportFilter, ReportingService};
use crate::AppState;

/// Barangay damage report with estimated value at risk
pub async fn get_damage_report(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> impl IntoResponse {
    let service = ReportingService::new(state.db.clone(), &state.config);

    match service.get_damage_report(&filter).await {
        Ok(report) => (
            StatusCode::OK,
            Json(serde_json::json!({ "barangays": report })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Download active crop records as CSV
pub async fn export_crops_csv(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> impl IntoResponse {
    let service = ReportingService::new(state.db.clone(), &state.config);

    let rows = match service.get_crop_export_rows(&filter).await {
        Ok(rows) => rows,
        Err(e) => return e.into_response(),
    };

    match ReportingService::export_to_csv(&rows) {
        Ok(csv_data) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"crop_records.csv\"",
                ),
            ],
            csv_data,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
