//! Calamity incident management service
//!
//! Admin triage over citizen-reported damage events: listing with filters,
//! edits, guarded status transitions, and deletion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    validate_barangay, validate_severity_score, CalamityIncident, CropStage, IncidentStatus,
    IncidentType, MediaReference, PaginatedResponse, Pagination, PaginationMeta, Severity,
};

/// Calamity service for incident triage
#[derive(Clone)]
pub struct CalamityService {
    db: PgPool,
}

/// Database row for a calamity incident
#[derive(Debug, sqlx::FromRow)]
struct IncidentRow {
    id: Uuid,
    incident_type: String,
    severity: String,
    severity_score: Option<i32>,
    status: String,
    barangay: String,
    affected_area_ha: Option<Decimal>,
    crop_stage: Option<String>,
    crop_type_id: Option<i32>,
    variety_name: Option<String>,
    ecosystem: Option<String>,
    description: Option<String>,
    photos: Option<serde_json::Value>,
    farmer_contact: Option<String>,
    reported_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<IncidentRow> for CalamityIncident {
    fn from(row: IncidentRow) -> Self {
        let photos: Vec<MediaReference> = row
            .photos
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        CalamityIncident {
            id: row.id,
            incident_type: IncidentType::from_str(&row.incident_type)
                .unwrap_or(IncidentType::Other),
            severity: Severity::from_str(&row.severity).unwrap_or(Severity::Low),
            severity_score: row.severity_score,
            status: IncidentStatus::from_str(&row.status).unwrap_or(IncidentStatus::Pending),
            barangay: row.barangay,
            affected_area_ha: row.affected_area_ha,
            crop_stage: row.crop_stage.as_deref().and_then(CropStage::from_str),
            crop_type_id: row.crop_type_id,
            variety_name: row.variety_name,
            ecosystem: row.ecosystem,
            description: row.description,
            photos,
            farmer_contact: row.farmer_contact,
            reported_at: row.reported_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const INCIDENT_COLUMNS: &str = "id, incident_type, severity, severity_score, status, barangay, \
     affected_area_ha, crop_stage, crop_type_id, variety_name, ecosystem, description, photos, \
     farmer_contact, reported_at, created_at, updated_at";

/// Filter parameters for incident listings
#[derive(Debug, Default, Deserialize)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
    pub barangay: Option<String>,
    pub incident_type: Option<IncidentType>,
}

/// Input for recording an incident
#[derive(Debug, Deserialize)]
pub struct CreateIncidentInput {
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub severity_score: Option<i32>,
    pub barangay: String,
    pub affected_area_ha: Option<Decimal>,
    pub crop_stage: Option<CropStage>,
    pub crop_type_id: Option<i32>,
    pub variety_name: Option<String>,
    pub ecosystem: Option<String>,
    pub description: Option<String>,
    pub photos: Option<Vec<MediaReference>>,
    pub farmer_contact: Option<String>,
    pub reported_at: Option<DateTime<Utc>>,
}

/// Input for editing an incident. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateIncidentInput {
    pub incident_type: Option<IncidentType>,
    pub severity: Option<Severity>,
    pub severity_score: Option<i32>,
    pub barangay: Option<String>,
    pub affected_area_ha: Option<Decimal>,
    pub crop_stage: Option<CropStage>,
    pub crop_type_id: Option<i32>,
    pub variety_name: Option<String>,
    pub ecosystem: Option<String>,
    pub description: Option<String>,
    pub photos: Option<Vec<MediaReference>>,
    pub farmer_contact: Option<String>,
}

/// Input for a triage status change
#[derive(Debug, Deserialize)]
pub struct SetStatusInput {
    pub status: IncidentStatus,
}

impl CalamityService {
    /// Create a new CalamityService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List incidents with filters and pagination, newest first
    pub async fn list_incidents(
        &self,
        filter: &IncidentFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<CalamityIncident>> {
        let status = filter.status.map(|s| s.as_str());
        let incident_type = filter.incident_type.map(|t| t.as_str());

        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM calamity_incidents
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR barangay = $2)
              AND ($3::text IS NULL OR incident_type = $3)
            "#,
        )
        .bind(status)
        .bind(&filter.barangay)
        .bind(incident_type)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, IncidentRow>(&format!(
            r#"
            SELECT {INCIDENT_COLUMNS} FROM calamity_incidents
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR barangay = $2)
              AND ($3::text IS NULL OR incident_type = $3)
            ORDER BY reported_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(status)
        .bind(&filter.barangay)
        .bind(incident_type)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(CalamityIncident::from).collect(),
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }

    /// Get an incident by ID
    pub async fn get_incident(&self, incident_id: Uuid) -> AppResult<CalamityIncident> {
        let row = sqlx::query_as::<_, IncidentRow>(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM calamity_incidents WHERE id = $1"
        ))
        .bind(incident_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Calamity incident".to_string()))?;

        Ok(row.into())
    }

    /// Record a new incident (enters triage as Pending)
    pub async fn create_incident(
        &self,
        input: CreateIncidentInput,
    ) -> AppResult<CalamityIncident> {
        self.validate_incident_input(&input.barangay, input.severity_score)?;

        let photos_json = serde_json::to_value(input.photos.unwrap_or_default())
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let reported_at = input.reported_at.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, IncidentRow>(&format!(
            r#"
            INSERT INTO calamity_incidents (
                incident_type, severity, severity_score, status, barangay,
                affected_area_ha, crop_stage, crop_type_id, variety_name,
                ecosystem, description, photos, farmer_contact, reported_at
            )
            VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {INCIDENT_COLUMNS}
            "#
        ))
        .bind(input.incident_type.as_str())
        .bind(input.severity.as_str())
        .bind(input.severity_score)
        .bind(input.barangay.trim())
        .bind(input.affected_area_ha)
        .bind(input.crop_stage.map(|s| s.as_str()))
        .bind(input.crop_type_id)
        .bind(&input.variety_name)
        .bind(&input.ecosystem)
        .bind(&input.description)
        .bind(&photos_json)
        .bind(&input.farmer_contact)
        .bind(reported_at)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(incident_id = %row.id, barangay = %row.barangay, "Recorded calamity incident");

        Ok(row.into())
    }

    /// Edit incident fields. Status changes go through `set_status`.
    pub async fn update_incident(
        &self,
        incident_id: Uuid,
        input: UpdateIncidentInput,
    ) -> AppResult<CalamityIncident> {
        let current = self.get_incident(incident_id).await?;

        let barangay = input.barangay.unwrap_or(current.barangay);
        let severity_score = input.severity_score.or(current.severity_score);
        self.validate_incident_input(&barangay, severity_score)?;

        let incident_type = input.incident_type.unwrap_or(current.incident_type);
        let severity = input.severity.unwrap_or(current.severity);
        let affected_area_ha = input.affected_area_ha.or(current.affected_area_ha);
        let crop_stage = input.crop_stage.or(current.crop_stage);
        let crop_type_id = input.crop_type_id.or(current.crop_type_id);
        let variety_name = input.variety_name.or(current.variety_name);
        let ecosystem = input.ecosystem.or(current.ecosystem);
        let description = input.description.or(current.description);
        let farmer_contact = input.farmer_contact.or(current.farmer_contact);
        let photos = input.photos.unwrap_or(current.photos);

        let photos_json =
            serde_json::to_value(photos).map_err(|e| AppError::Internal(e.to_string()))?;

        let row = sqlx::query_as::<_, IncidentRow>(&format!(
            r#"
            UPDATE calamity_incidents
            SET incident_type = $2, severity = $3, severity_score = $4, barangay = $5,
                affected_area_ha = $6, crop_stage = $7, crop_type_id = $8, variety_name = $9,
                ecosystem = $10, description = $11, photos = $12, farmer_contact = $13,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {INCIDENT_COLUMNS}
            "#
        ))
        .bind(incident_id)
        .bind(incident_type.as_str())
        .bind(severity.as_str())
        .bind(severity_score)
        .bind(barangay.trim())
        .bind(affected_area_ha)
        .bind(crop_stage.map(|s| s.as_str()))
        .bind(crop_type_id)
        .bind(&variety_name)
        .bind(&ecosystem)
        .bind(&description)
        .bind(&photos_json)
        .bind(&farmer_contact)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Apply a guarded triage status transition
    pub async fn set_status(
        &self,
        incident_id: Uuid,
        input: SetStatusInput,
    ) -> AppResult<CalamityIncident> {
        let current = self.get_incident(incident_id).await?;

        if !current.status.can_transition_to(input.status) {
            return Err(AppError::InvalidStatusTransition(format!(
                "Cannot move incident from {} to {}",
                current.status.as_str(),
                input.status.as_str()
            )));
        }

        let row = sqlx::query_as::<_, IncidentRow>(&format!(
            r#"
            UPDATE calamity_incidents
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {INCIDENT_COLUMNS}
            "#
        ))
        .bind(incident_id)
        .bind(input.status.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            %incident_id,
            from = current.status.as_str(),
            to = input.status.as_str(),
            "Incident status changed"
        );

        Ok(row.into())
    }

    /// Delete an incident
    pub async fn delete_incident(&self, incident_id: Uuid) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM calamity_incidents WHERE id = $1")
            .bind(incident_id)
            .execute(&self.db)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound("Calamity incident".to_string()));
        }

        Ok(())
    }

    fn validate_incident_input(
        &self,
        barangay: &str,
        severity_score: Option<i32>,
    ) -> AppResult<()> {
        validate_barangay(barangay).map_err(|msg| AppError::Validation {
            field: "barangay".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(score) = severity_score {
            validate_severity_score(score).map_err(|msg| AppError::Validation {
                field: "severity_score".to_string(),
                message: msg.to_string(),
            })?;
        }

        Ok(())
    }
}
