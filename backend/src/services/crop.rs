//! Crop record management service
//!
//! CRUD over planted field records, the soft archive lifecycle
//! (archive/restore/permanent delete, singly and in bulk), harvest marking,
//! and the valuation/maturity hooks from the shared crate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::{
    estimate_value_range, project_harvest_date, validate_barangay, validate_hectares,
    validate_volume, CropRecord, CropType, Intercrop, MapCoordinates, PaginatedResponse,
    Pagination, PaginationMeta, ValueEstimate,
};

/// Crop service for managing planted field records
#[derive(Clone)]
pub struct CropService {
    db: PgPool,
    sack_kg: Decimal,
    bunch_kg: Decimal,
}

/// Database row for a crop record
#[derive(Debug, sqlx::FromRow)]
struct CropRow {
    id: Uuid,
    farmer_id: Option<Uuid>,
    barangay: String,
    crop_type_id: i32,
    variety_name: String,
    planted_date: NaiveDate,
    estimated_harvest_date: Option<NaiveDate>,
    estimated_volume: Option<Decimal>,
    volume_unit: Option<String>,
    estimated_hectares: Option<Decimal>,
    harvested: bool,
    harvested_date: Option<NaiveDate>,
    intercrop: Option<serde_json::Value>,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    archived: bool,
    archived_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CropRow> for CropRecord {
    fn from(row: CropRow) -> Self {
        let intercrop: Option<Intercrop> =
            row.intercrop.and_then(|v| serde_json::from_value(v).ok());

        let coordinates = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(MapCoordinates::new(latitude, longitude)),
            _ => None,
        };

        CropRecord {
            id: row.id,
            farmer_id: row.farmer_id,
            barangay: row.barangay,
            crop_type_id: row.crop_type_id,
            variety_name: row.variety_name,
            planted_date: row.planted_date,
            estimated_harvest_date: row.estimated_harvest_date,
            estimated_volume: row.estimated_volume,
            volume_unit: row.volume_unit,
            estimated_hectares: row.estimated_hectares,
            harvested: row.harvested,
            harvested_date: row.harvested_date,
            intercrop,
            coordinates,
            archived: row.archived,
            archived_at: row.archived_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CROP_COLUMNS: &str = "id, farmer_id, barangay, crop_type_id, variety_name, planted_date, \
     estimated_harvest_date, estimated_volume, volume_unit, estimated_hectares, harvested, \
     harvested_date, intercrop, latitude, longitude, archived, archived_at, created_at, updated_at";

/// Filter parameters for crop listings
#[derive(Debug, Default, Deserialize)]
pub struct CropFilter {
    pub barangay: Option<String>,
    pub crop_type_id: Option<i32>,
    pub harvested: Option<bool>,
    /// Defaults to listing active (non-archived) records
    #[serde(default)]
    pub archived: bool,
}

/// Input for creating a crop record
#[derive(Debug, Deserialize)]
pub struct CreateCropInput {
    pub farmer_id: Option<Uuid>,
    pub barangay: String,
    pub crop_type_id: i32,
    pub variety_name: String,
    pub planted_date: NaiveDate,
    pub estimated_harvest_date: Option<NaiveDate>,
    pub estimated_volume: Option<Decimal>,
    pub volume_unit: Option<String>,
    pub estimated_hectares: Option<Decimal>,
    pub intercrop: Option<Intercrop>,
    pub coordinates: Option<MapCoordinates>,
}

/// Input for updating a crop record. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCropInput {
    pub farmer_id: Option<Uuid>,
    pub barangay: Option<String>,
    pub crop_type_id: Option<i32>,
    pub variety_name: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub estimated_harvest_date: Option<NaiveDate>,
    pub estimated_volume: Option<Decimal>,
    pub volume_unit: Option<String>,
    pub estimated_hectares: Option<Decimal>,
    pub intercrop: Option<Intercrop>,
    pub coordinates: Option<MapCoordinates>,
}

/// Input for marking a crop as harvested
#[derive(Debug, Default, Deserialize)]
pub struct MarkHarvestedInput {
    /// Defaults to today when absent
    pub harvested_date: Option<NaiveDate>,
}

/// Ids for bulk archive operations
#[derive(Debug, Deserialize)]
pub struct BulkIdsInput {
    pub ids: Vec<Uuid>,
}

/// Estimated peso value of a crop record's reported volumes
#[derive(Debug, Serialize)]
pub struct CropValuation {
    pub crop_id: Uuid,
    pub primary: Option<ValueEstimate>,
    pub intercrop: Option<ValueEstimate>,
}

impl CropService {
    /// Create a new CropService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            sack_kg: Decimal::from(config.valuation.sack_kg),
            bunch_kg: Decimal::from(config.valuation.bunch_kg),
        }
    }

    /// List crop records with filters and pagination
    pub async fn list_crops(
        &self,
        filter: &CropFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<CropRecord>> {
        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM crop_records
            WHERE archived = $1
              AND ($2::text IS NULL OR barangay = $2)
              AND ($3::int IS NULL OR crop_type_id = $3)
              AND ($4::bool IS NULL OR harvested = $4)
            "#,
        )
        .bind(filter.archived)
        .bind(&filter.barangay)
        .bind(filter.crop_type_id)
        .bind(filter.harvested)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            SELECT {CROP_COLUMNS} FROM crop_records
            WHERE archived = $1
              AND ($2::text IS NULL OR barangay = $2)
              AND ($3::int IS NULL OR crop_type_id = $3)
              AND ($4::bool IS NULL OR harvested = $4)
            ORDER BY planted_date DESC, created_at DESC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(filter.archived)
        .bind(&filter.barangay)
        .bind(filter.crop_type_id)
        .bind(filter.harvested)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(CropRecord::from).collect(),
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }

    /// Get a crop record by ID
    pub async fn get_crop(&self, crop_id: Uuid) -> AppResult<CropRecord> {
        let row = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {CROP_COLUMNS} FROM crop_records WHERE id = $1"
        ))
        .bind(crop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crop record".to_string()))?;

        Ok(row.into())
    }

    /// Create a crop record. When no harvest date is supplied the maturity
    /// projection pre-fills one from the planting date.
    pub async fn create_crop(&self, input: CreateCropInput) -> AppResult<CropRecord> {
        let crop_type = self.validate_crop_input(
            &input.barangay,
            input.crop_type_id,
            &input.variety_name,
            input.estimated_volume,
            input.estimated_hectares,
        )?;

        let estimated_harvest_date = input
            .estimated_harvest_date
            .or_else(|| project_harvest_date(input.crop_type_id, input.planted_date));

        let volume_unit = input
            .volume_unit
            .unwrap_or_else(|| crop_type.default_unit_label().to_string());

        let intercrop_json = input
            .intercrop
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let (latitude, longitude) = match &input.coordinates {
            Some(c) => (Some(c.latitude), Some(c.longitude)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            INSERT INTO crop_records (
                farmer_id, barangay, crop_type_id, variety_name, planted_date,
                estimated_harvest_date, estimated_volume, volume_unit,
                estimated_hectares, intercrop, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {CROP_COLUMNS}
            "#
        ))
        .bind(input.farmer_id)
        .bind(input.barangay.trim())
        .bind(input.crop_type_id)
        .bind(&input.variety_name)
        .bind(input.planted_date)
        .bind(estimated_harvest_date)
        .bind(input.estimated_volume)
        .bind(&volume_unit)
        .bind(input.estimated_hectares)
        .bind(&intercrop_json)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(crop_id = %row.id, crop_type = %crop_type, "Created crop record");

        Ok(row.into())
    }

    /// Update a crop record.
    ///
    /// The maturity projection re-fires only when the planting date or crop
    /// type changes and the update carries no explicit harvest date; a
    /// user-entered harvest date is never overwritten, and an unavailable
    /// projection leaves the previous value untouched.
    pub async fn update_crop(&self, crop_id: Uuid, input: UpdateCropInput) -> AppResult<CropRecord> {
        let current = self.get_crop(crop_id).await?;
        if current.archived {
            return Err(AppError::RecordArchived(
                "Restore the crop record before editing it".to_string(),
            ));
        }

        let barangay = input.barangay.unwrap_or(current.barangay);
        let crop_type_id = input.crop_type_id.unwrap_or(current.crop_type_id);
        let variety_name = input.variety_name.unwrap_or(current.variety_name);
        let planted_date = input.planted_date.unwrap_or(current.planted_date);
        let estimated_volume = input.estimated_volume.or(current.estimated_volume);
        let estimated_hectares = input.estimated_hectares.or(current.estimated_hectares);

        self.validate_crop_input(
            &barangay,
            crop_type_id,
            &variety_name,
            estimated_volume,
            estimated_hectares,
        )?;

        let planting_changed = planted_date != current.planted_date
            || crop_type_id != current.crop_type_id;
        let estimated_harvest_date = match input.estimated_harvest_date {
            Some(date) => Some(date),
            None if planting_changed => project_harvest_date(crop_type_id, planted_date)
                .or(current.estimated_harvest_date),
            None => current.estimated_harvest_date,
        };

        let volume_unit = input.volume_unit.or(current.volume_unit);
        let farmer_id = input.farmer_id.or(current.farmer_id);
        let intercrop = input.intercrop.or(current.intercrop);
        let coordinates = input.coordinates.or(current.coordinates);

        let intercrop_json = intercrop
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let (latitude, longitude) = match &coordinates {
            Some(c) => (Some(c.latitude), Some(c.longitude)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            UPDATE crop_records
            SET farmer_id = $2, barangay = $3, crop_type_id = $4, variety_name = $5,
                planted_date = $6, estimated_harvest_date = $7, estimated_volume = $8,
                volume_unit = $9, estimated_hectares = $10, intercrop = $11,
                latitude = $12, longitude = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING {CROP_COLUMNS}
            "#
        ))
        .bind(crop_id)
        .bind(farmer_id)
        .bind(barangay.trim())
        .bind(crop_type_id)
        .bind(&variety_name)
        .bind(planted_date)
        .bind(estimated_harvest_date)
        .bind(estimated_volume)
        .bind(&volume_unit)
        .bind(estimated_hectares)
        .bind(&intercrop_json)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Mark a crop record as harvested
    pub async fn mark_harvested(
        &self,
        crop_id: Uuid,
        input: MarkHarvestedInput,
    ) -> AppResult<CropRecord> {
        let current = self.get_crop(crop_id).await?;
        if current.archived {
            return Err(AppError::RecordArchived(
                "Restore the crop record before marking it harvested".to_string(),
            ));
        }

        let harvested_date = input
            .harvested_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            UPDATE crop_records
            SET harvested = TRUE, harvested_date = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CROP_COLUMNS}
            "#
        ))
        .bind(crop_id)
        .bind(harvested_date)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Soft-remove a crop record into the archive
    pub async fn archive_crop(&self, crop_id: Uuid) -> AppResult<()> {
        let affected = sqlx::query(
            "UPDATE crop_records SET archived = TRUE, archived_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND archived = FALSE",
        )
        .bind(crop_id)
        .execute(&self.db)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound("Crop record".to_string()));
        }

        tracing::info!(%crop_id, "Archived crop record");
        Ok(())
    }

    /// Restore a crop record from the archive
    pub async fn restore_crop(&self, crop_id: Uuid) -> AppResult<CropRecord> {
        let row = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            UPDATE crop_records
            SET archived = FALSE, archived_at = NULL, updated_at = NOW()
            WHERE id = $1 AND archived = TRUE
            RETURNING {CROP_COLUMNS}
            "#
        ))
        .bind(crop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Archived crop record".to_string()))?;

        Ok(row.into())
    }

    /// Permanently delete an archived crop record. Only archived records can
    /// be purged; active ones must be archived first.
    pub async fn delete_permanent(&self, crop_id: Uuid) -> AppResult<()> {
        let affected =
            sqlx::query("DELETE FROM crop_records WHERE id = $1 AND archived = TRUE")
                .bind(crop_id)
                .execute(&self.db)
                .await?
                .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound("Archived crop record".to_string()));
        }

        tracing::info!(%crop_id, "Permanently deleted crop record");
        Ok(())
    }

    /// Archive several crop records at once. Returns the number archived.
    pub async fn bulk_archive(&self, ids: &[Uuid]) -> AppResult<u64> {
        let affected = sqlx::query(
            "UPDATE crop_records SET archived = TRUE, archived_at = NOW(), updated_at = NOW() \
             WHERE id = ANY($1) AND archived = FALSE",
        )
        .bind(ids)
        .execute(&self.db)
        .await?
        .rows_affected();

        tracing::info!(count = affected, "Bulk archived crop records");
        Ok(affected)
    }

    /// Restore several crop records from the archive
    pub async fn bulk_restore(&self, ids: &[Uuid]) -> AppResult<u64> {
        let affected = sqlx::query(
            "UPDATE crop_records SET archived = FALSE, archived_at = NULL, updated_at = NOW() \
             WHERE id = ANY($1) AND archived = TRUE",
        )
        .bind(ids)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(affected)
    }

    /// Permanently delete several archived crop records
    pub async fn bulk_delete_permanent(&self, ids: &[Uuid]) -> AppResult<u64> {
        let affected =
            sqlx::query("DELETE FROM crop_records WHERE id = ANY($1) AND archived = TRUE")
                .bind(ids)
                .execute(&self.db)
                .await?
                .rows_affected();

        tracing::info!(count = affected, "Bulk permanently deleted crop records");
        Ok(affected)
    }

    /// Estimate the peso value of a crop record's reported volumes.
    ///
    /// A missing estimate (unknown crop type, no volume, non-positive
    /// volume) is a normal displayable state, not an error.
    pub async fn get_valuation(&self, crop_id: Uuid) -> AppResult<CropValuation> {
        let crop = self.get_crop(crop_id).await?;
        Ok(self.valuation_for(&crop))
    }

    /// Pure valuation step, reused by the damage report
    pub fn valuation_for(&self, crop: &CropRecord) -> CropValuation {
        let primary = crop.estimated_volume.and_then(|volume| {
            let unit = crop.volume_unit.as_deref().unwrap_or("kg");
            estimate_value_range(
                crop.crop_type_id,
                &crop.variety_name,
                "",
                volume,
                unit,
                Some(self.sack_kg),
                Some(self.bunch_kg),
            )
        });

        let intercrop = crop.intercrop.as_ref().and_then(|ic| {
            let volume = ic.estimated_volume?;
            let unit = CropType::from_id(ic.crop_type_id)
                .map(|c| c.default_unit_label())
                .unwrap_or("kg");
            estimate_value_range(
                ic.crop_type_id,
                &ic.variety_name,
                "",
                volume,
                unit,
                Some(self.sack_kg),
                Some(self.bunch_kg),
            )
        });

        CropValuation {
            crop_id: crop.id,
            primary,
            intercrop,
        }
    }

    /// Validate fields common to create and update
    fn validate_crop_input(
        &self,
        barangay: &str,
        crop_type_id: i32,
        variety_name: &str,
        estimated_volume: Option<Decimal>,
        estimated_hectares: Option<Decimal>,
    ) -> AppResult<CropType> {
        validate_barangay(barangay).map_err(|msg| AppError::Validation {
            field: "barangay".to_string(),
            message: msg.to_string(),
        })?;

        let crop_type = CropType::from_id(crop_type_id).ok_or_else(|| AppError::Validation {
            field: "crop_type_id".to_string(),
            message: format!("Unknown crop type identifier: {}", crop_type_id),
        })?;

        if variety_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "variety_name".to_string(),
                message: "Variety name is required".to_string(),
            });
        }

        if let Some(volume) = estimated_volume {
            validate_volume(volume).map_err(|msg| AppError::Validation {
                field: "estimated_volume".to_string(),
                message: msg.to_string(),
            })?;
        }

        if let Some(hectares) = estimated_hectares {
            validate_hectares(hectares).map_err(|msg| AppError::Validation {
                field: "estimated_hectares".to_string(),
                message: msg.to_string(),
            })?;
        }

        Ok(crop_type)
    }
}
