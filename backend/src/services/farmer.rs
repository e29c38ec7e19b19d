//! Farmer registry service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    validate_barangay, validate_ph_mobile, Farmer, PaginatedResponse, Pagination, PaginationMeta,
    Tenure,
};

/// Farmer service for managing the registry
#[derive(Clone)]
pub struct FarmerService {
    db: PgPool,
}

/// Database row for a farmer
#[derive(Debug, sqlx::FromRow)]
struct FarmerRow {
    id: Uuid,
    full_name: String,
    contact_number: Option<String>,
    barangay: String,
    tenure: Option<String>,
    registered_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FarmerRow> for Farmer {
    fn from(row: FarmerRow) -> Self {
        Farmer {
            id: row.id,
            full_name: row.full_name,
            contact_number: row.contact_number,
            barangay: row.barangay,
            tenure: row.tenure.as_deref().and_then(Tenure::from_str),
            registered_date: row.registered_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Filter parameters for farmer listings
#[derive(Debug, Default, Deserialize)]
pub struct FarmerFilter {
    pub barangay: Option<String>,
    pub tenure: Option<Tenure>,
}

/// Input for registering a farmer
#[derive(Debug, Deserialize)]
pub struct CreateFarmerInput {
    pub full_name: String,
    pub contact_number: Option<String>,
    pub barangay: String,
    pub tenure: Option<Tenure>,
    pub registered_date: Option<NaiveDate>,
}

/// Input for updating a farmer. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFarmerInput {
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub barangay: Option<String>,
    pub tenure: Option<Tenure>,
}

impl FarmerService {
    /// Create a new FarmerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List farmers with filters and pagination
    pub async fn list_farmers(
        &self,
        filter: &FarmerFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<Farmer>> {
        let tenure = filter.tenure.map(|t| t.as_str());

        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM farmers
            WHERE ($1::text IS NULL OR barangay = $1)
              AND ($2::text IS NULL OR tenure = $2)
            "#,
        )
        .bind(&filter.barangay)
        .bind(tenure)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, full_name, contact_number, barangay, tenure, registered_date,
                   created_at, updated_at
            FROM farmers
            WHERE ($1::text IS NULL OR barangay = $1)
              AND ($2::text IS NULL OR tenure = $2)
            ORDER BY full_name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&filter.barangay)
        .bind(tenure)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(Farmer::from).collect(),
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }

    /// Get a farmer by ID
    pub async fn get_farmer(&self, farmer_id: Uuid) -> AppResult<Farmer> {
        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, full_name, contact_number, barangay, tenure, registered_date,
                   created_at, updated_at
            FROM farmers WHERE id = $1
            "#,
        )
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        Ok(row.into())
    }

    /// Register a farmer
    pub async fn create_farmer(&self, input: CreateFarmerInput) -> AppResult<Farmer> {
        self.validate_farmer_input(
            Some(&input.full_name),
            &input.barangay,
            input.contact_number.as_deref(),
        )?;

        let registered_date = input
            .registered_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            INSERT INTO farmers (full_name, contact_number, barangay, tenure, registered_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, contact_number, barangay, tenure, registered_date,
                      created_at, updated_at
            "#,
        )
        .bind(input.full_name.trim())
        .bind(&input.contact_number)
        .bind(input.barangay.trim())
        .bind(input.tenure.map(|t| t.as_str()))
        .bind(registered_date)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a farmer
    pub async fn update_farmer(
        &self,
        farmer_id: Uuid,
        input: UpdateFarmerInput,
    ) -> AppResult<Farmer> {
        let current = self.get_farmer(farmer_id).await?;

        let full_name = input.full_name.unwrap_or(current.full_name);
        let barangay = input.barangay.unwrap_or(current.barangay);
        let contact_number = input.contact_number.or(current.contact_number);
        let tenure = input.tenure.or(current.tenure);

        self.validate_farmer_input(Some(&full_name), &barangay, contact_number.as_deref())?;

        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            UPDATE farmers
            SET full_name = $2, contact_number = $3, barangay = $4, tenure = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, contact_number, barangay, tenure, registered_date,
                      created_at, updated_at
            "#,
        )
        .bind(farmer_id)
        .bind(full_name.trim())
        .bind(&contact_number)
        .bind(barangay.trim())
        .bind(tenure.map(|t| t.as_str()))
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a farmer. Linked crop records keep their data but lose the
    /// farmer reference (ON DELETE SET NULL).
    pub async fn delete_farmer(&self, farmer_id: Uuid) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM farmers WHERE id = $1")
            .bind(farmer_id)
            .execute(&self.db)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound("Farmer".to_string()));
        }

        Ok(())
    }

    fn validate_farmer_input(
        &self,
        full_name: Option<&str>,
        barangay: &str,
        contact_number: Option<&str>,
    ) -> AppResult<()> {
        if let Some(name) = full_name {
            if name.trim().is_empty() {
                return Err(AppError::Validation {
                    field: "full_name".to_string(),
                    message: "Full name is required".to_string(),
                });
            }
        }

        validate_barangay(barangay).map_err(|msg| AppError::Validation {
            field: "barangay".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(number) = contact_number {
            validate_ph_mobile(number).map_err(|msg| AppError::Validation {
                field: "contact_number".to_string(),
                message: msg.to_string(),
            })?;
        }

        Ok(())
    }
}
