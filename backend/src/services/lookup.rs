//! Lookup table service
//!
//! Serves the reference lists the edit forms bind to: crop types with their
//! conventional units and maturity durations, varieties per crop type, rice
//! ecosystems, and land tenures. Crop types, ecosystems, and tenures are
//! fixed enumerations; varieties are maintained in the database.

use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use shared::{maturity_days, CropType, Ecosystem, Tenure};

/// Lookup service
#[derive(Clone)]
pub struct LookupService {
    db: PgPool,
}

/// A crop type entry with its derived attributes
#[derive(Debug, Serialize)]
pub struct CropTypeEntry {
    pub id: i32,
    pub name: &'static str,
    pub default_unit: &'static str,
    pub maturity_days: i64,
}

/// A variety entry
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct VarietyEntry {
    pub id: i32,
    pub crop_type_id: i32,
    pub name: String,
}

/// An ecosystem or tenure entry
#[derive(Debug, Serialize)]
pub struct NamedEntry {
    pub value: &'static str,
}

impl LookupService {
    /// Create a new LookupService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the fixed crop types
    pub fn crop_types(&self) -> Vec<CropTypeEntry> {
        CropType::all()
            .into_iter()
            .map(|crop| CropTypeEntry {
                id: crop.id(),
                name: crop.name(),
                default_unit: crop.default_unit_label(),
                maturity_days: maturity_days(crop),
            })
            .collect()
    }

    /// List registered varieties for a crop type
    pub async fn varieties(&self, crop_type_id: i32) -> AppResult<Vec<VarietyEntry>> {
        if CropType::from_id(crop_type_id).is_none() {
            return Err(AppError::NotFound("Crop type".to_string()));
        }

        let varieties = sqlx::query_as::<_, VarietyEntry>(
            "SELECT id, crop_type_id, name FROM varieties WHERE crop_type_id = $1 ORDER BY name",
        )
        .bind(crop_type_id)
        .fetch_all(&self.db)
        .await?;

        Ok(varieties)
    }

    /// List rice ecosystems
    pub fn ecosystems(&self) -> Vec<NamedEntry> {
        [
            Ecosystem::Irrigated,
            Ecosystem::RainfedLowland,
            Ecosystem::Upland,
        ]
        .into_iter()
        .map(|e| NamedEntry { value: e.as_str() })
        .collect()
    }

    /// List land tenures
    pub fn tenures(&self) -> Vec<NamedEntry> {
        Tenure::all()
            .into_iter()
            .map(|t| NamedEntry { value: t.as_str() })
            .collect()
    }
}
