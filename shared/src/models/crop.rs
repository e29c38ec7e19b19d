//! Crop record models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::MapCoordinates;

/// A planted field instance tracked by the agriculture office
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRecord {
    pub id: Uuid,
    pub farmer_id: Option<Uuid>,
    pub barangay: String,
    pub crop_type_id: i32,
    pub variety_name: String,
    pub planted_date: NaiveDate,
    pub estimated_harvest_date: Option<NaiveDate>,
    /// Reported volume in the crop's conventional unit
    pub estimated_volume: Option<Decimal>,
    pub volume_unit: Option<String>,
    pub estimated_hectares: Option<Decimal>,
    pub harvested: bool,
    pub harvested_date: Option<NaiveDate>,
    pub intercrop: Option<Intercrop>,
    pub coordinates: Option<MapCoordinates>,
    pub archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Secondary crop planted alongside the primary crop in the same field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intercrop {
    pub crop_type_id: i32,
    pub variety_name: String,
    pub estimated_volume: Option<Decimal>,
}
