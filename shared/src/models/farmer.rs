//! Farmer models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tenure;

/// A registered farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: Uuid,
    pub full_name: String,
    pub contact_number: Option<String>,
    pub barangay: String,
    pub tenure: Option<Tenure>,
    pub registered_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
