//! Calamity incident models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::MediaReference;

/// A reported damage event awaiting or undergoing triage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalamityIncident {
    pub id: Uuid,
    pub incident_type: IncidentType,
    pub severity: Severity,
    /// Optional numeric severity score (1-10) alongside the tier
    pub severity_score: Option<i32>,
    pub status: IncidentStatus,
    pub barangay: String,
    /// Affected area in hectares
    pub affected_area_ha: Option<Decimal>,
    pub crop_stage: Option<CropStage>,
    pub crop_type_id: Option<i32>,
    pub variety_name: Option<String>,
    pub ecosystem: Option<String>,
    pub description: Option<String>,
    pub photos: Vec<MediaReference>,
    pub farmer_contact: Option<String>,
    pub reported_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind of calamity reported
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Typhoon,
    Flood,
    Drought,
    PestInfestation,
    Disease,
    Other,
}

impl IncidentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentType::Typhoon => "typhoon",
            IncidentType::Flood => "flood",
            IncidentType::Drought => "drought",
            IncidentType::PestInfestation => "pest_infestation",
            IncidentType::Disease => "disease",
            IncidentType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "typhoon" => Some(IncidentType::Typhoon),
            "flood" => Some(IncidentType::Flood),
            "drought" => Some(IncidentType::Drought),
            "pest_infestation" => Some(IncidentType::PestInfestation),
            "disease" => Some(IncidentType::Disease),
            "other" => Some(IncidentType::Other),
            _ => None,
        }
    }
}

/// Textual severity tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Severity::Low),
            "moderate" => Some(Severity::Moderate),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

/// Triage status of an incident report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Pending,
    Verified,
    Resolved,
    Rejected,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Pending => "pending",
            IncidentStatus::Verified => "verified",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(IncidentStatus::Pending),
            "verified" => Some(IncidentStatus::Verified),
            "resolved" => Some(IncidentStatus::Resolved),
            "rejected" => Some(IncidentStatus::Rejected),
            _ => None,
        }
    }

    /// Whether a triage transition from self to `next` is allowed.
    ///
    /// Pending reports are verified or rejected; verified reports are
    /// resolved or rejected. Resolved and rejected are terminal.
    pub fn can_transition_to(&self, next: IncidentStatus) -> bool {
        matches!(
            (self, next),
            (IncidentStatus::Pending, IncidentStatus::Verified)
                | (IncidentStatus::Pending, IncidentStatus::Rejected)
                | (IncidentStatus::Verified, IncidentStatus::Resolved)
                | (IncidentStatus::Verified, IncidentStatus::Rejected)
        )
    }
}

/// Growth stage of the crop at the time of the incident
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropStage {
    Seedling,
    Vegetative,
    Reproductive,
    Maturing,
    ReadyForHarvest,
}

impl CropStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropStage::Seedling => "seedling",
            CropStage::Vegetative => "vegetative",
            CropStage::Reproductive => "reproductive",
            CropStage::Maturing => "maturing",
            CropStage::ReadyForHarvest => "ready_for_harvest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "seedling" => Some(CropStage::Seedling),
            "vegetative" => Some(CropStage::Vegetative),
            "reproductive" => Some(CropStage::Reproductive),
            "maturing" => Some(CropStage::Maturing),
            "ready_for_harvest" => Some(CropStage::ReadyForHarvest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_be_verified_or_rejected() {
        assert!(IncidentStatus::Pending.can_transition_to(IncidentStatus::Verified));
        assert!(IncidentStatus::Pending.can_transition_to(IncidentStatus::Rejected));
        assert!(!IncidentStatus::Pending.can_transition_to(IncidentStatus::Resolved));
    }

    #[test]
    fn test_verified_can_be_resolved_or_rejected() {
        assert!(IncidentStatus::Verified.can_transition_to(IncidentStatus::Resolved));
        assert!(IncidentStatus::Verified.can_transition_to(IncidentStatus::Rejected));
        assert!(!IncidentStatus::Verified.can_transition_to(IncidentStatus::Pending));
    }

    #[test]
    fn test_terminal_states_have_no_transitions() {
        for next in [
            IncidentStatus::Pending,
            IncidentStatus::Verified,
            IncidentStatus::Resolved,
            IncidentStatus::Rejected,
        ] {
            assert!(!IncidentStatus::Resolved.can_transition_to(next));
            assert!(!IncidentStatus::Rejected.can_transition_to(next));
        }
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            IncidentStatus::Pending,
            IncidentStatus::Verified,
            IncidentStatus::Resolved,
            IncidentStatus::Rejected,
        ] {
            assert_eq!(IncidentStatus::from_str(status.as_str()), Some(status));
        }
    }
}
