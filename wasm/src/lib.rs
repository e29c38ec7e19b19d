//! WebAssembly module for the AgriGIS Farm Management Platform
//!
//! Provides client-side computation for:
//! - Yield value estimation (volume to kilograms, farmgate price ranges)
//! - Maturity projection
//! - Offline form validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{estimate_value_range, maturity_days, project_harvest_date, CropType};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::try_from(value).ok()
}

/// Estimate the peso value range of a reported harvest volume.
///
/// Returns a JSON string with total kilograms, price bounds, and value
/// bounds, or an empty string when no estimate is available (unknown crop
/// type, non-positive volume). `sack_kg`/`bunch_kg` override the per-unit
/// weights; pass 0 or a negative number to use the defaults.
#[wasm_bindgen]
pub fn estimate_crop_value(
    crop_type_id: i32,
    variety_name: &str,
    sub_category: &str,
    volume: f64,
    unit: &str,
    sack_kg: f64,
    bunch_kg: f64,
) -> String {
    let Some(volume) = to_decimal(volume) else {
        return String::new();
    };

    estimate_value_range(
        crop_type_id,
        variety_name,
        sub_category,
        volume,
        unit,
        to_decimal(sack_kg),
        to_decimal(bunch_kg),
    )
    .and_then(|estimate| serde_json::to_string(&estimate).ok())
    .unwrap_or_default()
}

/// Project the harvest date for a crop planted on the given ISO date
/// (YYYY-MM-DD). Returns an empty string when unavailable.
#[wasm_bindgen]
pub fn project_harvest(crop_type_id: i32, planted_date: &str) -> String {
    let Ok(planted) = NaiveDate::parse_from_str(planted_date, "%Y-%m-%d") else {
        return String::new();
    };

    project_harvest_date(crop_type_id, planted)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Days to maturity for a crop type, or 0 when unknown
#[wasm_bindgen]
pub fn crop_maturity_days(crop_type_id: i32) -> i64 {
    CropType::from_id(crop_type_id)
        .map(maturity_days)
        .unwrap_or(0)
}

/// Validate a Philippine mobile number for offline form checks
#[wasm_bindgen]
pub fn is_valid_ph_mobile(number: &str) -> bool {
    validate_ph_mobile(number).is_ok()
}

/// Validate a reported volume for offline form checks
#[wasm_bindgen]
pub fn is_valid_volume(volume: f64) -> bool {
    to_decimal(volume).is_some_and(|v| validate_volume(v).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_crop_value_returns_json() {
        let json = estimate_crop_value(3, "Saba", "", 2.0, "bunches", 0.0, 0.0);
        assert!(json.contains("\"total_kilograms\":\"30\""));
        assert!(json.contains("\"source_label\":\"Banana Saba\""));
    }

    #[test]
    fn test_estimate_crop_value_unavailable_is_empty() {
        assert!(estimate_crop_value(99, "x", "", 10.0, "kg", 0.0, 0.0).is_empty());
        assert!(estimate_crop_value(1, "x", "", 0.0, "kg", 0.0, 0.0).is_empty());
        assert!(estimate_crop_value(1, "x", "", f64::NAN, "kg", 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_project_harvest() {
        assert_eq!(project_harvest(1, "2024-01-01"), "2024-04-10");
        assert_eq!(project_harvest(99, "2024-01-01"), "");
        assert_eq!(project_harvest(1, "not-a-date"), "");
    }

    #[test]
    fn test_crop_maturity_days() {
        assert_eq!(crop_maturity_days(6), 60);
        assert_eq!(crop_maturity_days(0), 0);
    }

    #[test]
    fn test_offline_validation() {
        assert!(is_valid_ph_mobile("09171234567"));
        assert!(!is_valid_ph_mobile("12345"));
        assert!(is_valid_volume(10.5));
        assert!(!is_valid_volume(-1.0));
    }
}
