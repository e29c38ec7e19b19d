//! Maturity projection
//!
//! Projects an expected harvest date from a planting date using a static
//! per-crop maturity-duration table. The projection pre-fills an editable
//! field; a user-supplied harvest date always takes precedence, so callers
//! must leave existing values untouched when the projection is unavailable.

use chrono::{Duration, NaiveDate};

use crate::models::CropType;

/// Typical calendar days between planting and harvest readiness
pub fn maturity_days(crop_type: CropType) -> i64 {
    match crop_type {
        CropType::Rice => 100,
        CropType::Corn => 110,
        CropType::Banana => 360,
        CropType::Sugarcane => 365,
        CropType::Cassava => 300,
        CropType::Vegetables => 60,
    }
}

/// Project the expected harvest date for a crop planted on `planted`.
///
/// Calendar-day arithmetic, date only. Returns `None` for an unrecognized
/// crop type identifier.
pub fn project_harvest_date(crop_type_id: i32, planted: NaiveDate) -> Option<NaiveDate> {
    let crop_type = CropType::from_id(crop_type_id)?;
    planted.checked_add_signed(Duration::days(maturity_days(crop_type)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rice_projects_100_days() {
        assert_eq!(
            project_harvest_date(1, date(2024, 1, 1)),
            Some(date(2024, 4, 10))
        );
    }

    #[test]
    fn test_vegetables_project_60_days() {
        assert_eq!(
            project_harvest_date(6, date(2024, 3, 1)),
            Some(date(2024, 4, 30))
        );
    }

    #[test]
    fn test_projection_crosses_year_boundary() {
        // Banana planted in December matures roughly a year later
        assert_eq!(
            project_harvest_date(3, date(2023, 12, 15)),
            Some(date(2024, 12, 9))
        );
    }

    #[test]
    fn test_unknown_crop_type_unavailable() {
        assert_eq!(project_harvest_date(0, date(2024, 1, 1)), None);
        assert_eq!(project_harvest_date(999, date(2024, 1, 1)), None);
    }

    #[test]
    fn test_leap_day_arithmetic() {
        // 2024 is a leap year; the 100-day offset counts Feb 29
        assert_eq!(
            project_harvest_date(1, date(2024, 2, 28)),
            Some(date(2024, 6, 7))
        );
    }
}
