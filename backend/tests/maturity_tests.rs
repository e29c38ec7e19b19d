//! Tests for maturity projection
//! Verifies fixed crop durations and date arithmetic across boundaries

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{maturity_days, project_harvest_date, CropType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Fixed duration tests
// =============================================================================

mod durations {
    use super::*;

    #[test]
    fn durations_match_crop_calendar() {
        assert_eq!(maturity_days(CropType::Rice), 100);
        assert_eq!(maturity_days(CropType::Corn), 110);
        assert_eq!(maturity_days(CropType::Banana), 360);
        assert_eq!(maturity_days(CropType::Sugarcane), 365);
        assert_eq!(maturity_days(CropType::Cassava), 300);
        assert_eq!(maturity_days(CropType::Vegetables), 60);
    }

    #[test]
    fn rice_planted_new_year_matures_in_april() {
        assert_eq!(
            project_harvest_date(1, date(2024, 1, 1)),
            Some(date(2024, 4, 10))
        );
    }

    #[test]
    fn vegetables_mature_in_sixty_days() {
        assert_eq!(
            project_harvest_date(6, date(2024, 3, 1)),
            Some(date(2024, 4, 30))
        );
    }

    #[test]
    fn projection_crosses_year_boundary() {
        // 360 days from mid-December lands in the following December
        assert_eq!(
            project_harvest_date(3, date(2023, 12, 15)),
            Some(date(2024, 12, 9))
        );
    }

    #[test]
    fn projection_handles_leap_years() {
        assert_eq!(
            project_harvest_date(1, date(2024, 2, 28)),
            Some(date(2024, 6, 7))
        );
    }

    #[test]
    fn unknown_crop_type_is_unavailable() {
        assert_eq!(project_harvest_date(0, date(2024, 1, 1)), None);
        assert_eq!(project_harvest_date(99, date(2024, 1, 1)), None);
        assert_eq!(project_harvest_date(-4, date(2024, 1, 1)), None);
    }
}

// =============================================================================
// Property tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating planting dates within a realistic window
    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (2015i32..=2035i32, 1u32..=12u32, 1u32..=28u32)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every known crop type projects a date strictly after planting
        #[test]
        fn prop_harvest_follows_planting(planted in date_strategy(), crop_id in 1i32..=6i32) {
            let projected = project_harvest_date(crop_id, planted).unwrap();
            prop_assert!(projected > planted);
        }

        /// The projected gap equals the crop's fixed duration exactly
        #[test]
        fn prop_gap_equals_fixed_duration(planted in date_strategy(), crop_id in 1i32..=6i32) {
            let projected = project_harvest_date(crop_id, planted).unwrap();
            let expected = maturity_days(CropType::from_id(crop_id).unwrap());
            prop_assert_eq!((projected - planted).num_days(), expected);
        }

        /// Unknown crop ids never project a date
        #[test]
        fn prop_unknown_ids_unavailable(planted in date_strategy(), crop_id in 7i32..=1000i32) {
            prop_assert_eq!(project_harvest_date(crop_id, planted), None);
        }
    }
}
