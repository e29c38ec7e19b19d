//! Tests for the yield valuation estimator
//! Verifies unit conversion, price table matching, and failure handling

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    estimate_value_range, farmgate_price_range, CropType, VolumeUnit, DEFAULT_BUNCH_KG,
    DEFAULT_SACK_KG,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// =============================================================================
// Unit conversion tests
// =============================================================================

mod unit_conversion {
    use super::*;

    #[test]
    fn kilograms_convert_one_to_one() {
        let estimate =
            estimate_value_range(1, "NSIC Rc 222", "", dec("123.5"), "kg", None, None).unwrap();
        assert_eq!(estimate.total_kilograms, dec("123.5"));
    }

    #[test]
    fn tons_convert_by_thousand() {
        let estimate =
            estimate_value_range(4, "Phil 8013", "", dec("2.5"), "tons", None, None).unwrap();
        assert_eq!(estimate.total_kilograms, dec("2500"));
    }

    #[test]
    fn sacks_use_default_fifty_kg() {
        let estimate =
            estimate_value_range(1, "NSIC Rc 222", "", dec("4"), "sacks", None, None).unwrap();
        assert_eq!(
            estimate.total_kilograms,
            Decimal::from(4 * DEFAULT_SACK_KG)
        );
    }

    #[test]
    fn bunches_use_default_fifteen_kg() {
        let estimate =
            estimate_value_range(3, "Saba", "", dec("3"), "bunches", None, None).unwrap();
        assert_eq!(
            estimate.total_kilograms,
            Decimal::from(3 * DEFAULT_BUNCH_KG)
        );
    }

    #[test]
    fn positive_overrides_replace_defaults() {
        let estimate = estimate_value_range(
            1,
            "NSIC Rc 222",
            "",
            dec("4"),
            "sacks",
            Some(dec("62.5")),
            None,
        )
        .unwrap();
        assert_eq!(estimate.total_kilograms, dec("250"));
    }

    #[test]
    fn non_positive_overrides_fall_back_to_defaults() {
        let zero = estimate_value_range(
            3,
            "Saba",
            "",
            dec("2"),
            "bunches",
            None,
            Some(Decimal::ZERO),
        )
        .unwrap();
        assert_eq!(zero.total_kilograms, dec("30"));

        let negative = estimate_value_range(
            1,
            "NSIC Rc 222",
            "",
            dec("2"),
            "sacks",
            Some(dec("-10")),
            None,
        )
        .unwrap();
        assert_eq!(negative.total_kilograms, dec("100"));
    }

    #[test]
    fn unknown_unit_label_treated_as_kilograms() {
        assert_eq!(VolumeUnit::parse("crates"), VolumeUnit::Kilograms);
        assert_eq!(VolumeUnit::parse(""), VolumeUnit::Kilograms);

        let estimate =
            estimate_value_range(6, "Okra", "", dec("40"), "crates", None, None).unwrap();
        assert_eq!(estimate.total_kilograms, dec("40"));
    }

    #[test]
    fn unit_labels_accept_synonyms() {
        assert_eq!(VolumeUnit::parse("Cavans"), VolumeUnit::Sacks);
        assert_eq!(VolumeUnit::parse("t"), VolumeUnit::Tons);
        assert_eq!(VolumeUnit::parse(" Bunch "), VolumeUnit::Bunches);
    }
}

// =============================================================================
// Price table matching tests
// =============================================================================

mod price_matching {
    use super::*;

    #[test]
    fn banana_rules_match_in_fixed_order() {
        // tinigib before lakatan/lagkitan before saba before cavendish
        assert_eq!(
            farmgate_price_range(CropType::Banana, "Tinigib Lakatan", "").label,
            "Banana Tinigib"
        );
        assert_eq!(
            farmgate_price_range(CropType::Banana, "Lagkitan saba", "").label,
            "Banana Lakatan"
        );
        assert_eq!(
            farmgate_price_range(CropType::Banana, "Saba cavendish", "").label,
            "Banana Saba"
        );
        assert_eq!(
            farmgate_price_range(CropType::Banana, "Cavendish", "").label,
            "Banana Cavendish"
        );
    }

    #[test]
    fn banana_fallback_is_twenty_to_twenty_five() {
        let range = farmgate_price_range(CropType::Banana, "Senorita", "");
        assert_eq!(range.low, dec("20"));
        assert_eq!(range.high, dec("25"));
    }

    #[test]
    fn matching_ignores_case_and_extra_whitespace() {
        let padded = farmgate_price_range(CropType::Rice, "  NSIC   RC 222  ", "");
        let plain = farmgate_price_range(CropType::Rice, "nsic rc 222", "");
        assert_eq!(padded, plain);
    }

    #[test]
    fn vegetables_consult_sub_category_first() {
        let by_sub = farmgate_price_range(CropType::Vegetables, "native", "Ampalaya");
        assert_eq!(by_sub.label, "Ampalaya");

        // Unmatched sub-category falls through to the variety name
        let by_variety = farmgate_price_range(CropType::Vegetables, "Talong", "unknown");
        assert_eq!(by_variety.label, "Eggplant");
    }

    #[test]
    fn sugarcane_always_uses_crop_wide_range() {
        let a = farmgate_price_range(CropType::Sugarcane, "Phil 8013", "");
        let b = farmgate_price_range(CropType::Sugarcane, "anything else", "");
        assert_eq!(a, b);
    }
}

// =============================================================================
// Failure handling tests
// =============================================================================

mod failure_handling {
    use super::*;

    #[test]
    fn unknown_crop_type_yields_none() {
        assert!(estimate_value_range(0, "x", "", dec("10"), "kg", None, None).is_none());
        assert!(estimate_value_range(7, "x", "", dec("10"), "kg", None, None).is_none());
        assert!(estimate_value_range(-1, "x", "", dec("10"), "kg", None, None).is_none());
    }

    #[test]
    fn non_positive_volume_yields_none() {
        assert!(estimate_value_range(1, "x", "", Decimal::ZERO, "kg", None, None).is_none());
        assert!(estimate_value_range(1, "x", "", dec("-3"), "kg", None, None).is_none());
    }

    #[test]
    fn overflowing_volume_yields_none() {
        // Large enough that tons-to-kilograms exceeds Decimal range
        let huge = dec("1000000000000000000000000000");
        assert!(estimate_value_range(1, "NSIC Rc 222", "", huge, "tons", None, None).is_none());
        assert!(estimate_value_range(3, "Saba", "", Decimal::MAX, "kg", None, None).is_none());
    }
}

// =============================================================================
// Property tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid crop type ids
    fn crop_type_strategy() -> impl Strategy<Value = i32> {
        1i32..=6i32
    }

    /// Strategy for generating positive volumes
    fn volume_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 10000.00
    }

    /// Strategy for generating unit labels, including unknown ones
    fn unit_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("kg"),
            Just("tons"),
            Just("sacks"),
            Just("bunches"),
            Just("crates"),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A valid crop type and positive volume always produce an estimate
        #[test]
        fn prop_valid_inputs_always_estimate(
            crop_type_id in crop_type_strategy(),
            volume in volume_strategy(),
            unit in unit_strategy(),
            variety in "[a-zA-Z ]{0,20}"
        ) {
            let estimate =
                estimate_value_range(crop_type_id, &variety, "", volume, unit, None, None);
            prop_assert!(estimate.is_some());
        }

        /// Low bound never exceeds high bound
        #[test]
        fn prop_low_never_exceeds_high(
            crop_type_id in crop_type_strategy(),
            volume in volume_strategy(),
            unit in unit_strategy(),
            variety in "[a-zA-Z ]{0,20}"
        ) {
            let estimate =
                estimate_value_range(crop_type_id, &variety, "", volume, unit, None, None)
                    .unwrap();
            prop_assert!(estimate.low_price_per_kg <= estimate.high_price_per_kg);
            prop_assert!(estimate.low_value <= estimate.high_value);
        }

        /// Value scales linearly with kilograms
        #[test]
        fn prop_value_is_kilograms_times_price(
            crop_type_id in crop_type_strategy(),
            volume in volume_strategy(),
            unit in unit_strategy()
        ) {
            let estimate =
                estimate_value_range(crop_type_id, "generic", "", volume, unit, None, None)
                    .unwrap();
            prop_assert_eq!(
                estimate.low_value,
                estimate.total_kilograms * estimate.low_price_per_kg
            );
            prop_assert_eq!(
                estimate.high_value,
                estimate.total_kilograms * estimate.high_price_per_kg
            );
        }

        /// Identical inputs always produce identical estimates
        #[test]
        fn prop_estimator_is_deterministic(
            crop_type_id in crop_type_strategy(),
            volume in volume_strategy(),
            unit in unit_strategy(),
            variety in "[a-zA-Z ]{0,20}"
        ) {
            let a = estimate_value_range(crop_type_id, &variety, "", volume, unit, None, None);
            let b = estimate_value_range(crop_type_id, &variety, "", volume, unit, None, None);
            prop_assert_eq!(a, b);
        }
    }
}
