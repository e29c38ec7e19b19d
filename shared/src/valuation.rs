//! Yield valuation estimator
//!
//! Converts reported harvest volumes (sacks, bunches, tons, kilograms) to a
//! common kilogram basis and applies crop/variety-specific farmgate price
//! ranges to produce an estimated peso value range.
//!
//! Every input failure (unknown crop type, non-positive volume, a volume
//! too large to price) yields `None`; callers render a placeholder instead
//! of treating it as an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::CropType;

/// Default kilograms per sack when no override is supplied
pub const DEFAULT_SACK_KG: i64 = 50;

/// Default kilograms per bunch when no override is supplied
pub const DEFAULT_BUNCH_KG: i64 = 15;

/// Volume unit of measure for reported harvests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Kilograms,
    Tons,
    Sacks,
    Bunches,
}

impl VolumeUnit {
    /// Parse a unit label. Unrecognized labels are treated as kilograms,
    /// a deliberate lenient fallback rather than an error.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "ton" | "tons" | "t" => VolumeUnit::Tons,
            "sack" | "sacks" | "cavan" | "cavans" => VolumeUnit::Sacks,
            "bunch" | "bunches" => VolumeUnit::Bunches,
            _ => VolumeUnit::Kilograms,
        }
    }

    /// Kilogram multiplier for this unit. `sack_kg` and `bunch_kg` override
    /// the per-unit weight; absent or non-positive overrides fall back to
    /// the fixed defaults (50 and 15 respectively).
    pub fn kg_factor(&self, sack_kg: Option<Decimal>, bunch_kg: Option<Decimal>) -> Decimal {
        match self {
            VolumeUnit::Kilograms => Decimal::ONE,
            VolumeUnit::Tons => Decimal::from(1000),
            VolumeUnit::Sacks => positive_or(sack_kg, Decimal::from(DEFAULT_SACK_KG)),
            VolumeUnit::Bunches => positive_or(bunch_kg, Decimal::from(DEFAULT_BUNCH_KG)),
        }
    }
}

fn positive_or(value: Option<Decimal>, default: Decimal) -> Decimal {
    match value {
        Some(v) if v > Decimal::ZERO => v,
        _ => default,
    }
}

/// Farmgate price range in pesos per kilogram
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmgatePriceRange {
    pub low: Decimal,
    pub high: Decimal,
    pub label: &'static str,
}

/// Estimated monetary value range for a reported harvest volume
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueEstimate {
    pub total_kilograms: Decimal,
    pub low_price_per_kg: Decimal,
    pub high_price_per_kg: Decimal,
    pub low_value: Decimal,
    pub high_value: Decimal,
    pub source_label: String,
}

/// An ordered substring rule in a crop's price decision table
struct PriceRule {
    fragments: &'static [&'static str],
    /// Price bounds in centavos per kilogram
    low_centavos: i64,
    high_centavos: i64,
    label: &'static str,
}

impl PriceRule {
    fn matches(&self, normalized: &str) -> bool {
        self.fragments.iter().any(|f| normalized.contains(f))
    }

    fn to_range(&self) -> FarmgatePriceRange {
        FarmgatePriceRange {
            low: Decimal::new(self.low_centavos, 2),
            high: Decimal::new(self.high_centavos, 2),
            label: self.label,
        }
    }
}

// Fixed business rules hard-coded by the agriculture office. Rule order is
// first-match-wins and must be preserved exactly (e.g. for banana: tinigib
// before lakatan/lagkitan before saba before cavendish).
const RICE_RULES: &[PriceRule] = &[
    PriceRule { fragments: &["rc 222"], low_centavos: 1700, high_centavos: 1900, label: "Palay NSIC Rc 222" },
    PriceRule { fragments: &["rc 160"], low_centavos: 1800, high_centavos: 2000, label: "Palay NSIC Rc 160" },
    PriceRule { fragments: &["rc 216"], low_centavos: 1800, high_centavos: 2100, label: "Palay NSIC Rc 216" },
    PriceRule { fragments: &["red", "black"], low_centavos: 4500, high_centavos: 6000, label: "Pigmented rice" },
];

const CORN_RULES: &[PriceRule] = &[
    PriceRule { fragments: &["sweet"], low_centavos: 2500, high_centavos: 3500, label: "Sweet corn" },
    PriceRule { fragments: &["tinigib", "glutinous"], low_centavos: 3000, high_centavos: 4000, label: "White glutinous corn" },
    PriceRule { fragments: &["white"], low_centavos: 1600, high_centavos: 2000, label: "White corn" },
];

const BANANA_RULES: &[PriceRule] = &[
    PriceRule { fragments: &["tinigib"], low_centavos: 2500, high_centavos: 3000, label: "Banana Tinigib" },
    PriceRule { fragments: &["lagkitan", "lakatan"], low_centavos: 3000, high_centavos: 3500, label: "Banana Lakatan" },
    PriceRule { fragments: &["saba"], low_centavos: 1200, high_centavos: 1800, label: "Banana Saba" },
    PriceRule { fragments: &["cavendish"], low_centavos: 1800, high_centavos: 2200, label: "Banana Cavendish" },
];

const CASSAVA_RULES: &[PriceRule] = &[
    PriceRule { fragments: &["golden", "yellow"], low_centavos: 900, high_centavos: 1200, label: "Cassava golden yellow" },
];

const VEGETABLE_RULES: &[PriceRule] = &[
    PriceRule { fragments: &["eggplant", "talong"], low_centavos: 3500, high_centavos: 5000, label: "Eggplant" },
    PriceRule { fragments: &["tomato", "kamatis"], low_centavos: 3000, high_centavos: 6000, label: "Tomato" },
    PriceRule { fragments: &["ampalaya", "bitter"], low_centavos: 4000, high_centavos: 6000, label: "Ampalaya" },
    PriceRule { fragments: &["squash", "kalabasa"], low_centavos: 1500, high_centavos: 2500, label: "Squash" },
    PriceRule { fragments: &["okra"], low_centavos: 3000, high_centavos: 4500, label: "Okra" },
];

const RICE_FALLBACK: PriceRule = PriceRule { fragments: &[], low_centavos: 1600, high_centavos: 2000, label: "Palay (farmgate)" };
const CORN_FALLBACK: PriceRule = PriceRule { fragments: &[], low_centavos: 1400, high_centavos: 1800, label: "Yellow corn (grain)" };
const BANANA_FALLBACK: PriceRule = PriceRule { fragments: &[], low_centavos: 2000, high_centavos: 2500, label: "Banana (farmgate)" };
const SUGARCANE_FALLBACK: PriceRule = PriceRule { fragments: &[], low_centavos: 250, high_centavos: 350, label: "Sugarcane (millgate)" };
const CASSAVA_FALLBACK: PriceRule = PriceRule { fragments: &[], low_centavos: 800, high_centavos: 1100, label: "Cassava (fresh roots)" };
const VEGETABLE_FALLBACK: PriceRule = PriceRule { fragments: &[], low_centavos: 3000, high_centavos: 5000, label: "Vegetables (assorted)" };

/// Lowercase and collapse whitespace for substring matching
fn normalize(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve the farmgate price range for a crop/variety combination.
///
/// Matching walks the crop's ordered substring rules over the normalized
/// variety name (first match wins); vegetables consult the sub-category
/// before the variety name. No variety match falls back to the crop-wide
/// default range.
pub fn farmgate_price_range(
    crop_type: CropType,
    variety_name: &str,
    sub_category: &str,
) -> FarmgatePriceRange {
    let variety = normalize(variety_name);
    let (rules, fallback) = match crop_type {
        CropType::Rice => (RICE_RULES, &RICE_FALLBACK),
        CropType::Corn => (CORN_RULES, &CORN_FALLBACK),
        CropType::Banana => (BANANA_RULES, &BANANA_FALLBACK),
        CropType::Sugarcane => (&[] as &[PriceRule], &SUGARCANE_FALLBACK),
        CropType::Cassava => (CASSAVA_RULES, &CASSAVA_FALLBACK),
        CropType::Vegetables => (VEGETABLE_RULES, &VEGETABLE_FALLBACK),
    };

    if crop_type == CropType::Vegetables {
        let sub = normalize(sub_category);
        if !sub.is_empty() {
            if let Some(rule) = rules.iter().find(|r| r.matches(&sub)) {
                return rule.to_range();
            }
        }
    }

    rules
        .iter()
        .find(|r| r.matches(&variety))
        .unwrap_or(fallback)
        .to_range()
}

/// Estimate the peso value range of a reported harvest volume.
///
/// Returns `None` when the crop type is unrecognized, the volume is not a
/// positive quantity, or the kilogram/value arithmetic overflows `Decimal`.
/// Unknown unit labels are converted 1:1 as kilograms.
pub fn estimate_value_range(
    crop_type_id: i32,
    variety_name: &str,
    sub_category: &str,
    volume: Decimal,
    unit: &str,
    sack_kg: Option<Decimal>,
    bunch_kg: Option<Decimal>,
) -> Option<ValueEstimate> {
    let crop_type = CropType::from_id(crop_type_id)?;
    if volume <= Decimal::ZERO {
        return None;
    }

    let factor = VolumeUnit::parse(unit).kg_factor(sack_kg, bunch_kg);
    let total_kilograms = volume.checked_mul(factor)?;

    let price = farmgate_price_range(crop_type, variety_name, sub_category);
    let low_value = total_kilograms.checked_mul(price.low)?;
    let high_value = total_kilograms.checked_mul(price.high)?;

    Some(ValueEstimate {
        total_kilograms,
        low_price_per_kg: price.low,
        high_price_per_kg: price.high,
        low_value,
        high_value,
        source_label: price.label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factors() {
        assert_eq!(VolumeUnit::parse("kg").kg_factor(None, None), Decimal::ONE);
        assert_eq!(
            VolumeUnit::parse("tons").kg_factor(None, None),
            Decimal::from(1000)
        );
        assert_eq!(
            VolumeUnit::parse("sacks").kg_factor(None, None),
            Decimal::from(50)
        );
        assert_eq!(
            VolumeUnit::parse("bunches").kg_factor(None, None),
            Decimal::from(15)
        );
    }

    #[test]
    fn test_unknown_unit_treated_as_kilograms() {
        assert_eq!(VolumeUnit::parse("crates"), VolumeUnit::Kilograms);
        let estimate =
            estimate_value_range(1, "NSIC Rc 222", "", Decimal::from(10), "crates", None, None)
                .unwrap();
        assert_eq!(estimate.total_kilograms, Decimal::from(10));
    }

    #[test]
    fn test_ten_tons_is_ten_thousand_kilograms() {
        let estimate =
            estimate_value_range(1, "NSIC Rc 222", "", Decimal::from(10), "tons", None, None)
                .unwrap();
        assert_eq!(estimate.total_kilograms, Decimal::from(10000));
    }

    #[test]
    fn test_sack_override_used_when_positive() {
        let estimate = estimate_value_range(
            1,
            "NSIC Rc 222",
            "",
            Decimal::from(4),
            "sacks",
            Some(Decimal::from(60)),
            None,
        )
        .unwrap();
        assert_eq!(estimate.total_kilograms, Decimal::from(240));
    }

    #[test]
    fn test_non_positive_override_falls_back_to_default() {
        let estimate = estimate_value_range(
            3,
            "Saba",
            "",
            Decimal::from(2),
            "bunches",
            None,
            Some(Decimal::ZERO),
        )
        .unwrap();
        assert_eq!(estimate.total_kilograms, Decimal::from(30));
    }

    #[test]
    fn test_unknown_crop_type_unavailable() {
        assert!(estimate_value_range(999, "anything", "", Decimal::from(10), "kg", None, None)
            .is_none());
    }

    #[test]
    fn test_oversized_volume_unavailable_instead_of_panicking() {
        // 1e27 is a valid Decimal but 1e27 tons overflows the kilogram
        // conversion; the estimate degrades to unavailable
        let huge: Decimal = "1000000000000000000000000000".parse().unwrap();
        assert!(
            estimate_value_range(1, "NSIC Rc 222", "", huge, "tons", None, None).is_none()
        );
        // A volume whose kilograms fit but whose peso value does not
        let max = Decimal::MAX;
        assert!(estimate_value_range(1, "NSIC Rc 222", "", max, "kg", None, None).is_none());
    }

    #[test]
    fn test_non_positive_volume_unavailable() {
        assert!(
            estimate_value_range(1, "NSIC Rc 222", "", Decimal::ZERO, "kg", None, None).is_none()
        );
        assert!(
            estimate_value_range(1, "NSIC Rc 222", "", Decimal::from(-5), "kg", None, None)
                .is_none()
        );
    }

    #[test]
    fn test_low_value_never_exceeds_high_value() {
        for crop in crate::models::CropType::all() {
            let estimate = estimate_value_range(
                crop.id(),
                "any variety",
                "",
                Decimal::from(7),
                "kg",
                None,
                None,
            )
            .unwrap();
            assert!(estimate.low_value <= estimate.high_value, "{:?}", crop);
            assert!(estimate.low_price_per_kg <= estimate.high_price_per_kg);
        }
    }

    #[test]
    fn test_estimator_is_idempotent() {
        let a = estimate_value_range(3, "Lakatan", "", Decimal::from(12), "bunches", None, None);
        let b = estimate_value_range(3, "Lakatan", "", Decimal::from(12), "bunches", None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_banana_variety_match_order() {
        // Lakatan/lagkitan is checked before saba; a name containing both
        // classifies by the earlier rule, not a "best" match.
        let range = farmgate_price_range(CropType::Banana, "Lakatan Saba mix", "");
        assert_eq!(range.label, "Banana Lakatan");

        let range = farmgate_price_range(CropType::Banana, "Tinigib lakatan", "");
        assert_eq!(range.label, "Banana Tinigib");
    }

    #[test]
    fn test_banana_fallback_range() {
        let range = farmgate_price_range(CropType::Banana, "Unknown Hybrid X", "");
        assert_eq!(range.low, Decimal::from(20));
        assert_eq!(range.high, Decimal::from(25));
        assert_eq!(range.label, "Banana (farmgate)");
    }

    #[test]
    fn test_variety_matching_normalizes_case_and_whitespace() {
        let a = farmgate_price_range(CropType::Rice, "NSIC   RC 222", "");
        let b = farmgate_price_range(CropType::Rice, "nsic rc 222", "");
        assert_eq!(a, b);
        assert_eq!(a.label, "Palay NSIC Rc 222");
    }

    #[test]
    fn test_vegetable_sub_category_refines_match() {
        let range = farmgate_price_range(CropType::Vegetables, "", "Eggplant");
        assert_eq!(range.label, "Eggplant");

        // Variety name is consulted when the sub-category does not match
        let range = farmgate_price_range(CropType::Vegetables, "Native kamatis", "heirloom");
        assert_eq!(range.label, "Tomato");

        let range = farmgate_price_range(CropType::Vegetables, "mixed greens", "");
        assert_eq!(range.label, "Vegetables (assorted)");
    }

    #[test]
    fn test_value_range_multiplication() {
        // 2 bunches of saba at default 15 kg/bunch = 30 kg at 12-18 pesos
        let estimate =
            estimate_value_range(3, "Saba", "", Decimal::from(2), "bunches", None, None).unwrap();
        assert_eq!(estimate.low_value, Decimal::from(360));
        assert_eq!(estimate.high_value, Decimal::from(540));
    }
}
