//! Lookup reference models: crop types, ecosystems, tenures

use serde::{Deserialize, Serialize};

/// Crop types recognized by the municipal agriculture office.
///
/// The numeric identifiers are fixed by the field data entry forms and the
/// valuation tables; they are not database-assigned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Rice,
    Corn,
    Banana,
    Sugarcane,
    Cassava,
    Vegetables,
}

impl CropType {
    /// Resolve a crop type from its fixed numeric identifier
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(CropType::Rice),
            2 => Some(CropType::Corn),
            3 => Some(CropType::Banana),
            4 => Some(CropType::Sugarcane),
            5 => Some(CropType::Cassava),
            6 => Some(CropType::Vegetables),
            _ => None,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            CropType::Rice => 1,
            CropType::Corn => 2,
            CropType::Banana => 3,
            CropType::Sugarcane => 4,
            CropType::Cassava => 5,
            CropType::Vegetables => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CropType::Rice => "Rice",
            CropType::Corn => "Corn",
            CropType::Banana => "Banana",
            CropType::Sugarcane => "Sugarcane",
            CropType::Cassava => "Cassava",
            CropType::Vegetables => "Vegetables",
        }
    }

    /// Conventional reporting unit for harvest volumes of this crop
    pub fn default_unit_label(&self) -> &'static str {
        match self {
            CropType::Rice | CropType::Corn => "sacks",
            CropType::Banana => "bunches",
            CropType::Sugarcane => "tons",
            CropType::Cassava | CropType::Vegetables => "kg",
        }
    }

    pub fn all() -> [CropType; 6] {
        [
            CropType::Rice,
            CropType::Corn,
            CropType::Banana,
            CropType::Sugarcane,
            CropType::Cassava,
            CropType::Vegetables,
        ]
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rice ecosystem classification used on crop and incident records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Ecosystem {
    Irrigated,
    RainfedLowland,
    Upland,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Irrigated => "irrigated",
            Ecosystem::RainfedLowland => "rainfed_lowland",
            Ecosystem::Upland => "upland",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "irrigated" => Some(Ecosystem::Irrigated),
            "rainfed_lowland" => Some(Ecosystem::RainfedLowland),
            "upland" => Some(Ecosystem::Upland),
            _ => None,
        }
    }
}

/// Land-holding relationship of a farmer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    Owner,
    Tenant,
    Leaseholder,
    Sharecropper,
}

impl Tenure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tenure::Owner => "owner",
            Tenure::Tenant => "tenant",
            Tenure::Leaseholder => "leaseholder",
            Tenure::Sharecropper => "sharecropper",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Tenure::Owner),
            "tenant" => Some(Tenure::Tenant),
            "leaseholder" => Some(Tenure::Leaseholder),
            "sharecropper" => Some(Tenure::Sharecropper),
            _ => None,
        }
    }

    pub fn all() -> [Tenure; 4] {
        [
            Tenure::Owner,
            Tenure::Tenant,
            Tenure::Leaseholder,
            Tenure::Sharecropper,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_type_id_round_trip() {
        for crop in CropType::all() {
            assert_eq!(CropType::from_id(crop.id()), Some(crop));
        }
    }

    #[test]
    fn test_unknown_crop_type_id() {
        assert_eq!(CropType::from_id(0), None);
        assert_eq!(CropType::from_id(7), None);
        assert_eq!(CropType::from_id(999), None);
    }

    #[test]
    fn test_default_unit_labels() {
        assert_eq!(CropType::Rice.default_unit_label(), "sacks");
        assert_eq!(CropType::Banana.default_unit_label(), "bunches");
        assert_eq!(CropType::Sugarcane.default_unit_label(), "tons");
        assert_eq!(CropType::Vegetables.default_unit_label(), "kg");
    }
}
