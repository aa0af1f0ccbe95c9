//! Family snapshots handed to the compliance engine by the storage layer
//!
//! Every snapshot is a plain value: the caller translates its own rows into
//! these shapes and the engine only ever reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_polygamous: bool,
    #[serde(default)]
    pub dependant_count: u32,
    #[serde(default)]
    pub minor_count: u32,
}

/// One house of a polygamous family. `house_order == 1` is the senior house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSnapshot {
    pub id: String,
    pub house_name: String,
    pub house_order: i32,
    #[serde(default)]
    pub court_recognized: bool,
    #[serde(default)]
    pub wives_consent_obtained: bool,
    #[serde(default)]
    pub house_share_percentage: Option<f64>,
}

impl HouseSnapshot {
    pub fn is_senior(&self) -> bool {
        self.house_order == 1
    }

    /// Houses after the first need a court certificate and the wives' consent
    pub fn is_subsequent(&self) -> bool {
        self.house_order > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarriageType {
    Civil,
    Customary,
    Traditional,
    Islamic,
    Christian,
}

impl MarriageType {
    pub const ALL: [MarriageType; 5] = [
        MarriageType::Civil,
        MarriageType::Customary,
        MarriageType::Traditional,
        MarriageType::Islamic,
        MarriageType::Christian,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarriageSnapshot {
    pub id: String,
    #[serde(default)]
    pub is_polygamous: bool,
    #[serde(default)]
    pub polygamous_house_id: Option<String>,
    #[serde(rename = "type")]
    pub marriage_type: MarriageType,
    #[serde(default)]
    pub registration_number: Option<String>,
}

impl MarriageSnapshot {
    /// A blank registration number counts as unregistered
    pub fn is_registered(&self) -> bool {
        self.registration_number
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty())
    }
}

/// Court-appointed guardianship over a family member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianshipSnapshot {
    pub id: String,
    pub ward_id: String,
    pub guardian_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub ward_is_minor: bool,
    #[serde(default)]
    pub bond_required: bool,
    #[serde(default)]
    pub bond_posted: bool,
    pub appointed_on: NaiveDate,
    #[serde(default)]
    pub last_report_filed_on: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

/// Everything the engine needs about one family. Missing collections
/// deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyAggregate {
    pub family: FamilySnapshot,
    #[serde(default)]
    pub houses: Vec<HouseSnapshot>,
    #[serde(default)]
    pub marriages: Vec<MarriageSnapshot>,
    #[serde(default)]
    pub guardianships: Vec<GuardianshipSnapshot>,
}

impl FamilyAggregate {
    pub fn new(family: FamilySnapshot) -> Self {
        Self {
            family,
            houses: Vec::new(),
            marriages: Vec::new(),
            guardianships: Vec::new(),
        }
    }
}
