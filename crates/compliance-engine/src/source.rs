//! Where family snapshots come from
//!
//! The engine never talks to storage. A `FamilySource` is the seam a storage
//! layer implements to hand snapshots over; `InMemoryFamilySource` backs the
//! API server and the tests.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shared_types::{
    FamilyAggregate, FamilySnapshot, GuardianshipSnapshot, HouseSnapshot, MarriageSnapshot,
};

use crate::error::ComplianceError;

pub trait FamilySource: Send + Sync {
    /// `Ok(None)` when no family has this id
    fn family(&self, family_id: &str) -> Result<Option<FamilySnapshot>, ComplianceError>;

    fn houses(&self, family_id: &str) -> Result<Vec<HouseSnapshot>, ComplianceError>;

    fn marriages(&self, family_id: &str) -> Result<Vec<MarriageSnapshot>, ComplianceError>;

    fn guardianships(&self, family_id: &str) -> Result<Vec<GuardianshipSnapshot>, ComplianceError>;

    /// Loads the whole aggregate, or `None` for an unknown family
    fn aggregate(&self, family_id: &str) -> Result<Option<FamilyAggregate>, ComplianceError> {
        let Some(family) = self.family(family_id)? else {
            return Ok(None);
        };
        Ok(Some(FamilyAggregate {
            family,
            houses: self.houses(family_id)?,
            marriages: self.marriages(family_id)?,
            guardianships: self.guardianships(family_id)?,
        }))
    }
}

/// JSON layout of a family fixture file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyFixture {
    #[serde(default)]
    pub families: Vec<FamilyAggregate>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFamilySource {
    families: HashMap<String, FamilyAggregate>,
}

impl InMemoryFamilySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ComplianceError> {
        let fixture: FamilyFixture = serde_json::from_str(json)?;
        Ok(fixture.families.into_iter().collect())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ComplianceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Adds or replaces a family, keyed by its id
    pub fn insert(&mut self, aggregate: FamilyAggregate) {
        self.families
            .insert(aggregate.family.id.clone(), aggregate);
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Family ids in sorted order
    pub fn family_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.families.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn lookup<T>(
        &self,
        family_id: &str,
        pick: impl FnOnce(&FamilyAggregate) -> Vec<T>,
    ) -> Vec<T> {
        self.families.get(family_id).map(pick).unwrap_or_default()
    }
}

impl FromIterator<FamilyAggregate> for InMemoryFamilySource {
    fn from_iter<I: IntoIterator<Item = FamilyAggregate>>(iter: I) -> Self {
        let mut source = Self::new();
        for aggregate in iter {
            source.insert(aggregate);
        }
        source
    }
}

impl FamilySource for InMemoryFamilySource {
    fn family(&self, family_id: &str) -> Result<Option<FamilySnapshot>, ComplianceError> {
        Ok(self.families.get(family_id).map(|a| a.family.clone()))
    }

    fn houses(&self, family_id: &str) -> Result<Vec<HouseSnapshot>, ComplianceError> {
        Ok(self.lookup(family_id, |a| a.houses.clone()))
    }

    fn marriages(&self, family_id: &str) -> Result<Vec<MarriageSnapshot>, ComplianceError> {
        Ok(self.lookup(family_id, |a| a.marriages.clone()))
    }

    fn guardianships(&self, family_id: &str) -> Result<Vec<GuardianshipSnapshot>, ComplianceError> {
        Ok(self.lookup(family_id, |a| a.guardianships.clone()))
    }

    fn aggregate(&self, family_id: &str) -> Result<Option<FamilyAggregate>, ComplianceError> {
        Ok(self.families.get(family_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "families": [
            {
                "family": { "id": "fam-1", "name": "Kiprop", "isPolygamous": true },
                "houses": [
                    { "id": "h-1", "houseName": "First House", "houseOrder": 1,
                      "courtRecognized": true, "wivesConsentObtained": true }
                ]
            },
            { "family": { "id": "fam-2", "name": "Akinyi" } }
        ]
    }"#;

    #[test]
    fn test_loads_fixture() {
        let source = InMemoryFamilySource::from_json(FIXTURE).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.family_ids(), vec!["fam-1", "fam-2"]);
        assert_eq!(source.houses("fam-1").unwrap().len(), 1);
        assert!(source.marriages("fam-2").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_family_is_none() {
        let source = InMemoryFamilySource::from_json(FIXTURE).unwrap();
        assert!(source.family("missing").unwrap().is_none());
        assert!(source.aggregate("missing").unwrap().is_none());
        assert!(source.houses("missing").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_fixture_is_an_error() {
        let err = InMemoryFamilySource::from_json("{ \"families\": 3 }").unwrap_err();
        assert!(matches!(err, ComplianceError::Fixture(_)));
    }

    #[test]
    fn test_insert_replaces_by_id() {
        let mut source = InMemoryFamilySource::from_json(FIXTURE).unwrap();
        source.insert(FamilyAggregate::new(FamilySnapshot {
            id: "fam-2".to_string(),
            name: "Akinyi (updated)".to_string(),
            is_polygamous: false,
            dependant_count: 1,
            minor_count: 0,
        }));
        assert_eq!(source.len(), 2);
        assert_eq!(
            source.family("fam-2").unwrap().unwrap().name,
            "Akinyi (updated)"
        );
    }
}
