// Marriage records per the Marriage Act, 2014
use std::collections::BTreeMap;

use shared_types::{
    MarriageSnapshot, MarriageType, Section, SectionComplianceResult, SectionDetails,
};

use super::{count, review_if};

/// Tallies marriages by type and registration. Every type is present in the
/// breakdown, with zero when the family has none of it.
pub fn check_marriages(marriages: &[MarriageSnapshot]) -> SectionComplianceResult {
    let mut by_type: BTreeMap<MarriageType, u32> =
        MarriageType::ALL.iter().map(|t| (*t, 0)).collect();
    for marriage in marriages {
        *by_type.entry(marriage.marriage_type).or_default() += 1;
    }

    let registered = count(marriages.iter().filter(|m| m.is_registered()));

    SectionComplianceResult {
        section: Section::MarriageAct,
        status: review_if(!marriages.is_empty()),
        issues: Vec::new(),
        details: SectionDetails::Marriages {
            total: marriages.len() as u32,
            by_type,
            registered,
            unregistered: marriages.len() as u32 - registered,
        },
    }
}
