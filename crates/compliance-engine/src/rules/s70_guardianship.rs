// Guardianship of minors per Law of Succession Act s. 70
use shared_types::{FamilySnapshot, Section, SectionComplianceResult, SectionDetails};

use super::review_if;

pub fn check_minors_guardianship(family: &FamilySnapshot) -> SectionComplianceResult {
    SectionComplianceResult {
        section: Section::S70Guardianship,
        status: review_if(family.minor_count > 0),
        issues: Vec::new(),
        details: SectionDetails::Guardianship {
            minors: family.minor_count,
        },
    }
}
