// Provision for dependants per Law of Succession Act s. 29
use shared_types::{FamilySnapshot, Section, SectionComplianceResult, SectionDetails};

use super::review_if;

/// Any recorded dependant may bring a claim for reasonable provision, so the
/// section needs review whenever the family has dependants.
pub fn check_dependants(family: &FamilySnapshot) -> SectionComplianceResult {
    SectionComplianceResult {
        section: Section::S29Dependants,
        status: review_if(family.dependant_count > 0),
        issues: Vec::new(),
        details: SectionDetails::Dependants {
            potential_dependants: family.dependant_count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ComplianceStatus;

    fn family(dependant_count: u32) -> FamilySnapshot {
        FamilySnapshot {
            id: "fam-1".to_string(),
            name: "Wanjiru".to_string(),
            is_polygamous: false,
            dependant_count,
            minor_count: 0,
        }
    }

    #[test]
    fn test_dependants_require_review() {
        let result = check_dependants(&family(4));
        assert_eq!(result.status, ComplianceStatus::RequiresReview);
        assert!(result.issues.is_empty());
        assert_eq!(
            result.details,
            SectionDetails::Dependants {
                potential_dependants: 4
            }
        );
    }

    #[test]
    fn test_no_dependants_is_compliant() {
        assert_eq!(check_dependants(&family(0)).status, ComplianceStatus::Compliant);
    }
}
