// Care of minor children per the Children Act, 2022
use std::collections::BTreeSet;

use shared_types::{
    law, ComplianceStatus, FamilySnapshot, GuardianshipSnapshot, Issue, Section,
    SectionComplianceResult, SectionDetails, Severity,
};

use super::status_from_issues;

/// Checks that every minor in the family has an active guardian.
///
/// Coverage is counted by distinct ward, so two guardians over one child
/// still cover only that child.
pub fn check_children(
    family: &FamilySnapshot,
    guardianships: &[GuardianshipSnapshot],
) -> SectionComplianceResult {
    let covered: BTreeSet<&str> = guardianships
        .iter()
        .filter(|g| g.is_active && g.ward_is_minor)
        .map(|g| g.ward_id.as_str())
        .collect();

    let minors = family.minor_count;
    let with_guardian = (covered.len() as u32).min(minors);
    let without_guardian = minors - with_guardian;

    let details = SectionDetails::Children {
        minors,
        minors_with_guardian: with_guardian,
        minors_without_guardian: without_guardian,
    };

    if minors == 0 {
        return SectionComplianceResult {
            section: Section::ChildrenAct,
            status: ComplianceStatus::NotApplicable,
            issues: Vec::new(),
            details,
        };
    }

    let mut issues = Vec::new();
    if without_guardian > 0 {
        issues.push(
            Issue::new(
                "CHILDREN_ACT_MINOR_WITHOUT_GUARDIAN",
                Severity::Medium,
                "Minor without an appointed guardian",
                format!(
                    "{} of {} minor(s) in family '{}' have no active guardian on record.",
                    without_guardian, minors, family.name
                ),
                law::CHILDREN_ACT,
                "Appoint a testamentary or court guardian for each minor child.",
            )
            .affecting(&family.id),
        );
    }

    SectionComplianceResult {
        section: Section::ChildrenAct,
        status: status_from_issues(&issues),
        issues,
        details,
    }
}
