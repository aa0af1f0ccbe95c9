// Guardian bonds (s. 72) and annual accounts (s. 73), Law of Succession Act
use chrono::NaiveDate;
use shared_types::{
    law, ComplianceStatus, GuardianshipSnapshot, Issue, Section, SectionComplianceResult,
    SectionDetails, Severity,
};

use super::{count, status_from_issues};
use crate::calendar::ReviewCalendar;

/// Checks bonds and annual accounts for every active guardianship as of
/// `as_of`. Families with no active guardianship are not applicable.
pub fn check_guardian_oversight(
    guardianships: &[GuardianshipSnapshot],
    as_of: NaiveDate,
) -> SectionComplianceResult {
    let active: Vec<&GuardianshipSnapshot> =
        guardianships.iter().filter(|g| g.is_active).collect();

    let mut issues = Vec::new();
    let mut reports_overdue = 0;

    for guardianship in &active {
        if guardianship.bond_required && !guardianship.bond_posted {
            issues.push(
                Issue::new(
                    "S72_BOND_NOT_POSTED",
                    Severity::High,
                    "Guardian bond not posted",
                    format!(
                        "Guardian '{}' over ward '{}' is required to give security but no \
                         bond has been posted.",
                        guardianship.guardian_id, guardianship.ward_id
                    ),
                    law::S72,
                    "Have the guardian post the bond set by the court before dealing with \
                     the ward's property.",
                )
                .affecting(&guardianship.id),
            );
        }

        if ReviewCalendar::is_report_overdue(
            guardianship.appointed_on,
            guardianship.last_report_filed_on,
            as_of,
        ) {
            reports_overdue += 1;
            let due = ReviewCalendar::next_report_due(
                guardianship.appointed_on,
                guardianship.last_report_filed_on,
            );
            issues.push(
                Issue::new(
                    "S73_REPORT_OVERDUE",
                    Severity::Medium,
                    "Guardian annual account overdue",
                    format!(
                        "Guardian '{}' over ward '{}' has not filed the annual account that \
                         fell due on {}.",
                        guardianship.guardian_id, guardianship.ward_id, due
                    ),
                    law::S73,
                    "File the guardian's annual account of the ward's estate with the court.",
                )
                .affecting(&guardianship.id),
            );
        }
    }

    let details = SectionDetails::GuardianOversight {
        active_guardianships: active.len() as u32,
        bonds_required: count(active.iter().filter(|g| g.bond_required)),
        bonds_posted: count(active.iter().filter(|g| g.bond_required && g.bond_posted)),
        reports_overdue,
    };

    let status = if active.is_empty() {
        ComplianceStatus::NotApplicable
    } else {
        status_from_issues(&issues)
    };

    SectionComplianceResult {
        section: Section::GuardianOversight,
        status,
        issues,
        details,
    }
}
