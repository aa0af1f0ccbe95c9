//! Statutory rule evaluators
//!
//! Each evaluator is a pure function over borrowed snapshots that returns a
//! fresh `SectionComplianceResult`. Evaluators collect every applicable issue
//! rather than stopping at the first one.

pub mod children_act;
pub mod data_integrity;
pub mod guardian_oversight;
pub mod marriage_act;
pub mod s29_dependants;
pub mod s40_polygamy;
pub mod s70_guardianship;

use shared_types::{ComplianceStatus, Issue, Severity};

/// Status for a section that raised `issues`: any CRITICAL makes it
/// non-compliant, anything else partial, nothing at all compliant.
pub fn status_from_issues(issues: &[Issue]) -> ComplianceStatus {
    if issues.iter().any(|i| i.severity == Severity::Critical) {
        ComplianceStatus::NonCompliant
    } else if issues.is_empty() {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::Partial
    }
}

/// Status for the informational sections: anything to look at needs review
pub(crate) fn review_if(present: bool) -> ComplianceStatus {
    if present {
        ComplianceStatus::RequiresReview
    } else {
        ComplianceStatus::Compliant
    }
}

pub(crate) fn count<T>(items: impl IntoIterator<Item = T>) -> u32 {
    items.into_iter().count() as u32
}
