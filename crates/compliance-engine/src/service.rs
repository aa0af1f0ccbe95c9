//! Resolves families from a `FamilySource` and runs the report builder.
//!
//! This is where logging happens; the evaluators stay silent.

use tracing::{debug, info, warn};

use shared_types::ComplianceReport;

use crate::error::ComplianceError;
use crate::report::{ComplianceReportBuilder, ReportOptions};
use crate::source::FamilySource;

pub struct ComplianceService<S> {
    source: S,
}

impl<S: FamilySource> ComplianceService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Builds the report for one family. Unknown ids are reported as
    /// `FamilyNotFound` without running any evaluator.
    pub fn check_family(
        &self,
        family_id: &str,
        options: &ReportOptions,
    ) -> Result<ComplianceReport, ComplianceError> {
        let aggregate = self.source.aggregate(family_id)?.ok_or_else(|| {
            warn!(family_id, "Compliance check for unknown family");
            ComplianceError::FamilyNotFound(family_id.to_string())
        })?;

        debug!(
            family_id,
            houses = aggregate.houses.len(),
            marriages = aggregate.marriages.len(),
            guardianships = aggregate.guardianships.len(),
            "Evaluating family"
        );

        let report = ComplianceReportBuilder::build_aggregate(&aggregate, options);

        info!(
            family_id,
            score = report.overall_score,
            status = ?report.overall_status,
            issues = report.issue_counts.total_issues,
            "Compliance check complete"
        );

        Ok(report)
    }

    /// Checks each family on its own; one failure does not stop the rest
    pub fn check_families<'a>(
        &self,
        family_ids: impl IntoIterator<Item = &'a str>,
        options: &ReportOptions,
    ) -> Vec<(String, Result<ComplianceReport, ComplianceError>)> {
        family_ids
            .into_iter()
            .map(|id| (id.to_string(), self.check_family(id, options)))
            .collect()
    }
}
