//! Assembles the per-section results into a `ComplianceReport`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{
    ComplianceReport, FamilyAggregate, FamilySnapshot, GuardianshipSnapshot, HouseSnapshot,
    Issue, IssueCounts, MarriageSnapshot, ReportSections,
};

use crate::calendar::ReviewCalendar;
use crate::rules;
use crate::score::ScoreAggregator;

/// Recommendation given when a family has no issues at all
pub const MAINTAIN_PRACTICES: &str = "Maintain current compliance practices";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    pub include_recommendations: bool,
    /// Clock reading the report is stamped with; `nextCheckDue` and the
    /// guardian account deadlines are measured from it.
    pub evaluated_at: DateTime<Utc>,
    pub review_interval_days: u32,
}

impl ReportOptions {
    pub fn at(evaluated_at: DateTime<Utc>) -> Self {
        Self {
            include_recommendations: true,
            evaluated_at,
            review_interval_days: ReviewCalendar::DEFAULT_REVIEW_INTERVAL_DAYS,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

pub struct ComplianceReportBuilder;

impl ComplianceReportBuilder {
    /// Runs every evaluator over the snapshots. Never fails; an empty slice
    /// stands in for a collection the caller could not supply.
    pub fn build(
        family: &FamilySnapshot,
        houses: &[HouseSnapshot],
        marriages: &[MarriageSnapshot],
        guardianships: &[GuardianshipSnapshot],
        options: &ReportOptions,
    ) -> ComplianceReport {
        let polygamous_marriages: Vec<MarriageSnapshot> = marriages
            .iter()
            .filter(|m| m.is_polygamous)
            .cloned()
            .collect();

        let sections = ReportSections {
            s40_polygamy: rules::s40_polygamy::check_polygamous_houses(
                family,
                houses,
                &polygamous_marriages,
            ),
            s29_dependants: rules::s29_dependants::check_dependants(family),
            s70_guardianship: rules::s70_guardianship::check_minors_guardianship(family),
            marriage_act: rules::marriage_act::check_marriages(marriages),
            children_act: rules::children_act::check_children(family, guardianships),
            guardian_oversight: rules::guardian_oversight::check_guardian_oversight(
                guardianships,
                options.evaluated_at.date_naive(),
            ),
            data_integrity: rules::data_integrity::check_data_integrity(houses, marriages),
        };

        let score = ScoreAggregator::aggregate(&sections.s40_polygamy);
        let issue_counts = IssueCounts::tally(sections.issues());
        let recommendations = if options.include_recommendations {
            Self::recommendations(sections.issues())
        } else {
            Vec::new()
        };

        ComplianceReport {
            family_id: family.id.clone(),
            family_name: family.name.clone(),
            overall_score: score.overall_score,
            overall_status: score.overall_status,
            sections,
            issue_counts,
            recommendations,
            checked_at: options.evaluated_at,
            next_check_due: ReviewCalendar::next_check_due(
                options.evaluated_at,
                options.review_interval_days,
            ),
        }
    }

    pub fn build_aggregate(
        aggregate: &FamilyAggregate,
        options: &ReportOptions,
    ) -> ComplianceReport {
        Self::build(
            &aggregate.family,
            &aggregate.houses,
            &aggregate.marriages,
            &aggregate.guardianships,
            options,
        )
    }

    /// One recommendation per unresolved HIGH/CRITICAL issue, most severe
    /// first. Falls back to `MAINTAIN_PRACTICES` only when there are no
    /// issues whatsoever.
    pub fn recommendations<'a>(issues: impl Iterator<Item = &'a Issue>) -> Vec<String> {
        let issues: Vec<&Issue> = issues.collect();
        if issues.is_empty() {
            return vec![MAINTAIN_PRACTICES.to_string()];
        }

        let mut actionable: Vec<&Issue> = issues.into_iter().filter(|i| i.needs_action()).collect();
        actionable.sort_by(|a, b| b.severity.cmp(&a.severity));
        actionable
            .into_iter()
            .map(|i| i.recommendation.clone())
            .collect()
    }
}
