//! Succession statute-compliance engine
//!
//! Evaluates a family under the Law of Succession Act (ss. 29, 40, 70, 72,
//! 73), the Marriage Act and the Children Act and produces a scored
//! `ComplianceReport`. Evaluation is pure: every call works on borrowed
//! snapshots and returns a fresh report, so families can be evaluated in
//! parallel without coordination.

pub mod calendar;
pub mod error;
pub mod report;
pub mod rules;
pub mod score;
pub mod service;
pub mod source;

pub use calendar::ReviewCalendar;
pub use error::ComplianceError;
pub use report::{ComplianceReportBuilder, ReportOptions, MAINTAIN_PRACTICES};
pub use score::{ScoreAggregator, ScoreSummary};
pub use service::ComplianceService;
pub use source::{FamilyFixture, FamilySource, InMemoryFamilySource};

use shared_types::{ComplianceReport, FamilyAggregate, Section};

/// ComplianceEngine entry point
pub struct ComplianceEngine;

impl ComplianceEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn check_family(
        &self,
        aggregate: &FamilyAggregate,
        options: &ReportOptions,
    ) -> ComplianceReport {
        ComplianceReportBuilder::build_aggregate(aggregate, options)
    }

    /// Sections every report covers, in report order
    pub fn sections(&self) -> &'static [Section] {
        &Section::ALL
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use shared_types::{
        ComplianceStatus, FamilySnapshot, GuardianshipSnapshot, HouseSnapshot, MarriageSnapshot,
        MarriageType, SectionComplianceResult, Severity,
    };

    fn options() -> ReportOptions {
        ReportOptions::at(Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap())
    }

    fn family_strategy() -> impl Strategy<Value = FamilySnapshot> {
        (any::<bool>(), 0u32..6, 0u32..6).prop_map(|(is_polygamous, dependants, minors)| {
            FamilySnapshot {
                id: "fam-prop".to_string(),
                name: "Property Family".to_string(),
                is_polygamous,
                dependant_count: dependants,
                minor_count: minors,
            }
        })
    }

    fn house_strategy() -> impl Strategy<Value = HouseSnapshot> {
        (-1i32..5, any::<bool>(), any::<bool>(), proptest::option::of(0.0f64..120.0)).prop_map(
            |(order, recognized, consent, share)| HouseSnapshot {
                id: format!("house-{}", order),
                house_name: format!("House {}", order),
                house_order: order,
                court_recognized: recognized,
                wives_consent_obtained: consent,
                house_share_percentage: share,
            },
        )
    }

    fn marriage_strategy() -> impl Strategy<Value = MarriageSnapshot> {
        (
            any::<bool>(),
            proptest::option::of("house-[0-4]"),
            proptest::sample::select(MarriageType::ALL.to_vec()),
            proptest::option::of("[A-Z]{2}/[0-9]{4}"),
        )
            .prop_map(|(is_polygamous, house, marriage_type, registration)| {
                MarriageSnapshot {
                    id: "m".to_string(),
                    is_polygamous,
                    polygamous_house_id: house,
                    marriage_type,
                    registration_number: registration,
                }
            })
    }

    /// Lower is worse
    fn standing(status: ComplianceStatus) -> u8 {
        match status {
            ComplianceStatus::NonCompliant => 0,
            ComplianceStatus::Partial | ComplianceStatus::RequiresReview => 1,
            ComplianceStatus::Compliant => 2,
            ComplianceStatus::NotApplicable => 3,
        }
    }

    fn guardianship_strategy() -> impl Strategy<Value = GuardianshipSnapshot> {
        (
            0u8..4,
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            0i64..900,
            proptest::option::of(0i64..900),
        )
            .prop_map(|(ward, active, bond_required, bond_posted, appointed, filed)| {
                let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
                GuardianshipSnapshot {
                    id: format!("g-{}", ward),
                    ward_id: format!("child-{}", ward),
                    guardian_id: "guardian-1".to_string(),
                    is_active: active,
                    ward_is_minor: true,
                    bond_required,
                    bond_posted,
                    appointed_on: base + Duration::days(appointed),
                    last_report_filed_on: filed.map(|days| base + Duration::days(days)),
                }
            })
    }

    fn unbonded_guardian() -> GuardianshipSnapshot {
        GuardianshipSnapshot {
            id: "g-unbonded".to_string(),
            ward_id: "child-unbonded".to_string(),
            guardian_id: "guardian-2".to_string(),
            is_active: true,
            ward_is_minor: true,
            bond_required: true,
            bond_posted: false,
            appointed_on: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            last_report_filed_on: None,
        }
    }

    fn unrecognised_house() -> HouseSnapshot {
        HouseSnapshot {
            id: "house-late".to_string(),
            house_name: "Late House".to_string(),
            house_order: 9,
            court_recognized: false,
            wives_consent_obtained: false,
            house_share_percentage: None,
        }
    }

    fn has_critical(result: &SectionComplianceResult) -> bool {
        result.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    fn as_of() -> NaiveDate {
        options().evaluated_at.date_naive()
    }

    proptest! {
        /// Identical snapshots and clock give identical reports
        #[test]
        fn report_is_idempotent(
            family in family_strategy(),
            houses in proptest::collection::vec(house_strategy(), 0..5),
            marriages in proptest::collection::vec(marriage_strategy(), 0..5),
        ) {
            let engine = ComplianceEngine::new();
            let mut aggregate = FamilyAggregate::new(family);
            aggregate.houses = houses;
            aggregate.marriages = marriages;
            prop_assert_eq!(
                engine.check_family(&aggregate, &options()),
                engine.check_family(&aggregate, &options())
            );
        }

        /// A section carrying a critical issue is always non-compliant
        #[test]
        fn critical_issue_means_non_compliant(
            family in family_strategy(),
            houses in proptest::collection::vec(house_strategy(), 0..5),
            marriages in proptest::collection::vec(marriage_strategy(), 0..5),
            guardianships in proptest::collection::vec(guardianship_strategy(), 0..5),
        ) {
            let results = [
                rules::s40_polygamy::check_polygamous_houses(&family, &houses, &marriages),
                rules::children_act::check_children(&family, &guardianships),
                rules::guardian_oversight::check_guardian_oversight(&guardianships, as_of()),
                rules::data_integrity::check_data_integrity(&houses, &marriages),
            ];
            for result in &results {
                if has_critical(result) {
                    prop_assert_eq!(result.status, ComplianceStatus::NonCompliant);
                }
            }
        }

        /// Adding a defective record never improves a section's status
        #[test]
        fn added_defect_never_improves_status(
            family in family_strategy(),
            houses in proptest::collection::vec(house_strategy(), 1..5),
            marriages in proptest::collection::vec(marriage_strategy(), 0..5),
            guardianships in proptest::collection::vec(guardianship_strategy(), 0..5),
        ) {
            let mut more_houses = houses.clone();
            more_houses.push(unrecognised_house());
            let before = rules::s40_polygamy::check_polygamous_houses(&family, &houses, &[]);
            let after = rules::s40_polygamy::check_polygamous_houses(&family, &more_houses, &[]);
            prop_assert!(standing(after.status) <= standing(before.status));

            let older = FamilySnapshot { minor_count: family.minor_count + 1, ..family.clone() };
            let before = rules::children_act::check_children(&family, &guardianships);
            let after = rules::children_act::check_children(&older, &guardianships);
            prop_assert!(standing(after.status) <= standing(before.status));

            let mut more_guardians = guardianships.clone();
            more_guardians.push(unbonded_guardian());
            let before =
                rules::guardian_oversight::check_guardian_oversight(&guardianships, as_of());
            let after =
                rules::guardian_oversight::check_guardian_oversight(&more_guardians, as_of());
            prop_assert!(standing(after.status) <= standing(before.status));

            let mut bad_order = houses.clone();
            bad_order.push(HouseSnapshot { house_order: 0, ..unrecognised_house() });
            let before = rules::data_integrity::check_data_integrity(&houses, &marriages);
            let after = rules::data_integrity::check_data_integrity(&bad_order, &marriages);
            prop_assert!(standing(after.status) <= standing(before.status));
        }

        /// A polygamous family without houses is non-compliant under s. 40
        #[test]
        fn missing_houses_are_critical(
            family in family_strategy(),
            marriages in proptest::collection::vec(marriage_strategy(), 0..5),
        ) {
            let family = FamilySnapshot { is_polygamous: true, ..family };
            let result = rules::s40_polygamy::check_polygamous_houses(&family, &[], &marriages);
            prop_assert!(has_critical(&result));
            prop_assert_eq!(standing(result.status), 0);
        }

        /// Non-polygamous families never get s. 40 issues
        #[test]
        fn monogamous_families_skip_s40(
            family in family_strategy(),
            houses in proptest::collection::vec(house_strategy(), 0..5),
            marriages in proptest::collection::vec(marriage_strategy(), 0..5),
        ) {
            let family = FamilySnapshot { is_polygamous: false, ..family };
            let report =
                ComplianceReportBuilder::build(&family, &houses, &marriages, &[], &options());
            prop_assert_eq!(report.sections.s40_polygamy.status, ComplianceStatus::NotApplicable);
            prop_assert!(report.sections.s40_polygamy.issues.is_empty());
            prop_assert_eq!(report.overall_score, 90);
        }

        /// The score only ever takes one of the four table values
        #[test]
        fn score_comes_from_table(
            family in family_strategy(),
            houses in proptest::collection::vec(house_strategy(), 0..5),
            marriages in proptest::collection::vec(marriage_strategy(), 0..5),
        ) {
            let report =
                ComplianceReportBuilder::build(&family, &houses, &marriages, &[], &options());
            prop_assert!([85u8, 65, 90, 40].contains(&report.overall_score));
            prop_assert_eq!(
                report.overall_score,
                ScoreAggregator::score_for(report.sections.s40_polygamy.status)
            );
        }

        /// Issue counts always add up to the issues in the sections
        #[test]
        fn issue_counts_match_sections(
            family in family_strategy(),
            houses in proptest::collection::vec(house_strategy(), 0..5),
            marriages in proptest::collection::vec(marriage_strategy(), 0..5),
        ) {
            let report =
                ComplianceReportBuilder::build(&family, &houses, &marriages, &[], &options());
            let counts = report.issue_counts;
            prop_assert_eq!(counts.total_issues as usize, report.sections.issues().count());
            prop_assert_eq!(
                counts.total_issues,
                counts.critical_issues
                    + counts.high_issues
                    + counts.medium_issues
                    + counts.low_issues
            );
        }
    }

    #[test]
    fn test_engine_lists_all_sections() {
        let engine = ComplianceEngine::new();
        assert_eq!(engine.sections().len(), 7);
        assert_eq!(engine.sections()[0], Section::S40Polygamy);
    }
}
