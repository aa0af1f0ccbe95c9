//! Overall score for a family
//!
//! Only the s. 40 section drives the score. The other sections are
//! informational and show up in the report's issues and recommendations.

use serde::{Deserialize, Serialize};
use shared_types::{ComplianceStatus, OverallStatus, SectionComplianceResult};

pub const COMPLIANT_SCORE: u8 = 85;
pub const PARTIAL_SCORE: u8 = 65;
pub const NOT_APPLICABLE_SCORE: u8 = 90;
pub const NON_COMPLIANT_SCORE: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub overall_score: u8,
    pub overall_status: OverallStatus,
}

pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn aggregate(s40: &SectionComplianceResult) -> ScoreSummary {
        let overall_score = Self::score_for(s40.status);
        ScoreSummary {
            overall_score,
            overall_status: Self::status_for_score(overall_score),
        }
    }

    /// s. 40 never reports `RequiresReview`; it scores as partial so the
    /// mapping stays total.
    pub fn score_for(status: ComplianceStatus) -> u8 {
        match status {
            ComplianceStatus::Compliant => COMPLIANT_SCORE,
            ComplianceStatus::Partial | ComplianceStatus::RequiresReview => PARTIAL_SCORE,
            ComplianceStatus::NotApplicable => NOT_APPLICABLE_SCORE,
            ComplianceStatus::NonCompliant => NON_COMPLIANT_SCORE,
        }
    }

    pub fn status_for_score(score: u8) -> OverallStatus {
        match score {
            80.. => OverallStatus::Compliant,
            60..=79 => OverallStatus::Partial,
            40..=59 => OverallStatus::NonCompliant,
            _ => OverallStatus::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Section, SectionDetails};

    fn s40(status: ComplianceStatus) -> SectionComplianceResult {
        SectionComplianceResult {
            section: Section::S40Polygamy,
            status,
            issues: Vec::new(),
            details: SectionDetails::Polygamy {
                houses: 0,
                court_recognized_houses: 0,
                houses_with_consent: 0,
                polygamous_marriages: 0,
                marriages_without_house: 0,
            },
        }
    }

    #[test]
    fn test_score_table() {
        let cases = [
            (ComplianceStatus::Compliant, 85, OverallStatus::Compliant),
            (ComplianceStatus::Partial, 65, OverallStatus::Partial),
            (ComplianceStatus::NotApplicable, 90, OverallStatus::Compliant),
            (ComplianceStatus::NonCompliant, 40, OverallStatus::NonCompliant),
        ];
        for (status, score, overall) in cases {
            let summary = ScoreAggregator::aggregate(&s40(status));
            assert_eq!(summary.overall_score, score, "{:?}", status);
            assert_eq!(summary.overall_status, overall, "{:?}", status);
        }
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(ScoreAggregator::status_for_score(100), OverallStatus::Compliant);
        assert_eq!(ScoreAggregator::status_for_score(80), OverallStatus::Compliant);
        assert_eq!(ScoreAggregator::status_for_score(79), OverallStatus::Partial);
        assert_eq!(ScoreAggregator::status_for_score(60), OverallStatus::Partial);
        assert_eq!(ScoreAggregator::status_for_score(59), OverallStatus::NonCompliant);
        assert_eq!(ScoreAggregator::status_for_score(40), OverallStatus::NonCompliant);
        assert_eq!(ScoreAggregator::status_for_score(39), OverallStatus::Critical);
        assert_eq!(ScoreAggregator::status_for_score(0), OverallStatus::Critical);
    }

    #[test]
    fn test_score_ignores_issue_list() {
        let mut with_issues = s40(ComplianceStatus::Compliant);
        with_issues.issues.push(shared_types::Issue::new(
            "X",
            shared_types::Severity::Critical,
            "x",
            "x",
            "x",
            "x",
        ));
        assert_eq!(ScoreAggregator::aggregate(&with_issues).overall_score, 85);
    }
}
