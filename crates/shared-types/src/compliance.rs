//! Issues, section results and the compliance report

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MarriageType;

/// Issue severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable identifier, e.g. "S40_NO_CONSENT"
    pub code: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub law_reference: String,
    #[serde(default)]
    pub affected_id: Option<String>,
    pub recommendation: String,
    #[serde(default)]
    pub is_resolved: bool,
}

impl Issue {
    pub fn new(
        code: &str,
        severity: Severity,
        title: &str,
        description: impl Into<String>,
        law_reference: &str,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            code: code.to_string(),
            severity,
            title: title.to_string(),
            description: description.into(),
            law_reference: law_reference.to_string(),
            affected_id: None,
            recommendation: recommendation.into(),
            is_resolved: false,
        }
    }

    pub fn affecting(mut self, id: impl Into<String>) -> Self {
        self.affected_id = Some(id.into());
        self
    }

    /// Unresolved HIGH and CRITICAL issues each carry a recommendation into the report
    pub fn needs_action(&self) -> bool {
        !self.is_resolved && self.severity >= Severity::High
    }
}

/// Status of one statutory section.
///
/// `RequiresReview` marks sections whose outcome depends on facts the engine
/// does not hold (dependants' claims, guardianship orders, marriage records).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    Partial,
    NonCompliant,
    NotApplicable,
    RequiresReview,
}

/// Family-wide status derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Compliant,
    Partial,
    NonCompliant,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    S40Polygamy,
    S29Dependants,
    S70Guardianship,
    MarriageAct,
    ChildrenAct,
    GuardianOversight,
    DataIntegrity,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::S40Polygamy,
        Section::S29Dependants,
        Section::S70Guardianship,
        Section::MarriageAct,
        Section::ChildrenAct,
        Section::GuardianOversight,
        Section::DataIntegrity,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::S40Polygamy => "Polygamous households",
            Section::S29Dependants => "Provision for dependants",
            Section::S70Guardianship => "Guardianship of minors",
            Section::MarriageAct => "Marriage registration",
            Section::ChildrenAct => "Care of children",
            Section::GuardianOversight => "Guardian bonds and annual accounts",
            Section::DataIntegrity => "Family record integrity",
        }
    }

    pub fn law_reference(&self) -> &'static str {
        match self {
            Section::S40Polygamy => crate::law::S40,
            Section::S29Dependants => crate::law::S29,
            Section::S70Guardianship => crate::law::S70,
            Section::MarriageAct => crate::law::MARRIAGE_ACT,
            Section::ChildrenAct => crate::law::CHILDREN_ACT,
            Section::GuardianOversight => crate::law::S72_S73,
            Section::DataIntegrity => crate::law::DATA_INTEGRITY,
        }
    }
}

/// Section-specific counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SectionDetails {
    Polygamy {
        houses: u32,
        court_recognized_houses: u32,
        houses_with_consent: u32,
        polygamous_marriages: u32,
        marriages_without_house: u32,
    },
    Dependants {
        potential_dependants: u32,
    },
    Guardianship {
        minors: u32,
    },
    Marriages {
        total: u32,
        by_type: BTreeMap<MarriageType, u32>,
        registered: u32,
        unregistered: u32,
    },
    Children {
        minors: u32,
        minors_with_guardian: u32,
        minors_without_guardian: u32,
    },
    GuardianOversight {
        active_guardianships: u32,
        bonds_required: u32,
        bonds_posted: u32,
        reports_overdue: u32,
    },
    DataIntegrity {
        houses_checked: u32,
        marriages_checked: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionComplianceResult {
    pub section: Section,
    pub status: ComplianceStatus,
    pub issues: Vec<Issue>,
    pub details: SectionDetails,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCounts {
    pub total_issues: u32,
    pub critical_issues: u32,
    pub high_issues: u32,
    pub medium_issues: u32,
    pub low_issues: u32,
    pub resolved_issues: u32,
}

impl IssueCounts {
    pub fn tally<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            counts.total_issues += 1;
            match issue.severity {
                Severity::Critical => counts.critical_issues += 1,
                Severity::High => counts.high_issues += 1,
                Severity::Medium => counts.medium_issues += 1,
                Severity::Low => counts.low_issues += 1,
            }
            if issue.is_resolved {
                counts.resolved_issues += 1;
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSections {
    pub s40_polygamy: SectionComplianceResult,
    pub s29_dependants: SectionComplianceResult,
    pub s70_guardianship: SectionComplianceResult,
    pub marriage_act: SectionComplianceResult,
    pub children_act: SectionComplianceResult,
    pub guardian_oversight: SectionComplianceResult,
    pub data_integrity: SectionComplianceResult,
}

impl ReportSections {
    /// Sections in report order
    pub fn iter(&self) -> impl Iterator<Item = &SectionComplianceResult> {
        [
            &self.s40_polygamy,
            &self.s29_dependants,
            &self.s70_guardianship,
            &self.marriage_act,
            &self.children_act,
            &self.guardian_oversight,
            &self.data_integrity,
        ]
        .into_iter()
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.iter().flat_map(|s| s.issues.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub family_id: String,
    pub family_name: String,
    pub overall_score: u8,
    pub overall_status: OverallStatus,
    pub sections: ReportSections,
    pub issue_counts: IssueCounts,
    pub recommendations: Vec<String>,
    pub checked_at: DateTime<Utc>,
    pub next_check_due: DateTime<Utc>,
}
