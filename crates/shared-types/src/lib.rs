pub mod compliance;
pub mod law;
pub mod types;

pub use compliance::{
    ComplianceReport, ComplianceStatus, Issue, IssueCounts, OverallStatus, ReportSections,
    Section, SectionComplianceResult, SectionDetails, Severity,
};
pub use types::{
    FamilyAggregate, FamilySnapshot, GuardianshipSnapshot, HouseSnapshot, MarriageSnapshot,
    MarriageType,
};
