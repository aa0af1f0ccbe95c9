// Polygamous household requirements per Law of Succession Act s. 40
use shared_types::{
    law, ComplianceStatus, FamilySnapshot, HouseSnapshot, Issue, MarriageSnapshot, Section,
    SectionComplianceResult, SectionDetails, Severity,
};

use super::{count, status_from_issues};

/// Checks that a polygamous family's houses are established and recognised.
///
/// Non-polygamous families are not subject to s. 40 and always come back
/// `NotApplicable` with no issues, whatever house data is attached.
pub fn check_polygamous_houses(
    family: &FamilySnapshot,
    houses: &[HouseSnapshot],
    polygamous_marriages: &[MarriageSnapshot],
) -> SectionComplianceResult {
    let details = SectionDetails::Polygamy {
        houses: houses.len() as u32,
        court_recognized_houses: count(houses.iter().filter(|h| h.court_recognized)),
        houses_with_consent: count(houses.iter().filter(|h| h.wives_consent_obtained)),
        polygamous_marriages: polygamous_marriages.len() as u32,
        marriages_without_house: count(
            polygamous_marriages
                .iter()
                .filter(|m| m.polygamous_house_id.is_none()),
        ),
    };

    if !family.is_polygamous {
        return SectionComplianceResult {
            section: Section::S40Polygamy,
            status: ComplianceStatus::NotApplicable,
            issues: Vec::new(),
            details,
        };
    }

    let mut issues = Vec::new();

    if houses.is_empty() {
        issues.push(
            Issue::new(
                "S40_NO_HOUSES",
                Severity::Critical,
                "No polygamous houses defined",
                format!(
                    "Family '{}' is recorded as polygamous but has no houses. The estate \
                     cannot be divided among houses under s. 40 until each house is \
                     established.",
                    family.name
                ),
                law::S40,
                "Establish a house for each wife and her children before the estate is \
                 distributed.",
            )
            .affecting(&family.id),
        );
    }

    for house in houses.iter().filter(|h| h.is_subsequent()) {
        if !house.court_recognized {
            issues.push(
                Issue::new(
                    "S40_NO_CERTIFICATE",
                    Severity::High,
                    "House not recognised by the court",
                    format!(
                        "House '{}' (order {}) has no court certificate recognising it as a \
                         house of the family.",
                        house.house_name, house.house_order
                    ),
                    law::S40,
                    format!(
                        "Apply to court for a certificate recognising '{}' as a polygamous house.",
                        house.house_name
                    ),
                )
                .affecting(&house.id),
            );
        }

        if !house.wives_consent_obtained {
            issues.push(
                Issue::new(
                    "S40_NO_CONSENT",
                    Severity::High,
                    "Consent of existing wives not recorded",
                    format!(
                        "House '{}' (order {}) was added without recorded consent from the \
                         existing wives.",
                        house.house_name, house.house_order
                    ),
                    law::S40,
                    format!(
                        "Obtain and record the existing wives' consent for house '{}'.",
                        house.house_name
                    ),
                )
                .affecting(&house.id),
            );
        }
    }

    for marriage in polygamous_marriages
        .iter()
        .filter(|m| m.polygamous_house_id.is_none())
    {
        issues.push(
            Issue::new(
                "S40_MARRIAGE_NO_HOUSE",
                Severity::Medium,
                "Polygamous marriage not assigned to a house",
                format!(
                    "Marriage '{}' is polygamous but is not linked to any house, so its \
                     children cannot be placed for per stirpes distribution.",
                    marriage.id
                ),
                law::S40,
                "Assign the marriage to the house it belongs to.",
            )
            .affecting(&marriage.id),
        );
    }

    SectionComplianceResult {
        section: Section::S40Polygamy,
        status: status_from_issues(&issues),
        issues,
        details,
    }
}
