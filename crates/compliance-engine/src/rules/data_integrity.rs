// Consistency checks over house and marriage records
use std::collections::{BTreeMap, BTreeSet};

use shared_types::{
    law, ComplianceStatus, HouseSnapshot, Issue, MarriageSnapshot, Section,
    SectionComplianceResult, SectionDetails, Severity,
};

use super::status_from_issues;

const WHOLE_ESTATE_HUNDREDTHS: i64 = 100 * 100;

const FIX_RECORD: &str = "Correct the family record so that it reflects the actual households.";

/// Flags records the statutory checks silently rely on being consistent.
/// Every finding is LOW and none of them changes the s. 40 outcome.
pub fn check_data_integrity(
    houses: &[HouseSnapshot],
    marriages: &[MarriageSnapshot],
) -> SectionComplianceResult {
    let mut issues = Vec::new();

    issues.extend(check_house_orders(houses));
    issues.extend(check_house_shares(houses));
    issues.extend(check_marriage_houses(houses, marriages));

    let status = if houses.is_empty() && marriages.is_empty() {
        ComplianceStatus::NotApplicable
    } else {
        status_from_issues(&issues)
    };

    SectionComplianceResult {
        section: Section::DataIntegrity,
        status,
        issues,
        details: SectionDetails::DataIntegrity {
            houses_checked: houses.len() as u32,
            marriages_checked: marriages.len() as u32,
        },
    }
}

fn integrity_issue(code: &str, title: &str, description: String) -> Issue {
    Issue::new(
        code,
        Severity::Low,
        title,
        description,
        law::DATA_INTEGRITY,
        FIX_RECORD,
    )
}

fn check_house_orders(houses: &[HouseSnapshot]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: BTreeMap<i32, &str> = BTreeMap::new();

    for house in houses {
        if house.house_order < 1 {
            issues.push(
                integrity_issue(
                    "DATA_INTEGRITY_INVALID_HOUSE_ORDER",
                    "Invalid house order",
                    format!(
                        "House '{}' has order {}; house orders start at 1.",
                        house.house_name, house.house_order
                    ),
                )
                .affecting(&house.id),
            );
            continue;
        }

        if let Some(first) = seen.get(&house.house_order) {
            let issue = if house.is_senior() {
                integrity_issue(
                    "DATA_INTEGRITY_DUPLICATE_SENIOR_HOUSE",
                    "More than one senior house",
                    format!(
                        "House '{}' and house '{}' both claim order 1; only one house can be \
                         the senior house.",
                        first, house.house_name
                    ),
                )
            } else {
                integrity_issue(
                    "DATA_INTEGRITY_DUPLICATE_HOUSE_ORDER",
                    "Duplicate house order",
                    format!(
                        "House '{}' and house '{}' share order {}.",
                        first, house.house_name, house.house_order
                    ),
                )
            };
            issues.push(issue.affecting(&house.id));
        } else {
            seen.insert(house.house_order, &house.house_name);
        }
    }

    issues
}

/// Shares are summed in hundredths of a percent.
fn check_house_shares(houses: &[HouseSnapshot]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut total_hundredths: i64 = 0;

    for house in houses {
        let Some(share) = house.house_share_percentage else {
            continue;
        };
        if !(0.0..=100.0).contains(&share) {
            issues.push(
                integrity_issue(
                    "DATA_INTEGRITY_INVALID_HOUSE_SHARE",
                    "House share out of range",
                    format!(
                        "House '{}' has a share of {}%; shares must be between 0 and 100.",
                        house.house_name, share
                    ),
                )
                .affecting(&house.id),
            );
        } else {
            total_hundredths += (share * 100.0).round() as i64;
        }
    }

    if total_hundredths > WHOLE_ESTATE_HUNDREDTHS {
        issues.push(integrity_issue(
            "DATA_INTEGRITY_HOUSE_SHARES_EXCEED_TOTAL",
            "House shares exceed the estate",
            format!(
                "House shares add up to {:.2}%, more than the whole estate.",
                total_hundredths as f64 / 100.0
            ),
        ));
    }

    issues
}

fn check_marriage_houses(houses: &[HouseSnapshot], marriages: &[MarriageSnapshot]) -> Vec<Issue> {
    let known: BTreeSet<&str> = houses.iter().map(|h| h.id.as_str()).collect();

    marriages
        .iter()
        .filter_map(|m| {
            let house_id = m.polygamous_house_id.as_deref()?;
            if known.contains(house_id) {
                return None;
            }
            Some(
                integrity_issue(
                    "DATA_INTEGRITY_UNKNOWN_HOUSE",
                    "Marriage linked to an unknown house",
                    format!(
                        "Marriage '{}' refers to house '{}', which is not part of this family.",
                        m.id, house_id
                    ),
                )
                .affecting(&m.id),
            )
        })
        .collect()
}
