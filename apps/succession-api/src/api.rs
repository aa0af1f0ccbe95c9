//! API handlers for the succession compliance server
//!
//! Provides REST endpoints for:
//! - Evaluating a posted family aggregate
//! - Reports for stored families, singly or in batches
//! - Listing the statutory sections a report covers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, info};

use compliance_engine::ComplianceReportBuilder;
use shared_types::{ComplianceReport, FamilyAggregate, Section};

use crate::error::ServerError;
use crate::AppState;

/// Largest batch accepted by POST /api/compliance/batch
pub const MAX_BATCH_SIZE: usize = 500;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub families_loaded: usize,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "succession-api",
        version: env!("CARGO_PKG_VERSION"),
        families_loaded: state.service.source().len(),
    })
}

/// Statute list response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuteListResponse {
    pub success: bool,
    pub sections: Vec<StatuteInfo>,
    pub count: usize,
}

/// One section evaluated in every report
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuteInfo {
    pub section: Section,
    pub title: &'static str,
    pub law_reference: &'static str,
    /// Only s. 40 moves the overall score
    pub drives_score: bool,
}

/// Handler: GET /api/statutes
pub async fn handle_list_statutes() -> Json<StatuteListResponse> {
    let sections: Vec<StatuteInfo> = Section::ALL
        .iter()
        .map(|section| StatuteInfo {
            section: *section,
            title: section.title(),
            law_reference: section.law_reference(),
            drives_score: *section == Section::S40Polygamy,
        })
        .collect();

    let count = sections.len();

    Json(StatuteListResponse {
        success: true,
        sections,
        count,
    })
}

/// Compliance check request: a family aggregate plus report switches
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequest {
    #[serde(flatten)]
    pub aggregate: FamilyAggregate,

    /// Include recommendations in the report
    #[serde(default = "default_include_recommendations")]
    pub include_recommendations: bool,
}

fn default_include_recommendations() -> bool {
    true
}

/// Compliance report response
#[derive(Serialize)]
pub struct ComplianceResponse {
    pub success: bool,
    pub report: ComplianceReport,
}

/// Handler: POST /api/compliance
pub async fn handle_check_compliance(
    State(state): State<AppState>,
    Json(req): Json<ComplianceRequest>,
) -> Result<Json<ComplianceResponse>, ServerError> {
    let family = &req.aggregate.family;
    if family.id.trim().is_empty() {
        return Err(ServerError::InvalidRequest(
            "family.id must not be empty".to_string(),
        ));
    }

    info!(
        "Compliance check: family={}, houses={}, marriages={}",
        family.id,
        req.aggregate.houses.len(),
        req.aggregate.marriages.len()
    );

    let options = state.report_options(req.include_recommendations);
    let report = ComplianceReportBuilder::build_aggregate(&req.aggregate, &options);

    debug!(
        "Family {} scored {} ({:?})",
        report.family_id, report.overall_score, report.overall_status
    );

    Ok(Json(ComplianceResponse {
        success: true,
        report,
    }))
}

/// Handler: GET /api/families/:id/compliance
pub async fn handle_family_compliance(
    State(state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<ComplianceResponse>, ServerError> {
    info!("Stored family compliance check: family={}", family_id);

    let options = state.report_options(true);
    let report = state.service.check_family(&family_id, &options)?;

    Ok(Json(ComplianceResponse {
        success: true,
        report,
    }))
}

/// Batch request body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub family_ids: Vec<String>,

    #[serde(default = "default_include_recommendations")]
    pub include_recommendations: bool,
}

/// Batch response
#[derive(Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<BatchEntry>,
    pub evaluated: usize,
    pub failed: usize,
}

/// Outcome for one family in a batch, in request order
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub family_id: String,
    pub report: Option<ComplianceReport>,
    pub error: Option<String>,
    pub code: Option<String>,
}

/// Handler: POST /api/compliance/batch
///
/// Each family is evaluated on its own blocking task; the results are put
/// back in request order.
pub async fn handle_batch_compliance(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ServerError> {
    if req.family_ids.is_empty() {
        return Err(ServerError::InvalidRequest(
            "familyIds must contain at least one id".to_string(),
        ));
    }
    if req.family_ids.len() > MAX_BATCH_SIZE {
        return Err(ServerError::InvalidRequest(format!(
            "Batch of {} families exceeds the limit of {}",
            req.family_ids.len(),
            MAX_BATCH_SIZE
        )));
    }

    info!("Batch compliance check: {} families", req.family_ids.len());

    let options = state.report_options(req.include_recommendations);
    let mut tasks = JoinSet::new();
    for (index, family_id) in req.family_ids.into_iter().enumerate() {
        let service = state.service.clone();
        tasks.spawn_blocking(move || {
            let result = service.check_family(&family_id, &options);
            (index, family_id, result)
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, family_id, result) =
            joined.map_err(|e| ServerError::Internal(format!("Batch task failed: {}", e)))?;
        let entry = match result {
            Ok(report) => BatchEntry {
                family_id,
                report: Some(report),
                error: None,
                code: None,
            },
            Err(err) => {
                let err = ServerError::from(err);
                BatchEntry {
                    family_id,
                    report: None,
                    error: Some(err.to_string()),
                    code: Some(err.code().to_string()),
                }
            }
        };
        results.push((index, entry));
    }
    results.sort_by_key(|(index, _)| *index);

    let results: Vec<BatchEntry> = results.into_iter().map(|(_, entry)| entry).collect();
    let failed = results.iter().filter(|e| e.report.is_none()).count();

    Ok(Json(BatchResponse {
        success: true,
        evaluated: results.len() - failed,
        failed,
        results,
    }))
}
