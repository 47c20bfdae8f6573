use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::Uri,
    Json,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::handlers::parse_query;
use crate::http::server::AppState;
use crate::model::{ContactSubmission, LeadUpdate};

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn list_leads(
    State(state): State<AppState>,
    uri: Uri,
) -> ApiResult<Json<Vec<ContactSubmission>>> {
    let params: LeadListParams = parse_query(&uri)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let status = params.status.as_deref().filter(|s| !s.is_empty());
    let leads = state.directory.list_submissions(status, limit).await?;
    Ok(Json(leads))
}

/// Extractor failures are folded into `ApiError` so every reply is JSON.
pub async fn update_lead(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    update: Result<Json<LeadUpdate>, JsonRejection>,
) -> ApiResult<Json<ContactSubmission>> {
    let Path(id) = id?;
    let Json(update) = update?;
    if update.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    let lead = state
        .directory
        .update_submission(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Lead not found"))?;

    tracing::info!(lead_id = id, status = %lead.status, contacted = lead.contacted, "Lead updated");
    Ok(Json(lead))
}
