use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::handlers::parse_query;
use crate::http::server::AppState;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<i64>,
}

pub async fn search(state: &AppState, uri: &Uri) -> ApiResult<Response> {
    let params: SearchParams = parse_query(uri)?;
    let term = params.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(ApiError::bad_request("Search query is required"));
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let results = state.directory.search_facilities(term, limit).await?;
    tracing::debug!(term, hits = results.len(), "Search completed");
    Ok(Json(results).into_response())
}
