use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::model::TemplateType;

pub async fn template(state: &AppState, kind: &str, name: &str) -> ApiResult<Response> {
    let kind: TemplateType = kind
        .parse()
        .map_err(|_| ApiError::not_found("Content template not found"))?;
    let template = state
        .directory
        .content_template(kind, name)
        .await?
        .ok_or_else(|| ApiError::not_found("Content template not found"))?;
    Ok(Json(template).into_response())
}
