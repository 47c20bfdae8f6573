use axum::response::{IntoResponse, Response};

use crate::error::{ApiError, ApiResult};
use crate::http::response::Xml;
use crate::http::server::AppState;
use crate::sitemap::{site_sitemap, state_sitemap};

pub async fn site(state: &AppState) -> ApiResult<Response> {
    let doc = site_sitemap(state.directory.as_ref(), &state.site.base_url).await?;
    Ok(Xml(doc).into_response())
}

pub async fn for_state(state: &AppState, state_slug: &str) -> ApiResult<Response> {
    let doc = state_sitemap(state.directory.as_ref(), &state.site.base_url, state_slug)
        .await?
        .ok_or_else(|| ApiError::not_found("State not found"))?;
    Ok(Xml(doc).into_response())
}
