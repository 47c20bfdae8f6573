use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::content::describe_state;
use crate::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::model::StateDetail;

pub async fn list(state: &AppState) -> ApiResult<Response> {
    let states = state.directory.list_states().await?;
    Ok(Json(states).into_response())
}

pub async fn detail(state: &AppState, slug: &str) -> ApiResult<Response> {
    let found = state
        .directory
        .state_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found("State not found"))?;
    let cities = state.directory.cities_in_state(found.id).await?;
    Ok(Json(StateDetail {
        state: found,
        cities,
    })
    .into_response())
}

pub async fn description(state: &AppState, slug: &str) -> ApiResult<Response> {
    let found = state
        .directory
        .state_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found("State not found"))?;
    let content = describe_state(state.directory.as_ref(), &found).await?;
    Ok(Json(content).into_response())
}

pub async fn categories(state: &AppState) -> ApiResult<Response> {
    let categories = state.directory.list_categories().await?;
    Ok(Json(categories).into_response())
}
