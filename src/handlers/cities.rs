use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::content::describe_city;
use crate::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::model::{CityView, FacilityQuery};

async fn find(state: &AppState, state_slug: &str, city_slug: &str) -> ApiResult<CityView> {
    state
        .directory
        .city_by_slugs(state_slug, city_slug)
        .await?
        .ok_or_else(|| ApiError::not_found("City not found"))
}

pub async fn detail(state: &AppState, state_slug: &str, city_slug: &str) -> ApiResult<Response> {
    let city = find(state, state_slug, city_slug).await?;
    Ok(Json(city).into_response())
}

pub async fn facilities(
    state: &AppState,
    state_slug: &str,
    city_slug: &str,
) -> ApiResult<Response> {
    let city = find(state, state_slug, city_slug).await?;
    let facilities = state
        .directory
        .facilities(&FacilityQuery {
            city_id: Some(city.city.id),
            ..FacilityQuery::default()
        })
        .await?;
    Ok(Json(facilities).into_response())
}

pub async fn description(
    state: &AppState,
    state_slug: &str,
    city_slug: &str,
) -> ApiResult<Response> {
    let city = find(state, state_slug, city_slug).await?;
    let content = describe_city(state.directory.as_ref(), &city).await?;
    Ok(Json(content).into_response())
}
