use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::content::describe_facility;
use crate::error::{ApiError, ApiResult};
use crate::handlers::parse_query;
use crate::http::server::AppState;
use crate::model::facility::strip_url_suffix;
use crate::model::{FacilityQuery, FacilityView};

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 1000;
pub const NEIGHBOUR_LIMIT: i64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    city_id: Option<i32>,
    limit: Option<i64>,
}

pub async fn list(state: &AppState, uri: &Uri) -> ApiResult<Response> {
    let params: ListParams = parse_query(uri)?;
    let query = FacilityQuery {
        city_id: params.city_id,
        limit: Some(
            params
                .limit
                .unwrap_or(DEFAULT_LIST_LIMIT)
                .clamp(1, MAX_LIST_LIMIT),
        ),
        ..FacilityQuery::default()
    };
    let facilities = state.directory.facilities(&query).await?;
    Ok(Json(facilities).into_response())
}

async fn by_slugs(
    state: &AppState,
    state_slug: &str,
    city_slug: &str,
    facility_segment: &str,
) -> ApiResult<FacilityView> {
    let facility_slug = strip_url_suffix(facility_segment);
    state
        .directory
        .facility_by_slugs(state_slug, city_slug, facility_slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Facility not found"))
}

pub async fn detail(
    state: &AppState,
    state_slug: &str,
    city_slug: &str,
    facility_segment: &str,
) -> ApiResult<Response> {
    let view = by_slugs(state, state_slug, city_slug, facility_segment).await?;
    Ok(Json(view).into_response())
}

pub async fn description(
    state: &AppState,
    state_slug: &str,
    city_slug: &str,
    facility_segment: &str,
) -> ApiResult<Response> {
    let view = by_slugs(state, state_slug, city_slug, facility_segment).await?;
    let content = describe_facility(state.directory.as_ref(), &view).await?;
    Ok(Json(content).into_response())
}

/// Which neighbours of a facility to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbours {
    /// Same city.
    Nearby,
    /// Same category.
    Related,
}

/// A non-numeric id is a malformed path and answers like an unmatched route.
pub async fn neighbours(state: &AppState, id: &str, kind: Neighbours) -> ApiResult<Response> {
    let id: i32 = id
        .parse()
        .map_err(|_| ApiError::not_found("Route not found"))?;

    let Some(source) = state.directory.facility_by_id(id).await? else {
        return Ok(Json(Vec::<FacilityView>::new()).into_response());
    };

    let query = match kind {
        Neighbours::Nearby => FacilityQuery::nearby(&source, NEIGHBOUR_LIMIT),
        Neighbours::Related => FacilityQuery::related(&source, NEIGHBOUR_LIMIT),
    };
    let facilities = state.directory.facilities(&query).await?;
    Ok(Json(facilities).into_response())
}
