//! Per-route request handlers.
//!
//! Each handler receives the shared `AppState` plus the values the
//! dispatcher pulled out of the path, query string or body, and returns a
//! ready response or an `ApiError`.

pub mod cities;
pub mod contact;
pub mod content;
pub mod facilities;
pub mod health;
pub mod search;
pub mod sitemap;
pub mod states;

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Query};
use axum::http::{Request, Uri};
use serde::de::DeserializeOwned;

use crate::error::ApiResult;

/// Parse the query string of `uri` into `T`; malformed values are a 400.
pub(crate) fn parse_query<T: DeserializeOwned>(uri: &Uri) -> ApiResult<T> {
    let Query(value) = Query::<T>::try_from_uri(uri)?;
    Ok(value)
}

/// Buffer the request body; over the configured limit is a 413.
pub(crate) async fn read_body(request: Request<Body>) -> ApiResult<Bytes> {
    Ok(Bytes::from_request(request, &()).await?)
}
