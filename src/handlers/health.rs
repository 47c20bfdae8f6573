use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::ApiResult;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub database: &'static str,
    pub version: &'static str,
}

pub async fn check(state: &AppState) -> ApiResult<Response> {
    let database = match state.directory.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unavailable");
            "unavailable"
        }
    };
    Ok(Json(HealthStatus {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
    .into_response())
}
