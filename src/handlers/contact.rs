use axum::body::Bytes;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::leads::ContactForm;
use crate::observability::metrics;

pub async fn submit(state: &AppState, body: &Bytes) -> ApiResult<Response> {
    let form: ContactForm = if body.is_empty() {
        ContactForm::default()
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::bad_request(format!("Invalid contact form: {e}")))?
    };

    let lead = state
        .directory
        .insert_submission(form.into_submission())
        .await?;
    metrics::record_lead(&lead.subject);
    tracing::info!(lead_id = lead.id, subject = %lead.subject, "Contact submission stored");

    state.forwarder.spawn_forward(lead.clone());

    Ok(Json(json!({
        "message": "Contact form submitted successfully",
        "submission": lead,
    }))
    .into_response())
}
