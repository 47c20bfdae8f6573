//! Best-effort spreadsheet forwarding.
//!
//! # Responsibilities
//! - Flatten a stored lead into a fixed-order row
//! - Append the row to the configured sheet endpoint
//! - Log and count failures without surfacing them
//!
//! # Design Decisions
//! - Fire-and-forget: runs in a spawned task after the lead is persisted
//! - Attempted once; no retries
//! - Unconfigured endpoint is a silent skip, not an error

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::config::SheetsConfig;
use crate::model::ContactSubmission;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("sheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheet endpoint returned {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Sent,
    Skipped,
}

/// Flatten a lead into sheet columns: timestamp, name, email, phone, inquiry
/// type, subject, diagnosis, diagnosis timeline, pathology report, message,
/// status.
pub fn sheet_row(lead: &ContactSubmission) -> Vec<String> {
    vec![
        lead.created_at.to_rfc3339(),
        lead.name.clone(),
        lead.email.clone(),
        lead.phone.clone(),
        lead.inquiry_type.clone(),
        lead.subject.clone(),
        lead.diagnosis.clone(),
        lead.diagnosis_timeline.clone(),
        lead.pathology_report.clone(),
        lead.message.clone(),
        lead.status.clone(),
    ]
}

/// Appends leads to an external spreadsheet over HTTP.
pub struct LeadForwarder {
    client: reqwest::Client,
    endpoint: Option<String>,
    token: Option<String>,
}

impl LeadForwarder {
    pub fn new(config: &SheetsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    "Failed to build sheet client, falling back to one without a timeout"
                );
                reqwest::Client::new()
            });
        Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        }
    }

    /// Forwarder that never sends anything.
    pub fn disabled() -> Self {
        Self::new(&SheetsConfig::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Send one row. Errors are returned to the caller.
    pub async fn forward(&self, lead: &ContactSubmission) -> Result<ForwardOutcome, ForwardError> {
        let Some(endpoint) = &self.endpoint else {
            tracing::debug!(lead_id = lead.id, "Sheet forwarding not configured, skipping");
            return Ok(ForwardOutcome::Skipped);
        };

        let mut request = self
            .client
            .post(endpoint)
            .json(&json!({ "values": [sheet_row(lead)] }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status));
        }

        tracing::info!(lead_id = lead.id, "Lead forwarded to sheet");
        Ok(ForwardOutcome::Sent)
    }

    /// Forward in the background; failures are logged and counted only.
    pub fn spawn_forward(self: &Arc<Self>, lead: ContactSubmission) -> tokio::task::JoinHandle<()> {
        let forwarder = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = forwarder.forward(&lead).await {
                tracing::warn!(lead_id = lead.id, error = %e, "Failed to forward lead to sheet");
                metrics::record_forward_failure();
            }
        })
    }
}
