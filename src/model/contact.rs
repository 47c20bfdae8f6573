//! Contact-form submissions (leads).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status assigned to freshly submitted leads.
pub const STATUS_NEW: &str = "new";
/// Priority assigned to freshly submitted leads.
pub const PRIORITY_NORMAL: &str = "normal";

/// A stored lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub inquiry_type: String,
    pub subject: String,
    pub message: String,
    pub diagnosis: String,
    pub pathology_report: String,
    pub diagnosis_timeline: String,
    pub status: String,
    pub priority: String,
    pub notes: String,
    pub contacted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for a lead about to be inserted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub inquiry_type: String,
    pub subject: String,
    pub message: String,
    pub diagnosis: String,
    pub pathology_report: String,
    pub diagnosis_timeline: String,
}

/// Admin review changes; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
    pub contacted: Option<bool>,
}

impl LeadUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.notes.is_none()
            && self.contacted.is_none()
    }

    /// Applies the update in place, refreshing `updated_at`.
    pub fn apply(&self, lead: &mut ContactSubmission, now: DateTime<Utc>) {
        if let Some(status) = &self.status {
            lead.status = status.clone();
        }
        if let Some(priority) = &self.priority {
            lead.priority = priority.clone();
        }
        if let Some(notes) = &self.notes {
            lead.notes = notes.clone();
        }
        if let Some(contacted) = self.contacted {
            lead.contacted = contacted;
        }
        lead.updated_at = now;
    }
}
