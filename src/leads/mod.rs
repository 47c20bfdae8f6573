//! Lead intake.
//!
//! # Data Flow
//! ```text
//! POST /api/contact (ContactForm JSON)
//!     → subject.rs (diagnosis → subject line)
//!     → Directory::insert_submission
//!     → forwarder.rs (spawned, best-effort spreadsheet append)
//! ```
//!
//! # Design Decisions
//! - No server-side presence validation; absent fields become empty strings
//! - Forwarding never affects the HTTP response

pub mod forwarder;
pub mod subject;

use serde::Deserialize;

use crate::model::NewSubmission;

pub use forwarder::{sheet_row, ForwardError, ForwardOutcome, LeadForwarder};
pub use subject::subject_for;

/// Contact form body as posted by the site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub inquiry_type: Option<String>,
    pub message: Option<String>,
    pub diagnosis: Option<String>,
    pub pathology_report: Option<String>,
    pub diagnosis_timeline: Option<String>,
}

impl ContactForm {
    /// Default missing fields and derive the subject line.
    pub fn into_submission(self) -> NewSubmission {
        let subject = subject_for(self.diagnosis.as_deref()).to_string();
        NewSubmission {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            inquiry_type: self.inquiry_type.unwrap_or_default(),
            subject,
            message: self.message.unwrap_or_default(),
            diagnosis: self.diagnosis.unwrap_or_default(),
            pathology_report: self.pathology_report.unwrap_or_default(),
            diagnosis_timeline: self.diagnosis_timeline.unwrap_or_default(),
        }
    }
}
