//! Directory data model.
//!
//! # Data Flow
//! ```text
//! State 1──* City 1──* Facility *──1 Category
//!
//! Facility row
//!     → joined with City, State, Category
//!     → FacilityView (nested JSON shape served to clients)
//! ```
//!
//! # Design Decisions
//! - Slugs are the only external identifiers used in page URLs
//! - Wire format is camelCase JSON
//! - `facility_count` is a denormalized counter, read but never recomputed

pub mod contact;
pub mod content;
pub mod facility;
pub mod geo;

pub use contact::{ContactSubmission, LeadUpdate, NewSubmission};
pub use content::{ContentTemplate, TemplateType};
pub use facility::{Facility, FacilityQuery, FacilityView};
pub use geo::{Category, City, CityView, PlaceRef, State, StateDetail};
