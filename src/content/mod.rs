//! Content resolution.
//!
//! # Data Flow
//! ```text
//! State / City / Facility
//!     → resolver.rs (ordered candidate template names)
//!     → Directory::content_template (first active hit wins)
//!     → placeholder substitution
//!     → ResolvedContent (template blocks, or static default paragraph)
//! ```
//!
//! # Design Decisions
//! - Candidate generation is pure and independent of the transport layer
//! - Lookup stops at the first hit
//! - A miss is not an error; callers always get displayable text

pub mod resolver;

pub use resolver::{
    city_candidates, describe_city, describe_facility, describe_state, facility_candidates,
    resolve_first, state_candidates, Placeholders, ResolvedContent,
};
