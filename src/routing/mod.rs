//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (segment-by-segment match, named captures)
//!     → Return: RouteMatch { route, params } or None
//!
//! Route Compilation (at startup):
//!     RouteDef[]
//!     → Sort by priority, then literal segment count
//!     → Compile path patterns
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by declared precedence)

pub mod matcher;
pub mod router;

pub use matcher::Params;
pub use router::{RouteId, RouteMatch, Router};
