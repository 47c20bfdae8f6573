//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (CORS preflight short-circuit, CORS response headers)
//!     → body size limit (tower-http, configured in http::server)
//!     → Pass to dispatch
//! ```
//!
//! # Design Decisions
//! - Public read API: CORS is fully permissive (`*`)
//! - Admin routes are guarded separately by bearer token (see `admin::auth`)

pub mod headers;

pub use headers::cors_middleware;
