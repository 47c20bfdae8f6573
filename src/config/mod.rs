//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! directory.toml (optional)
//!     → loader.rs (parse & deserialize, defaults for missing fields)
//!     → loader.rs (environment overrides: DATABASE_URL, SHEETS_*, ...)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → cloned into the subsystems that need a section
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Secrets (database URL, sheet token, admin key) may come from the environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    AdminConfig, DatabaseConfig, ListenerConfig, ObservabilityConfig, SecurityConfig,
    ServiceConfig, SheetsConfig, SiteConfig, TimeoutConfig,
};
