//! Data access subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → connect() picks a backend
//!         url set       → postgres.rs (sqlx pool)
//!         seed_path set → memory.rs (JSON seed, in-process)
//!     → Arc<dyn Directory> injected into request handlers
//! ```
//!
//! # Design Decisions
//! - One data-access object per process, constructed at startup and closed at shutdown
//! - Handlers never see SQL; every query shape lives behind `Directory`
//! - Lookups return `Option`; mapping a miss to 404 is the caller's job
//! - No in-request recomputation of `facility_count`

pub mod memory;
pub mod postgres;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::model::{
    Category, City, CityView, ContactSubmission, ContentTemplate, Facility, FacilityQuery,
    FacilityView, LeadUpdate, NewSubmission, State, TemplateType,
};

pub use memory::MemoryStore;
pub use postgres::PgDirectory;

/// Errors raised by a directory backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to read seed file {path}: {source}")]
    SeedIo {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid seed data: {0}")]
    SeedParse(#[from] serde_json::Error),

    #[error("no data source configured (set database.url or database.seed_path)")]
    NotConfigured,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read and write access to the directory data.
#[async_trait]
pub trait Directory: Send + Sync {
    /// All states ordered by name.
    async fn list_states(&self) -> StoreResult<Vec<State>>;

    async fn state_by_slug(&self, slug: &str) -> StoreResult<Option<State>>;

    /// Cities of a state, highest facility count first.
    async fn cities_in_state(&self, state_id: i32) -> StoreResult<Vec<City>>;

    /// City matched by slug under the state with `state_slug`.
    async fn city_by_slugs(&self, state_slug: &str, city_slug: &str)
        -> StoreResult<Option<CityView>>;

    /// All categories ordered by name.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn facility_by_id(&self, id: i32) -> StoreResult<Option<Facility>>;

    /// Facility whose slug, city slug and state slug all match.
    async fn facility_by_slugs(
        &self,
        state_slug: &str,
        city_slug: &str,
        facility_slug: &str,
    ) -> StoreResult<Option<FacilityView>>;

    /// Joined facilities matching `query`, ordered by name.
    async fn facilities(&self, query: &FacilityQuery) -> StoreResult<Vec<FacilityView>>;

    /// Case-insensitive substring match on facility, city or company name.
    async fn search_facilities(&self, term: &str, limit: i64) -> StoreResult<Vec<FacilityView>>;

    /// Active template with exactly this type and name.
    async fn content_template(
        &self,
        kind: TemplateType,
        name: &str,
    ) -> StoreResult<Option<ContentTemplate>>;

    async fn insert_submission(&self, submission: NewSubmission)
        -> StoreResult<ContactSubmission>;

    /// Leads newest first, optionally filtered by status.
    async fn list_submissions(
        &self,
        status: Option<&str>,
        limit: i64,
    ) -> StoreResult<Vec<ContactSubmission>>;

    async fn update_submission(
        &self,
        id: i32,
        update: &LeadUpdate,
    ) -> StoreResult<Option<ContactSubmission>>;

    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    /// Releases backend resources.
    async fn close(&self);
}

/// Build the directory backend described by `config`.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<Arc<dyn Directory>> {
    if let Some(url) = &config.url {
        let store = PgDirectory::connect(url, config.max_connections).await?;
        if config.run_migrations {
            store.migrate().await?;
        }
        return Ok(Arc::new(store));
    }

    if let Some(path) = &config.seed_path {
        let store = MemoryStore::from_seed_file(Path::new(path))?;
        tracing::warn!(
            seed_path = %path,
            "Using in-memory directory; leads are not persisted across restarts"
        );
        return Ok(Arc::new(store));
    }

    Err(StoreError::NotConfigured)
}
