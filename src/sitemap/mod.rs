//! XML sitemap generation.
//!
//! # Data Flow
//! ```text
//! Directory (states → cities → facilities)
//!     → entries (loc, changefreq, priority)
//!     → xml.rs (urlset document)
//! ```
//!
//! # Design Decisions
//! - Site-wide map: home, every state, city and facility
//! - Per-state map: exactly one entry per city plus one per facility of that state
//! - URLs are built from slugs only; facility URLs carry the page suffix

pub mod xml;

use crate::model::facility::URL_SUFFIX;
use crate::model::{FacilityQuery, State};
use crate::store::{Directory, StoreResult};

pub use xml::{render_urlset, ChangeFreq, SitemapEntry};

pub const HOME_PRIORITY: f32 = 1.0;
pub const STATE_PRIORITY: f32 = 0.8;
pub const CITY_PRIORITY: f32 = 0.7;
pub const FACILITY_PRIORITY: f32 = 0.6;

/// Builds absolute page URLs from slugs.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: String,
}

impl SiteUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn home(&self) -> String {
        format!("{}/", self.base)
    }

    pub fn state(&self, state: &str) -> String {
        format!("{}/{state}", self.base)
    }

    pub fn city(&self, state: &str, city: &str) -> String {
        format!("{}/{state}/{city}", self.base)
    }

    pub fn facility(&self, state: &str, city: &str, facility: &str) -> String {
        format!("{}/{state}/{city}/{facility}{URL_SUFFIX}", self.base)
    }
}

async fn state_entries(
    directory: &dyn Directory,
    urls: &SiteUrls,
    state: &State,
) -> StoreResult<Vec<SitemapEntry>> {
    let mut entries = Vec::new();
    for city in directory.cities_in_state(state.id).await? {
        entries.push(SitemapEntry::new(
            urls.city(&state.slug, &city.slug),
            ChangeFreq::Weekly,
            CITY_PRIORITY,
        ));
    }

    let facilities = directory
        .facilities(&FacilityQuery {
            state_id: Some(state.id),
            ..FacilityQuery::default()
        })
        .await?;
    for view in facilities {
        entries.push(SitemapEntry::new(
            urls.facility(&state.slug, &view.city.slug, &view.facility.slug),
            ChangeFreq::Monthly,
            FACILITY_PRIORITY,
        ));
    }
    Ok(entries)
}

/// Sitemap covering the whole directory.
pub async fn site_sitemap(directory: &dyn Directory, base_url: &str) -> StoreResult<String> {
    let urls = SiteUrls::new(base_url);
    let mut entries = vec![SitemapEntry::new(urls.home(), ChangeFreq::Daily, HOME_PRIORITY)];

    for state in directory.list_states().await? {
        entries.push(SitemapEntry::new(
            urls.state(&state.slug),
            ChangeFreq::Weekly,
            STATE_PRIORITY,
        ));
        entries.extend(state_entries(directory, &urls, &state).await?);
    }

    tracing::debug!(entries = entries.len(), "Generated site sitemap");
    Ok(render_urlset(&entries))
}

/// Sitemap for one state, or `None` when the state does not exist.
pub async fn state_sitemap(
    directory: &dyn Directory,
    base_url: &str,
    state_slug: &str,
) -> StoreResult<Option<String>> {
    let Some(state) = directory.state_by_slug(state_slug).await? else {
        return Ok(None);
    };
    let urls = SiteUrls::new(base_url);
    let entries = state_entries(directory, &urls, &state).await?;

    tracing::debug!(state = %state.slug, entries = entries.len(), "Generated state sitemap");
    Ok(Some(render_urlset(&entries)))
}
