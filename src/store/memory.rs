//! In-process directory loaded from a JSON seed file.
//!
//! Serves the same query shapes as the PostgreSQL backend. Reference data is
//! immutable after load; leads live in a lock-guarded vector.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::model::contact::{PRIORITY_NORMAL, STATUS_NEW};
use crate::model::geo::sort_by_facility_count;
use crate::model::{
    Category, City, CityView, ContactSubmission, ContentTemplate, Facility, FacilityQuery,
    FacilityView, LeadUpdate, NewSubmission, PlaceRef, State, TemplateType,
};
use crate::store::{Directory, StoreError, StoreResult};

/// Reference data as stored in a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seed {
    pub states: Vec<State>,
    pub cities: Vec<City>,
    pub categories: Vec<Category>,
    pub facilities: Vec<Facility>,
    pub content_templates: Vec<ContentTemplate>,
}

/// Directory held entirely in memory.
pub struct MemoryStore {
    seed: Seed,
    leads: RwLock<Vec<ContactSubmission>>,
}

impl MemoryStore {
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            leads: RwLock::new(Vec::new()),
        }
    }

    /// Parse a seed document.
    pub fn from_seed_json(json: &str) -> StoreResult<Self> {
        let seed: Seed = serde_json::from_str(json)?;
        Ok(Self::new(seed))
    }

    /// Load a seed document from disk.
    pub fn from_seed_file(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::SeedIo {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_seed_json(&content)?;
        tracing::info!(
            states = store.seed.states.len(),
            cities = store.seed.cities.len(),
            facilities = store.seed.facilities.len(),
            "Loaded directory seed"
        );
        Ok(store)
    }

    fn city(&self, id: i32) -> Option<&City> {
        self.seed.cities.iter().find(|c| c.id == id)
    }

    fn state(&self, id: i32) -> Option<&State> {
        self.seed.states.iter().find(|s| s.id == id)
    }

    fn category(&self, id: i32) -> Option<&Category> {
        self.seed.categories.iter().find(|c| c.id == id)
    }

    fn view(&self, facility: &Facility) -> FacilityView {
        let city = self.city(facility.city_id);
        let state = city.and_then(|c| self.state(c.state_id));
        FacilityView {
            facility: facility.clone(),
            city: city.map(PlaceRef::from).unwrap_or(PlaceRef {
                id: facility.city_id,
                name: String::new(),
                slug: String::new(),
            }),
            state: state.map(PlaceRef::from).unwrap_or(PlaceRef {
                id: 0,
                name: String::new(),
                slug: String::new(),
            }),
            category: facility
                .category_id
                .and_then(|id| self.category(id))
                .map(PlaceRef::from),
        }
    }

    fn ordered(&self, mut views: Vec<FacilityView>, limit: Option<i64>) -> Vec<FacilityView> {
        views.sort_by(|a, b| a.facility.name.cmp(&b.facility.name));
        if let Some(limit) = limit {
            views.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        views
    }
}

#[async_trait]
impl Directory for MemoryStore {
    async fn list_states(&self) -> StoreResult<Vec<State>> {
        let mut states = self.seed.states.clone();
        states.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(states)
    }

    async fn state_by_slug(&self, slug: &str) -> StoreResult<Option<State>> {
        Ok(self.seed.states.iter().find(|s| s.slug == slug).cloned())
    }

    async fn cities_in_state(&self, state_id: i32) -> StoreResult<Vec<City>> {
        let mut cities: Vec<City> = self
            .seed
            .cities
            .iter()
            .filter(|c| c.state_id == state_id)
            .cloned()
            .collect();
        sort_by_facility_count(&mut cities);
        Ok(cities)
    }

    async fn city_by_slugs(
        &self,
        state_slug: &str,
        city_slug: &str,
    ) -> StoreResult<Option<CityView>> {
        let Some(state) = self.seed.states.iter().find(|s| s.slug == state_slug) else {
            return Ok(None);
        };
        Ok(self
            .seed
            .cities
            .iter()
            .find(|c| c.state_id == state.id && c.slug == city_slug)
            .map(|city| CityView {
                city: city.clone(),
                state: PlaceRef::from(state),
            }))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.seed.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn facility_by_id(&self, id: i32) -> StoreResult<Option<Facility>> {
        Ok(self.seed.facilities.iter().find(|f| f.id == id).cloned())
    }

    async fn facility_by_slugs(
        &self,
        state_slug: &str,
        city_slug: &str,
        facility_slug: &str,
    ) -> StoreResult<Option<FacilityView>> {
        Ok(self
            .seed
            .facilities
            .iter()
            .filter(|f| f.slug == facility_slug)
            .map(|f| self.view(f))
            .find(|v| v.city.slug == city_slug && v.state.slug == state_slug))
    }

    async fn facilities(&self, query: &FacilityQuery) -> StoreResult<Vec<FacilityView>> {
        let views = self
            .seed
            .facilities
            .iter()
            .filter(|f| query.city_id.map_or(true, |id| f.city_id == id))
            .filter(|f| query.category_id.map_or(true, |id| f.category_id == Some(id)))
            .filter(|f| query.exclude_id.map_or(true, |id| f.id != id))
            .map(|f| self.view(f))
            .filter(|v| query.state_id.map_or(true, |id| v.state.id == id))
            .collect();
        Ok(self.ordered(views, query.limit))
    }

    async fn search_facilities(&self, term: &str, limit: i64) -> StoreResult<Vec<FacilityView>> {
        let needle = term.to_lowercase();
        let hit = |value: &str| value.to_lowercase().contains(&needle);
        let views = self
            .seed
            .facilities
            .iter()
            .map(|f| self.view(f))
            .filter(|v| {
                hit(&v.facility.name)
                    || hit(&v.city.name)
                    || v.facility.company_name.as_deref().is_some_and(hit)
            })
            .collect();
        Ok(self.ordered(views, Some(limit)))
    }

    async fn content_template(
        &self,
        kind: TemplateType,
        name: &str,
    ) -> StoreResult<Option<ContentTemplate>> {
        Ok(self
            .seed
            .content_templates
            .iter()
            .find(|t| t.is_active && t.template_type == kind && t.template_name == name)
            .cloned())
    }

    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> StoreResult<ContactSubmission> {
        let mut leads = self.leads.write().await;
        let now = Utc::now();
        let id = leads.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        let lead = ContactSubmission {
            id,
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            inquiry_type: submission.inquiry_type,
            subject: submission.subject,
            message: submission.message,
            diagnosis: submission.diagnosis,
            pathology_report: submission.pathology_report,
            diagnosis_timeline: submission.diagnosis_timeline,
            status: STATUS_NEW.to_string(),
            priority: PRIORITY_NORMAL.to_string(),
            notes: String::new(),
            contacted: false,
            created_at: now,
            updated_at: now,
        };
        leads.push(lead.clone());
        Ok(lead)
    }

    async fn list_submissions(
        &self,
        status: Option<&str>,
        limit: i64,
    ) -> StoreResult<Vec<ContactSubmission>> {
        let leads = self.leads.read().await;
        let mut matching: Vec<ContactSubmission> = leads
            .iter()
            .filter(|l| status.map_or(true, |s| l.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matching.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(matching)
    }

    async fn update_submission(
        &self,
        id: i32,
        update: &LeadUpdate,
    ) -> StoreResult<Option<ContactSubmission>> {
        let mut leads = self.leads.write().await;
        Ok(leads.iter_mut().find(|l| l.id == id).map(|lead| {
            update.apply(lead, Utc::now());
            lead.clone()
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "states": [{"id": 1, "name": "Florida", "slug": "florida", "facilityCount": 3}],
        "cities": [
            {"id": 1, "name": "Tampa", "slug": "tampa", "stateId": 1, "facilityCount": 2},
            {"id": 2, "name": "Miami", "slug": "miami", "stateId": 1, "facilityCount": 1}
        ],
        "categories": [{"id": 1, "name": "Power Plants", "slug": "power-plants"}],
        "facilities": [
            {"id": 1, "name": "Big Bend", "slug": "big-bend", "cityId": 1, "categoryId": 1},
            {"id": 2, "name": "Gannon", "slug": "gannon", "cityId": 1, "companyName": "TECO"},
            {"id": 3, "name": "Turkey Point", "slug": "turkey-point", "cityId": 2, "categoryId": 1}
        ]
    }"#;

    fn store() -> MemoryStore {
        MemoryStore::from_seed_json(SEED).unwrap()
    }

    #[tokio::test]
    async fn test_nearby_excludes_source() {
        let store = store();
        let source = store.facility_by_id(1).await.unwrap().unwrap();
        let nearby = store.facilities(&FacilityQuery::nearby(&source, 10)).await.unwrap();
        let ids: Vec<_> = nearby.iter().map(|v| v.facility.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_related_uncategorized_source_returns_everything_else() {
        let store = store();
        let source = store.facility_by_id(2).await.unwrap().unwrap();
        let related = store.facilities(&FacilityQuery::related(&source, 10)).await.unwrap();
        let ids: Vec<_> = related.iter().map(|v| v.facility.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_slug_lookup_requires_matching_city() {
        let store = store();
        assert!(store
            .facility_by_slugs("florida", "tampa", "big-bend")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .facility_by_slugs("florida", "miami", "big-bend")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_search_matches_company_case_insensitively() {
        let store = store();
        let hits = store.search_facilities("teco", 50).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].facility.slug, "gannon");
    }

    #[tokio::test]
    async fn test_lead_update_roundtrip() {
        let store = store();
        let lead = store
            .insert_submission(NewSubmission {
                name: "Pat".into(),
                ..NewSubmission::default()
            })
            .await
            .unwrap();
        assert_eq!(lead.status, "new");

        let update = LeadUpdate {
            contacted: Some(true),
            ..LeadUpdate::default()
        };
        let updated = store.update_submission(lead.id, &update).await.unwrap().unwrap();
        assert!(updated.contacted);
        assert_eq!(updated.status, "new");
        assert!(store.update_submission(99, &update).await.unwrap().is_none());
    }
}
