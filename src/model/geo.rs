//! States, cities and categories.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A US state listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub facility_count: i32,
}

/// A city, unique by slug within its state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub state_id: i32,
    #[serde(default)]
    pub facility_count: i32,
}

/// Facility category lookup row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Compact `{id, name, slug}` reference nested inside joined projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRef {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<&State> for PlaceRef {
    fn from(state: &State) -> Self {
        Self {
            id: state.id,
            name: state.name.clone(),
            slug: state.slug.clone(),
        }
    }
}

impl From<&City> for PlaceRef {
    fn from(city: &City) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
            slug: city.slug.clone(),
        }
    }
}

impl From<&Category> for PlaceRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
        }
    }
}

/// State detail: the state plus its cities, busiest first.
#[derive(Debug, Clone, Serialize)]
pub struct StateDetail {
    #[serde(flatten)]
    pub state: State,
    pub cities: Vec<City>,
}

/// A city joined to its parent state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityView {
    #[serde(flatten)]
    pub city: City,
    pub state: PlaceRef,
}

/// Orders cities by descending facility count, then by name.
pub fn sort_by_facility_count(cities: &mut [City]) {
    cities.sort_by(|a, b| {
        b.facility_count
            .cmp(&a.facility_count)
            .then_with(|| a.name.cmp(&b.name))
    });
}
