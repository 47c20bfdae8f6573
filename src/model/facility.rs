//! Facility records and the joined projection served by the API.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::model::geo::PlaceRef;

/// Suffix that page URLs append to facility slugs.
pub const URL_SUFFIX: &str = "-asbestos-exposure";

/// A physical site record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub seo_keyword: Option<String>,
    #[serde(default)]
    pub operational_years: Option<String>,
    #[serde(default)]
    pub facility_type: Option<String>,
    pub city_id: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
}

/// Facility joined with its city, state and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityView {
    #[serde(flatten)]
    pub facility: Facility,
    pub city: PlaceRef,
    pub state: PlaceRef,
    pub category: Option<PlaceRef>,
}

/// Filters shared by every facility listing.
///
/// Unset fields do not constrain the result. Results are always ordered by
/// facility name ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityQuery {
    pub city_id: Option<i32>,
    pub state_id: Option<i32>,
    pub category_id: Option<i32>,
    pub exclude_id: Option<i32>,
    pub limit: Option<i64>,
}

impl FacilityQuery {
    /// Other facilities in the same city as `source`.
    pub fn nearby(source: &Facility, limit: i64) -> Self {
        Self {
            city_id: Some(source.city_id),
            exclude_id: Some(source.id),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Other facilities in the same category as `source`; any facility when
    /// the source is uncategorized.
    pub fn related(source: &Facility, limit: i64) -> Self {
        Self {
            category_id: source.category_id,
            exclude_id: Some(source.id),
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// Strips the optional page-URL suffix from a facility slug segment.
pub fn strip_url_suffix(segment: &str) -> &str {
    segment.strip_suffix(URL_SUFFIX).unwrap_or(segment)
}
