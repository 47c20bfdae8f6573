//! Route table and lookup.
//!
//! # Responsibilities
//! - Declare every API route with an explicit priority
//! - Sort once at construction
//! - Look up the single matching route for a request
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Higher priority first, then more literal segments, then declaration order
//! - Suffix routes (`/nearby`, `/related`, `/facilities`, `/description`)
//!   outrank the generic capture routes they could be confused with
//! - Explicit `None` rather than silent default

use axum::http::Method;

use crate::routing::matcher::{split_path, Params, PathPattern};

/// Every endpoint the dispatcher knows how to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Health,
    ListStates,
    StateDetail,
    StateDescription,
    ListCategories,
    ListFacilities,
    FacilityDetail,
    FacilityDescription,
    FacilityNearby,
    FacilityRelated,
    CityDetail,
    CityFacilities,
    CityDescription,
    Search,
    Contact,
    ContentTemplate,
    Sitemap,
    StateSitemap,
}

impl RouteId {
    /// Stable label for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            RouteId::Health => "health",
            RouteId::ListStates => "list_states",
            RouteId::StateDetail => "state_detail",
            RouteId::StateDescription => "state_description",
            RouteId::ListCategories => "list_categories",
            RouteId::ListFacilities => "list_facilities",
            RouteId::FacilityDetail => "facility_detail",
            RouteId::FacilityDescription => "facility_description",
            RouteId::FacilityNearby => "facility_nearby",
            RouteId::FacilityRelated => "facility_related",
            RouteId::CityDetail => "city_detail",
            RouteId::CityFacilities => "city_facilities",
            RouteId::CityDescription => "city_description",
            RouteId::Search => "search",
            RouteId::Contact => "contact",
            RouteId::ContentTemplate => "content_template",
            RouteId::Sitemap => "sitemap",
            RouteId::StateSitemap => "state_sitemap",
        }
    }
}

/// A route declaration before compilation.
#[derive(Debug, Clone)]
pub struct RouteDef {
    pub id: RouteId,
    pub method: Method,
    pub pattern: &'static str,
    /// Higher = checked first.
    pub priority: u32,
}

impl RouteDef {
    pub fn new(id: RouteId, method: Method, pattern: &'static str, priority: u32) -> Self {
        Self {
            id,
            method,
            pattern,
            priority,
        }
    }
}

/// The API route table in declaration order.
pub fn api_routes() -> Vec<RouteDef> {
    use RouteId::*;
    vec![
        RouteDef::new(Health, Method::GET, "/api/health", 0),
        RouteDef::new(ListStates, Method::GET, "/api/states", 0),
        RouteDef::new(StateDescription, Method::GET, "/api/states/{slug}/description", 10),
        RouteDef::new(StateDetail, Method::GET, "/api/states/{slug}", 0),
        RouteDef::new(ListCategories, Method::GET, "/api/categories", 0),
        RouteDef::new(ListFacilities, Method::GET, "/api/facilities", 0),
        RouteDef::new(FacilityNearby, Method::GET, "/api/facilities/{id}/nearby", 10),
        RouteDef::new(FacilityRelated, Method::GET, "/api/facilities/{id}/related", 10),
        RouteDef::new(
            FacilityDescription,
            Method::GET,
            "/api/facilities/{state}/{city}/{facility}/description",
            10,
        ),
        RouteDef::new(FacilityDetail, Method::GET, "/api/facilities/{state}/{city}/{facility}", 0),
        RouteDef::new(CityFacilities, Method::GET, "/api/cities/{state}/{city}/facilities", 10),
        RouteDef::new(CityDescription, Method::GET, "/api/cities/{state}/{city}/description", 10),
        RouteDef::new(CityDetail, Method::GET, "/api/cities/{state}/{city}", 0),
        RouteDef::new(Search, Method::GET, "/api/search", 0),
        RouteDef::new(Contact, Method::POST, "/api/contact", 0),
        RouteDef::new(ContentTemplate, Method::GET, "/api/content-templates/{type}/{name}", 0),
        RouteDef::new(Sitemap, Method::GET, "/sitemap.xml", 10),
        RouteDef::new(StateSitemap, Method::GET, "/sitemap-{state}.xml", 0),
    ]
}

#[derive(Debug)]
struct CompiledRoute {
    id: RouteId,
    pattern: PathPattern,
    priority: u32,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: RouteId,
    pub params: Params,
}

impl RouteMatch {
    /// Captured path value. Empty when the pattern has no such capture.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).unwrap_or_default()
    }
}

/// Immutable, precedence-ordered route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile and order `defs`.
    pub fn new(defs: Vec<RouteDef>) -> Self {
        let mut routes: Vec<CompiledRoute> = defs
            .into_iter()
            .map(|def| CompiledRoute {
                id: def.id,
                pattern: PathPattern::new(def.method, def.pattern),
                priority: def.priority,
            })
            .collect();

        // Stable sort keeps declaration order as the final tie-breaker
        routes.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.pattern.literal_count().cmp(&a.pattern.literal_count()))
        });

        Self { routes }
    }

    /// Router over the full API table.
    pub fn api() -> Self {
        Self::new(api_routes())
    }

    /// First route matching `method` and `path`.
    pub fn match_request(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let segments = split_path(path);
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(method, &segments)
                .map(|params| RouteMatch {
                    route: route.id,
                    params,
                })
        })
    }

    /// Route ids in evaluation order.
    pub fn precedence(&self) -> Vec<RouteId> {
        self.routes.iter().map(|r| r.id).collect()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::api()
    }
}
