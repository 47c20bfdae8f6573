//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler and admin routes
//! - Wire up middleware (tracing, timeout, body limit, request ID, CORS)
//! - Resolve each request against the route table exactly once
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::setup_admin_router;
use crate::config::{AdminConfig, ServiceConfig, SiteConfig};
use crate::error::{ApiError, ApiResult};
use crate::handlers::{self, facilities::Neighbours};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::leads::LeadForwarder;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::{RouteId, RouteMatch, Router as RouteTable};
use crate::security::cors_middleware;
use crate::store::Directory;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub directory: Arc<dyn Directory>,
    pub forwarder: Arc<LeadForwarder>,
    pub site: SiteConfig,
    pub admin: AdminConfig,
}

/// HTTP server for the directory API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server over an already connected directory.
    pub fn new(config: ServiceConfig, directory: Arc<dyn Directory>) -> Self {
        let forwarder = Arc::new(LeadForwarder::new(&config.sheets));
        Self::with_forwarder(config, directory, forwarder)
    }

    /// Like `new`, with an explicit lead forwarder.
    pub fn with_forwarder(
        config: ServiceConfig,
        directory: Arc<dyn Directory>,
        forwarder: Arc<LeadForwarder>,
    ) -> Self {
        tracing::debug!(
            sheets_forwarding = forwarder.is_enabled(),
            admin_enabled = config.admin.enabled,
            "Building HTTP router"
        );
        let state = AppState {
            routes: Arc::new(RouteTable::api()),
            directory,
            forwarder,
            site: config.site.clone(),
            admin: config.admin.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let mut app = Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state.clone());

        if config.admin.enabled {
            app = app.merge(setup_admin_router(state));
        }

        app.layer(middleware::from_fn(cors_middleware))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: &Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            admin_enabled = self.config.admin.enabled,
            "HTTP server starting"
        );

        let signalled = shutdown.wait();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                signalled.await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every non-admin request.
/// Looks up the route once and hands off to its handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.headers().request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let Some(matched) = state.routes.match_request(&method, &path) else {
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "No route matched"
        );
        metrics::record_request("none", 404, start_time);
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Route not found" })),
        )
            .into_response();
    };

    let route_name = matched.route.name();
    tracing::debug!(
        request_id = %request_id,
        route = route_name,
        path = %path,
        "Dispatching request"
    );

    let response = match handle(&state, &matched, request).await {
        Ok(response) => response,
        Err(e) => {
            if !matches!(e, ApiError::Internal(_)) {
                tracing::debug!(
                    request_id = %request_id,
                    route = route_name,
                    kind = e.kind(),
                    error = %e,
                    "Request rejected"
                );
            }
            e.into_response()
        }
    };

    metrics::record_request(route_name, response.status().as_u16(), start_time);
    response
}

async fn handle(
    state: &AppState,
    matched: &RouteMatch,
    request: Request<Body>,
) -> ApiResult<Response> {
    let p = |name: &'static str| matched.param(name);

    match matched.route {
        RouteId::Health => handlers::health::check(state).await,
        RouteId::ListStates => handlers::states::list(state).await,
        RouteId::StateDetail => handlers::states::detail(state, p("slug")).await,
        RouteId::StateDescription => handlers::states::description(state, p("slug")).await,
        RouteId::ListCategories => handlers::states::categories(state).await,
        RouteId::ListFacilities => handlers::facilities::list(state, request.uri()).await,
        RouteId::FacilityDetail => {
            handlers::facilities::detail(state, p("state"), p("city"), p("facility")).await
        }
        RouteId::FacilityDescription => {
            handlers::facilities::description(state, p("state"), p("city"), p("facility")).await
        }
        RouteId::FacilityNearby => {
            handlers::facilities::neighbours(state, p("id"), Neighbours::Nearby).await
        }
        RouteId::FacilityRelated => {
            handlers::facilities::neighbours(state, p("id"), Neighbours::Related).await
        }
        RouteId::CityDetail => handlers::cities::detail(state, p("state"), p("city")).await,
        RouteId::CityFacilities => handlers::cities::facilities(state, p("state"), p("city")).await,
        RouteId::CityDescription => {
            handlers::cities::description(state, p("state"), p("city")).await
        }
        RouteId::Search => handlers::search::search(state, request.uri()).await,
        RouteId::Contact => {
            let body = handlers::read_body(request).await?;
            handlers::contact::submit(state, &body).await
        }
        RouteId::ContentTemplate => handlers::content::template(state, p("type"), p("name")).await,
        RouteId::Sitemap => handlers::sitemap::site(state).await,
        RouteId::StateSitemap => handlers::sitemap::for_state(state, p("state")).await,
    }
}
