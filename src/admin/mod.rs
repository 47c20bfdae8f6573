//! Lead review API.
//!
//! Mounted under `/admin` only when `admin.enabled` is set. Every route
//! requires `Authorization: Bearer <admin.api_key>`.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::{list_leads, update_lead};
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/leads", get(list_leads))
        .route("/admin/leads/{id}", patch(update_lead))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}
