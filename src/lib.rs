//! Facility directory service library.

pub mod admin;
pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod http;
pub mod leads;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod routing;
pub mod security;
pub mod sitemap;
pub mod store;

pub use config::schema::ServiceConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::Directory;
