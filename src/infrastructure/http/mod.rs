//! HTTP Layer - RESTful API

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::TrustedOrigins;
pub use routes::create_routes;
pub use server::{cors_layer, HttpServer};
pub use state::{AppState, AuthSettings};
