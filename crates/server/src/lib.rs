//! HTTP server for the tfreg provider registry.
//!
//! This crate provides:
//! - Service discovery and the providers protocol
//! - Publish behind a shared-secret header
//! - Health and build info endpoints
//! - Listener setup with optional TLS

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod serve;
pub mod state;

pub use auth::{SECRET_KEY_HEADER, SharedSecret};
pub use error::ApiError;
pub use routes::create_router;
pub use serve::{ServeError, Server};
pub use state::AppState;
