//! API module for HTTP endpoints
//!
//! Public read endpoints for the site's pages and password-gated write
//! endpoints for the admin panel.

pub mod auth;
pub mod http;
pub mod rest;
pub mod state;

pub use auth::{AuthError, CredentialCheck, SharedCredentialCheck, SharedSecret};
pub use http::create_router;
pub use rest::{ApiError, ApiFailure};
pub use state::AppState;
