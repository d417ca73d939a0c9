//! Authentication module for sessions, roles, and access control.
//!
//! This module provides the session store, the login/logout flow against the
//! remote API, the route guard, and the middleware protecting session-only
//! endpoints.

pub mod routes;
pub mod handlers;
pub mod models;
pub mod middleware;
pub mod service;
pub mod errors;

// Re-exports for convenience
pub use models::*;
pub use middleware::{require_session, GuardDecision, RouteGuard};
pub use routes::auth_router;
pub use service::{Authenticator, RemoteAuthenticator, SessionStore};
pub use errors::AuthError;
