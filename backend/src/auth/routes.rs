//! Defines the HTTP routes specifically for authentication.
//!
//! Mounted under `/api/auth` by the main router.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{current_session, login, logout};
use crate::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(current_session))
}
