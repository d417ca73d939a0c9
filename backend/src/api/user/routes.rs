//! Defines the HTTP routes for the logged-in user's profile.
//!
//! These routes map profile paths to their handlers and guard them with
//! `require_session`.

use axum::middleware;
use axum::routing::get;
use axum::Router;

use super::handlers::profile;
use crate::auth::require_session;
use crate::AppState;

pub fn user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
