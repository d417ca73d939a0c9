//! Defines the HTTP routes for sidebar UI state.
//!
//! Every route here sits behind `require_session`.

use axum::middleware;
use axum::routing::post;
use axum::Router;

use super::handlers::toggle_group;
use crate::auth::require_session;
use crate::AppState;

pub fn navigation_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/groups/:title/toggle", post(toggle_group))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
