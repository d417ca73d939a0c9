//! Defines the HTTP routes serving console pages.
//!
//! A single wildcard hands every page path to the shell, which owns the
//! login bypass, the catch-all redirect, and the guarded pages.

use axum::routing::get;
use axum::Router;

use super::handlers::navigate;
use crate::AppState;

pub fn screen_router() -> Router<AppState> {
    Router::new()
        .route("/", get(navigate))
        .route("/*path", get(navigate))
}
