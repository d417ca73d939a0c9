//! Route guard and the middleware protecting authenticated API routes.
//!
//! [`RouteGuard`] is the pure decision every console page goes through before
//! it renders. [`require_session`] is the axum middleware for JSON endpoints
//! that only need somebody to be logged in.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;

use super::errors::AuthError;
use super::models::{RoleSet, Session};
use crate::errors::ConsoleError;
use crate::policy::paths;
use crate::AppState;

/// Outcome of guarding one route for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Nobody is logged in.
    RedirectLogin,
    /// Logged in, but the role is not on the route's list.
    RedirectUnauthorized,
    Render,
}

impl GuardDecision {
    /// Where to send the client instead of rendering, if anywhere.
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            GuardDecision::RedirectLogin => Some(paths::LOGIN),
            GuardDecision::RedirectUnauthorized => Some(paths::UNAUTHORIZED),
            GuardDecision::Render => None,
        }
    }
}

/// Decides whether a route may render for the current session.
pub struct RouteGuard;

impl RouteGuard {
    /// An empty `allowed_roles` denies every authenticated user.
    pub fn check(session: &Session, allowed_roles: &RoleSet) -> GuardDecision {
        if session.token.is_none() {
            return GuardDecision::RedirectLogin;
        }
        match session.role() {
            Some(role) if allowed_roles.contains(role) => GuardDecision::Render,
            _ => GuardDecision::RedirectUnauthorized,
        }
    }
}

/// Rejects requests with 401 unless a session token is stored.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ConsoleError> {
    let session = state.sessions.get()?;
    if !session.is_authenticated() {
        tracing::debug!(path = %request.uri().path(), "rejecting request without session");
        return Err(AuthError::Unauthenticated.into());
    }
    Ok(next.run(request).await)
}
