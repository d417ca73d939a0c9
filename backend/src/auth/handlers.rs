//! Handler functions for authentication-related API endpoints.
//!
//! These functions process login, logout, and session inspection requests,
//! delegating to `auth::service` for the flow itself.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::models::{LoginRequest, Profile};
use super::service;
use crate::errors::ConsoleError;
use crate::policy::paths;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LoginReply {
    pub profile: Profile,
    /// First page the new session may open.
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutReply {
    pub redirect: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionReply {
    pub authenticated: bool,
    pub profile: Option<Profile>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginReply>, ConsoleError> {
    let profile =
        service::login(state.authenticator.as_ref(), &state.sessions, &request).await?;
    state.menu_state.lock().close_all();

    let session = state.sessions.get()?;
    let redirect = state.shell.landing_path(&session).to_string();
    tracing::info!(user = %profile.name(), %redirect, "login succeeded");
    Ok(Json(LoginReply { profile, redirect }))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<LogoutReply>, ConsoleError> {
    service::logout(&state.sessions)?;
    state.menu_state.lock().close_all();
    Ok(Json(LogoutReply {
        redirect: paths::LOGIN,
    }))
}

/// The current session, without the token.
pub async fn current_session(
    State(state): State<AppState>,
) -> Result<Json<SessionReply>, ConsoleError> {
    let session = state.sessions.get()?;
    Ok(Json(SessionReply {
        authenticated: session.is_authenticated(),
        profile: session.profile,
    }))
}
