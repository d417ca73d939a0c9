//! Handler functions for the logged-in user's profile.

use axum::extract::State;
use axum::Json;

use crate::auth::AuthError;
use crate::errors::ConsoleError;
use crate::shell::UserSummary;
use crate::AppState;

/// Name, role, photo, and branch assignments of the stored profile.
pub async fn profile(State(state): State<AppState>) -> Result<Json<UserSummary>, ConsoleError> {
    let session = state.sessions.get()?;
    let profile = session.profile.ok_or(AuthError::Unauthenticated)?;
    Ok(Json(UserSummary::from(&profile)))
}
