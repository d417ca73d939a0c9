//! Handler for console page navigation.
//!
//! Every page request is resolved by the shell against the stored session;
//! redirects become `303 See Other`, everything else is returned as a JSON
//! view for the front end to draw.

use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use crate::errors::ConsoleError;
use crate::shell::ShellView;
use crate::AppState;

pub async fn navigate(State(state): State<AppState>, uri: Uri) -> Result<Response, ConsoleError> {
    let session = state.sessions.get()?;
    let view = {
        let menu_state = state.menu_state.lock();
        state.shell.navigate(uri.path(), &session, &menu_state)
    };

    Ok(match view {
        ShellView::Redirect { to } => Redirect::to(&to).into_response(),
        view => Json(view).into_response(),
    })
}
