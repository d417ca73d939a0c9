//! Handler functions for sidebar submenu state.
//!
//! Toggling only flips the open flag of a group that exists in the console
//! menu; unknown titles are reported as not found.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::ConsoleError;
use crate::navigation::MenuNode;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct GroupState {
    pub group: String,
    pub open: bool,
}

pub async fn toggle_group(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<GroupState>, ConsoleError> {
    let known = state
        .shell
        .menu()
        .iter()
        .any(|node| matches!(node, MenuNode::Group(group) if group.title == title));
    if !known {
        return Err(ConsoleError::UnknownMenuGroup(title));
    }

    let open = state.menu_state.lock().toggle(&title);
    Ok(Json(GroupState { group: title, open }))
}
