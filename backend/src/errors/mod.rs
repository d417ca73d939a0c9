//! Global application error types and handlers.
//!
//! [`ConsoleError`] is what every HTTP handler returns. It wraps the errors of
//! the lower layers and turns them into a JSON `{"error": ...}` body with a
//! status code chosen per variant.

use adapters::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no menu group named {0:?}")]
    UnknownMenuGroup(String),
}

impl ConsoleError {
    pub fn status(&self) -> StatusCode {
        match self {
            ConsoleError::Auth(AuthError::InvalidCredentials | AuthError::Unauthenticated) => {
                StatusCode::UNAUTHORIZED
            }
            ConsoleError::Auth(
                AuthError::Backend(_)
                | AuthError::MalformedResponse(_)
                | AuthError::EmptyToken
                | AuthError::BranchMismatch { .. },
            ) => StatusCode::BAD_GATEWAY,
            ConsoleError::UnknownMenuGroup(_) => StatusCode::NOT_FOUND,
            ConsoleError::Auth(AuthError::Storage(_)) | ConsoleError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_are_unauthorized() {
        assert_eq!(
            ConsoleError::from(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ConsoleError::from(AuthError::Unauthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        assert_eq!(
            ConsoleError::from(AuthError::Backend("down".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ConsoleError::from(AuthError::BranchMismatch { codes: 1, names: 0 }).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn storage_failure_is_internal() {
        let err = ConsoleError::from(StorageError::UnsupportedVersion {
            found: 2,
            supported: 1,
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unknown_group_is_not_found() {
        let err = ConsoleError::UnknownMenuGroup("Nope".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("Nope"));
    }
}
