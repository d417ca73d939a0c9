//! Custom error types specific to authentication failures.
//!
//! These cover rejected credentials, unreachable or misbehaving login
//! backends, profiles that break the branch invariant, and session storage
//! failures.

use adapters::StorageError;
use std::error::Error as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not logged in")]
    Unauthenticated,

    #[error("login backend returned an empty token")]
    EmptyToken,

    #[error("profile has {codes} branch codes but {names} branch names")]
    BranchMismatch { codes: usize, names: usize },

    #[error("login backend unavailable: {0}")]
    Backend(String),

    #[error("login backend returned an unreadable response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        let message = match err.source() {
            Some(source) => format!("{err}: {source}"),
            None => err.to_string(),
        };
        if err.is_decode() {
            AuthError::MalformedResponse(message)
        } else {
            AuthError::Backend(message)
        }
    }
}
