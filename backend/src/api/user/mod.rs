//! Module for user profile API endpoints.
//!
//! Serves the stored profile to the front end (header avatar, branch
//! picker). Every route here requires a session.

pub mod handlers;
pub mod routes;
