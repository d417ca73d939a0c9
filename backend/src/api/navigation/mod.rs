//! Module for sidebar UI state endpoints.
//!
//! Submenu groups open and close independently of role filtering; these
//! endpoints flip that state for the console session.

pub mod handlers;
pub mod routes;
