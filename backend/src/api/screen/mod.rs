//! Module for the console pages.
//!
//! Pages are not individual handlers: the shell decides what each path
//! shows, and this module only adapts its answer to HTTP.

pub mod handlers;
pub mod routes;
