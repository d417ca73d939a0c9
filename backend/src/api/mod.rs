//! Central module for organizing the application's HTTP endpoints.
//!
//! This module acts as a top-level container for the console's HTTP
//! surfaces: page navigation, the user profile, and sidebar state. Login and
//! logout live with the rest of authentication in `auth`.

pub mod navigation;
pub mod screen;
pub mod user;
