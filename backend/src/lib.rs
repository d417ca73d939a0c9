//! Role-gated navigation shell for the restaurant back-office console.
//!
//! The library holds everything the binary wires together: the session store,
//! the access policy table, the route guard, the sidebar menu, the shell that
//! composes them, and the axum router exposing it all over HTTP.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod navigation;
pub mod policy;
pub mod shell;

use adapters::{FileStore, KeyValueStore, MemoryStore, StorageError};
use axum::Router;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::auth::{Authenticator, SessionStore};
use crate::config::ConsoleConfig;
use crate::navigation::MenuState;
use crate::policy::PolicyError;
use crate::shell::Shell;

/// Shared handler state. Cloning shares every field.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConsoleConfig>,
    pub sessions: SessionStore,
    pub shell: Arc<Shell>,
    pub authenticator: Arc<dyn Authenticator>,
    pub menu_state: Arc<Mutex<MenuState>>,
}

impl AppState {
    pub fn new(
        config: ConsoleConfig,
        storage: Arc<dyn KeyValueStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self, PolicyError> {
        Ok(Self {
            config: Arc::new(config),
            sessions: SessionStore::new(storage),
            shell: Arc::new(Shell::console()?),
            authenticator,
            menu_state: Arc::new(Mutex::new(MenuState::new())),
        })
    }
}

/// Opens the session storage the config asks for.
pub fn open_storage(config: &ConsoleConfig) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    match &config.storage_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "persisting session to file");
            Ok(Arc::new(FileStore::open(path.clone())?))
        }
        None => {
            tracing::info!("persisting session in memory only");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth::auth_router())
        .nest("/api/user", api::user::routes::user_router(state.clone()))
        .nest(
            "/api/navigation",
            api::navigation::routes::navigation_router(state.clone()),
        )
        .merge(api::screen::routes::screen_router())
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .with_state(state)
}
