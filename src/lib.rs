//! readalong library - book-club progress tracker service
//!
//! Session state plus the HTTP router, public so integration tests can drive
//! the router directly.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

pub mod api;
pub mod config;
pub mod error;
pub mod repo;
pub mod roster;
pub mod sheet;
pub mod store;

use repo::ProgressRepository;
use store::ProgressStore;

/// Outcome of the startup credential/load checks, shown in the UI status
/// banner
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    pub ok: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: "Sheet service connection successful!".to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Application state shared across HTTP handlers
///
/// One instance per process. Each request runs a single
/// read-mutate-persist cycle under the store mutex.
#[derive(Clone)]
pub struct AppState {
    /// Session copy of the progress table
    pub store: Arc<Mutex<ProgressStore>>,
    /// Persistence to the remote sheet service
    pub repo: Arc<ProgressRepository>,
    /// Startup connection diagnostic
    pub connection: ConnectionStatus,
}

impl AppState {
    pub fn new(
        store: ProgressStore,
        repo: ProgressRepository,
        connection: ConnectionStatus,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            repo: Arc::new(repo),
            connection,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState, photos_dir: &Path) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/roster", get(api::get_roster))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/progress", post(api::update_progress))
        .route("/api/progress/delete", post(api::delete_progress))
        .nest_service("/photos", ServeDir::new(photos_dir))
        .merge(api::health_routes())
        .with_state(state)
}
