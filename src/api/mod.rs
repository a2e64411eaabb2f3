//! HTTP API handlers for readalong

pub mod dashboard;
pub mod health;
pub mod progress;
pub mod roster;
pub mod ui;

pub use dashboard::get_dashboard;
pub use health::health_routes;
pub use progress::{delete_progress, update_progress};
pub use roster::get_roster;
pub use ui::{serve_app_js, serve_index};
