//! Dashboard data: everyone's progress, furthest reader first

use axum::{extract::State, Json};
use serde::Serialize;

use crate::store::TOTAL_CHAPTERS;
use crate::{AppState, ConnectionStatus};

/// One dashboard row
#[derive(Debug, Serialize)]
pub struct DashboardRow {
    pub name: String,
    pub chapter: i64,
    pub picture: String,
    /// `chapter / TOTAL_CHAPTERS`, not capped at 1.0
    pub progress: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub connection: ConnectionStatus,
    pub total_chapters: i64,
    pub rows: Vec<DashboardRow>,
}

/// GET /api/dashboard
///
/// Rows sorted by chapter descending; ties keep table order. An empty store
/// yields no rows and the page shows its placeholder instead.
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let store = state.store.lock().await;
    let rows = store
        .sorted_by_chapter_desc()
        .into_iter()
        .map(|entry| DashboardRow {
            name: entry.name.clone(),
            chapter: entry.chapter,
            picture: entry.picture.clone(),
            progress: entry.chapter as f64 / TOTAL_CHAPTERS as f64,
        })
        .collect();

    Json(DashboardResponse {
        connection: state.connection.clone(),
        total_chapters: TOTAL_CHAPTERS,
        rows,
    })
}
