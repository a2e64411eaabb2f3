//! Progress mutations: upsert a member's chapter, delete a member's entry
//!
//! Each handler runs one mutate-then-persist cycle under the store lock. A
//! failed save keeps the in-memory change and surfaces the error in the
//! response banner; nothing is retried.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::roster;
use crate::store::ProgressEntry;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub name: String,
    pub chapter: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub name: String,
}

/// Banner shown by the page after a form action
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// "success", "warning", or "error"
    pub status: &'static str,
    pub message: String,
}

/// POST /api/progress
///
/// Upserts the member's entry: any existing entry for the name is removed,
/// the new one appended, and the whole table saved.
pub async fn update_progress(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    if req.chapter < 1 {
        return Err(ApiError::InvalidChapter(req.chapter));
    }
    let member = roster::lookup(&req.name).map_err(|_| ApiError::UnknownMember(req.name.clone()))?;

    let mut store = state.store.lock().await;
    store.upsert(ProgressEntry {
        name: member.name.to_string(),
        chapter: req.chapter,
        picture: member.picture.to_string(),
    });

    match state.repo.save(&store).await {
        Ok(()) => {
            info!("Progress updated: {} -> chapter {}", member.name, req.chapter);
            Ok(Json(ActionResponse {
                status: "success",
                message: format!("Progress updated for {}!", member.name),
            }))
        }
        Err(e) => {
            error!("Failed to save progress data: {}", e);
            Ok(Json(ActionResponse {
                status: "error",
                message: format!("Error saving data to sheet service: {e}"),
            }))
        }
    }
}

/// POST /api/progress/delete
///
/// Removes the entry for the named member (the form's current selection,
/// which is not necessarily the most recently modified member). Deleting a
/// member with no entry is a no-op that still reports the warning banner.
pub async fn delete_progress(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> Json<ActionResponse> {
    let mut store = state.store.lock().await;
    if !store.remove(&req.name) {
        warn!("Delete requested for {} with no existing entry", req.name);
    }

    match state.repo.save(&store).await {
        Ok(()) => Json(ActionResponse {
            status: "warning",
            message: format!("Last entry deleted for {}.", req.name),
        }),
        Err(e) => {
            error!("Failed to save progress data: {}", e);
            Json(ActionResponse {
                status: "error",
                message: format!("Error saving data to sheet service: {e}"),
            })
        }
    }
}

/// Form rejections surfaced as HTTP errors
#[derive(Debug)]
pub enum ApiError {
    UnknownMember(String),
    InvalidChapter(i64),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnknownMember(name) => (
                StatusCode::BAD_REQUEST,
                format!("Member not found in roster: {}", name),
            ),
            ApiError::InvalidChapter(chapter) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid chapter: {} (must be at least 1)", chapter),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
