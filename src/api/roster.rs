//! Roster listing for the form's member select

use axum::Json;
use serde::Serialize;

use crate::roster;

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub members: Vec<String>,
}

/// GET /api/roster
///
/// Member names in roster order
pub async fn get_roster() -> Json<RosterResponse> {
    Json(RosterResponse {
        members: roster::MEMBERS.iter().map(|m| m.name.to_string()).collect(),
    })
}
