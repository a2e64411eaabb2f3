//! Shared test helpers: an in-process fake sheet service
//!
//! Implements the same wire protocol as the real service (fetch / replace /
//! clear on `{base}/tables/{table}/...`) backed by an in-memory map, bound
//! to an ephemeral local port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct FakeSheet {
    tables: Arc<Mutex<HashMap<String, Vec<Vec<String>>>>>,
    required_token: Option<String>,
}

impl FakeSheet {
    /// Fake service that accepts any request
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake service that rejects requests without `Bearer {token}`
    pub fn with_required_token(token: &str) -> Self {
        Self {
            required_token: Some(token.to_string()),
            ..Self::default()
        }
    }

    /// Current contents of a table (empty if never written)
    pub async fn table(&self, name: &str) -> Vec<Vec<String>> {
        self.tables.lock().await.get(name).cloned().unwrap_or_default()
    }

    /// Seed a table directly, bypassing the HTTP surface
    pub async fn seed(&self, name: &str, rows: Vec<Vec<String>>) {
        self.tables.lock().await.insert(name.to_string(), rows);
    }

    /// Bind to an ephemeral port and serve; returns the base URL
    pub async fn spawn(self) -> (Self, String) {
        let app = Router::new()
            .route("/tables/:table/values", get(fetch_values).put(put_values))
            .route("/tables/:table/clear", post(clear_table))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake sheet service");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake sheet service");
        });

        (self, format!("http://{}", addr))
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        match &self.required_token {
            None => true,
            Some(token) => headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(|v| v == format!("Bearer {token}"))
                .unwrap_or(false),
        }
    }
}

#[derive(Deserialize)]
struct ValueBody {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

async fn fetch_values(
    State(sheet): State<FakeSheet>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !sheet.authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let values = sheet.table(&table).await;
    Ok(Json(json!({ "values": values })))
}

async fn put_values(
    State(sheet): State<FakeSheet>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ValueBody>,
) -> Result<StatusCode, StatusCode> {
    if !sheet.authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    sheet.tables.lock().await.insert(table, body.values);
    Ok(StatusCode::OK)
}

async fn clear_table(
    State(sheet): State<FakeSheet>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    if !sheet.authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    sheet.tables.lock().await.insert(table, Vec::new());
    Ok(StatusCode::OK)
}

/// Base URL that refuses connections (bound then immediately dropped)
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
