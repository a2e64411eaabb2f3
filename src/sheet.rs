//! Sheet service client
//!
//! Thin HTTP client for the remote table store. Three operations: fetch all
//! values, replace all values, clear. Every durable byte of tracker state
//! goes through these.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("readalong/", env!("CARGO_PKG_VERSION"));

/// Service-account style credential blob
///
/// Only the token is used; any other fields in the file are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub token: String,
}

/// Read the credential file. Consulted exactly once, at startup; a failure
/// here is reported but never halts startup.
pub fn load_credentials(path: &Path) -> Result<Credentials> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Connection(format!("cannot read {}: {}", path.display(), e)))?;
    let creds: Credentials = serde_json::from_str(&text)
        .map_err(|e| Error::Connection(format!("malformed credential file {}: {}", path.display(), e)))?;
    if creds.token.is_empty() {
        return Err(Error::Connection(format!(
            "empty token in credential file {}",
            path.display()
        )));
    }
    Ok(creds)
}

/// Wire format shared by reads and writes: rows of cells, header row first
/// when the table is non-empty.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// HTTP client for a single sheet service
#[derive(Debug)]
pub struct SheetClient {
    http: reqwest::Client,
    base: reqwest::Url,
    token: Option<String>,
}

impl SheetClient {
    /// Build a client for the service at `base_url`. A `None` token sends
    /// unauthenticated requests, which the service will reject individually.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base = reqwest::Url::parse(base_url)
            .map_err(|e| Error::Connection(format!("invalid sheet service URL {base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(Self { http, base, token })
    }

    /// Fetch the full contents of a table, header row included
    pub async fn fetch_values(&self, table: &str) -> Result<Vec<Vec<String>>> {
        let url = self.table_url(table, "values")?;
        let resp = self
            .send(self.http.get(url))
            .await
            .map_err(|e| Error::Load(e.to_string()))?;
        let resp = error_for_status(resp, Error::Load).await?;
        let range: ValueRange = resp.json().await.map_err(|e| Error::Load(e.to_string()))?;
        Ok(range.values)
    }

    /// Replace the entire contents of a table
    pub async fn update_values(&self, table: &str, values: Vec<Vec<String>>) -> Result<()> {
        let url = self.table_url(table, "values")?;
        let resp = self
            .send(self.http.put(url).json(&ValueRange { values }))
            .await
            .map_err(|e| Error::Save(e.to_string()))?;
        error_for_status(resp, Error::Save).await?;
        Ok(())
    }

    /// Empty a table
    pub async fn clear(&self, table: &str) -> Result<()> {
        let url = self.table_url(table, "clear")?;
        let resp = self
            .send(self.http.post(url))
            .await
            .map_err(|e| Error::Save(e.to_string()))?;
        error_for_status(resp, Error::Save).await?;
        Ok(())
    }

    async fn send(
        &self,
        req: reqwest::RequestBuilder,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        req.send().await
    }

    /// `{base}/tables/{table}/{leaf}`, with the table name percent-encoded
    fn table_url(&self, table: &str, leaf: &str) -> Result<reqwest::Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Connection(format!("sheet service URL cannot be a base: {}", self.base)))?
            .pop_if_empty()
            .extend(["tables", table, leaf]);
        Ok(url)
    }
}

/// Map a non-2xx response to the given error variant, carrying the status
/// line and body text.
async fn error_for_status(
    resp: reqwest::Response,
    wrap: fn(String) -> Error,
) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(wrap(format!(
        "sheet service returned {}: {}",
        status,
        body.trim()
    )))
}
