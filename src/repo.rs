//! Progress repository
//!
//! Wraps the sheet client with the fixed `Name | Chapter | Picture` schema.
//! Every save clears the remote table and rewrites it wholesale; there is no
//! incremental path.

use tracing::warn;

use crate::error::Result;
use crate::sheet::SheetClient;
use crate::store::{ProgressEntry, ProgressStore};

/// Header row written ahead of every save
pub const HEADER: [&str; 3] = ["Name", "Chapter", "Picture"];

pub struct ProgressRepository {
    client: SheetClient,
    table: String,
}

impl ProgressRepository {
    pub fn new(client: SheetClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Load all entries from the remote table
    ///
    /// An empty or header-only table yields an empty store. Cells are
    /// coerced, not validated: a row whose chapter does not parse as an
    /// integer is skipped with a warning.
    pub async fn load(&self) -> Result<ProgressStore> {
        let values = self.client.fetch_values(&self.table).await?;
        Ok(entries_from_rows(values))
    }

    /// Overwrite the remote table with the store's current contents
    ///
    /// An empty store leaves just the header row behind.
    pub async fn save(&self, store: &ProgressStore) -> Result<()> {
        self.client.clear(&self.table).await?;
        self.client
            .update_values(&self.table, rows_from_store(store))
            .await
    }
}

fn entries_from_rows(values: Vec<Vec<String>>) -> ProgressStore {
    let mut entries = Vec::new();
    // First row is the header
    for row in values.into_iter().skip(1) {
        let [name, chapter, picture] = match <[String; 3]>::try_from(row) {
            Ok(cells) => cells,
            Err(row) => {
                warn!("Skipping malformed sheet row: {:?}", row);
                continue;
            }
        };
        let chapter = match chapter.trim().parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                warn!("Skipping row for {}: unparsable chapter {:?}", name, chapter);
                continue;
            }
        };
        entries.push(ProgressEntry {
            name,
            chapter,
            picture,
        });
    }
    ProgressStore::from_entries(entries)
}

fn rows_from_store(store: &ProgressStore) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(store.len() + 1);
    rows.push(HEADER.iter().map(|s| s.to_string()).collect());
    for entry in store.entries() {
        rows.push(vec![
            entry.name.clone(),
            entry.chapter.to_string(),
            entry.picture.clone(),
        ]);
    }
    rows
}
