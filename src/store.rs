//! In-memory progress table
//!
//! The session's working copy of the shared table. The remote sheet is the
//! durable source of truth; this structure is rewritten to it after every
//! mutation.

use serde::{Deserialize, Serialize};

/// Total chapters in the book. The dashboard progress fraction is
/// `chapter / TOTAL_CHAPTERS`, deliberately not capped at 1.0.
pub const TOTAL_CHAPTERS: i64 = 66;

/// One member's logged progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub name: String,
    pub chapter: i64,
    pub picture: String,
}

/// Ordered collection of progress entries
///
/// Invariant: at most one entry per member name, maintained by
/// remove-before-push in [`upsert`](Self::upsert). Insertion order is
/// preserved but carries no meaning; display order is chapter descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressStore {
    entries: Vec<ProgressEntry>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ProgressEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    /// Replace any existing entry for this member and append the new one
    pub fn upsert(&mut self, entry: ProgressEntry) {
        self.remove(&entry.name);
        self.entries.push(entry);
    }

    /// Remove the member's entry, if present. Returns whether one existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// Entries sorted by chapter descending; ties keep table order
    /// (`sort_by` is stable).
    pub fn sorted_by_chapter_desc(&self) -> Vec<&ProgressEntry> {
        let mut sorted: Vec<&ProgressEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.chapter.cmp(&a.chapter));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, chapter: i64) -> ProgressEntry {
        ProgressEntry {
            name: name.to_string(),
            chapter,
            picture: format!("photos/{name}.png"),
        }
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let mut store = ProgressStore::new();
        store.upsert(entry("Lindy", 12));
        store.upsert(entry("Lindy", 30));

        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].chapter, 30);
        assert_eq!(store.entries()[0].picture, "photos/Lindy.png");
    }

    #[test]
    fn at_most_one_entry_per_member() {
        let mut store = ProgressStore::new();
        store.upsert(entry("Lindy", 12));
        store.upsert(entry("Madison", 5));
        store.upsert(entry("Lindy", 30));
        store.remove("Madison");
        store.upsert(entry("Madison", 8));
        store.upsert(entry("Madison", 9));

        for (i, a) in store.entries().iter().enumerate() {
            for b in &store.entries()[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = ProgressStore::new();
        store.upsert(entry("Anna", 20));

        assert!(store.remove("Anna"));
        let after_first = store.clone();
        assert!(!store.remove("Anna"));
        assert_eq!(store, after_first);
    }

    #[test]
    fn remove_missing_member_leaves_store_unchanged() {
        let mut store = ProgressStore::new();
        store.upsert(entry("Liz", 3));
        let before = store.clone();

        assert!(!store.remove("Kelsie"));
        assert_eq!(store, before);
    }

    #[test]
    fn sorted_by_chapter_descending() {
        let mut store = ProgressStore::new();
        store.upsert(entry("Anna", 10));
        store.upsert(entry("Madison", 40));
        store.upsert(entry("Liz", 25));

        let sorted = store.sorted_by_chapter_desc();
        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Madison", "Liz", "Anna"]);
    }

    #[test]
    fn sort_ties_keep_table_order() {
        let mut store = ProgressStore::new();
        store.upsert(entry("Anna", 10));
        store.upsert(entry("Liz", 10));
        store.upsert(entry("Kelsie", 10));

        let sorted = store.sorted_by_chapter_desc();
        let names: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Anna", "Liz", "Kelsie"]);
    }
}
