use std::sync::Arc;

use uuid::Uuid;

use crate::core::types::ClaimRow;

/// Immutable snapshot of one query's rows plus the lowercase search index.
///
/// A new response replaces the whole snapshot; the index is built once here
/// and never recomputed per search.
#[derive(Debug, Clone)]
pub struct ClaimDataset {
    version: Uuid,
    rows: Arc<[ClaimRow]>,
    index: Arc<[String]>,
}

impl ClaimDataset {
    pub fn new(rows: Vec<ClaimRow>) -> Self {
        let index = rows.iter().map(index_text).collect::<Vec<_>>();
        Self {
            version: Uuid::new_v4(),
            rows: rows.into(),
            index: index.into(),
        }
    }

    pub fn version(&self) -> Uuid {
        self.version
    }

    pub fn rows(&self) -> &[ClaimRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn index_entry(&self, position: usize) -> Option<&str> {
        self.index.get(position).map(String::as_str)
    }

    /// Rows whose index contains the trimmed, lowercased query, in dataset
    /// order. A blank query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&ClaimRow> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows
            .iter()
            .zip(self.index.iter())
            .filter(|(_, haystack)| haystack.contains(needle.as_str()))
            .map(|(row, _)| row)
            .collect()
    }
}

impl Default for ClaimDataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn index_text(row: &ClaimRow) -> String {
    format!("{} {} {}", row.claim, row.context, row.category).to_lowercase()
}
