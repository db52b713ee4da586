use crate::{
    core::types::ClaimRow,
    query::{
        search::ClaimDataset,
        sort::{sort_rows, SortKey, SortState},
    },
};

/// Filter then stable-sort, borrowing rows from the dataset.
pub fn query_rows<'a>(dataset: &'a ClaimDataset, query: &str, sort: SortState) -> Vec<&'a ClaimRow> {
    let filtered = dataset.filter(query);
    sort_rows(&filtered, sort)
}

/// Browsing state owned by the presentation layer. Every change returns a new
/// value; nothing is mutated in place.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub dataset: ClaimDataset,
    pub search: String,
    pub sort: SortState,
}

impl BrowserState {
    /// A fresh response replaces the dataset and resets search and sort.
    pub fn with_rows(rows: Vec<ClaimRow>) -> Self {
        Self {
            dataset: ClaimDataset::new(rows),
            ..Self::default()
        }
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    pub fn with_sort_key(&self, key: SortKey) -> Self {
        Self {
            sort: self.sort.select(key),
            ..self.clone()
        }
    }

    pub fn visible_rows(&self) -> Vec<&ClaimRow> {
        query_rows(&self.dataset, &self.search, self.sort)
    }
}
