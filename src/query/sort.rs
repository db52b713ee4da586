use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::types::ClaimRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Claim,
    Category,
    Context,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::Category => "category",
            Self::Context => "context",
        }
    }

    fn field<'a>(&self, row: &'a ClaimRow) -> &'a str {
        match self {
            Self::Claim => &row.claim,
            Self::Category => &row.category,
            Self::Context => &row.context,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current column and direction. Starts at category, ascending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Category,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Same key flips direction; a different key restarts ascending.
    pub fn select(self, key: SortKey) -> Self {
        if key == self.key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// Stable sort into a new vector; the input slice is left untouched.
///
/// Keys compare case-insensitively. Descending reverses the comparator, not
/// the output, so equal keys keep their input order in both directions.
pub fn sort_rows<'a>(rows: &[&'a ClaimRow], state: SortState) -> Vec<&'a ClaimRow> {
    let mut keyed = rows
        .iter()
        .map(|row| (state.key.field(row).to_lowercase(), *row))
        .collect::<Vec<_>>();
    keyed.sort_by(|(left, _), (right, _)| compare(left, right, state.direction));
    keyed.into_iter().map(|(_, row)| row).collect()
}

fn compare(left: &str, right: &str, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => left.cmp(right),
        SortDirection::Descending => right.cmp(left),
    }
}
