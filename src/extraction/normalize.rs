use serde_json::Value;

use crate::{
    core::types::{ClaimRow, ParsedPayload, RawClaimEntry, SourceRef},
    extraction::citations::resolve_url,
};

pub const DEFAULT_CATEGORY: &str = "General";

const NO_SOURCE_MARKERS: &[&str] = &["no source", "tidak ada sumber"];

/// Maps every claim entry to a row, in order. Never fails: absent or
/// mistyped fields fall back to defaults so one bad entry cannot sink the batch.
pub fn normalize(payload: &ParsedPayload) -> Vec<ClaimRow> {
    let rows = payload
        .claims
        .iter()
        .enumerate()
        .map(|(idx, entry)| normalize_entry(idx, entry))
        .collect::<Vec<_>>();
    tracing::debug!(rows = rows.len(), "normalized claim entries");
    rows
}

pub fn normalize_entry(idx: usize, entry: &RawClaimEntry) -> ClaimRow {
    ClaimRow {
        id: format!("claim-{idx}"),
        claim: claim_text(entry),
        category: category(entry),
        context: context(entry),
        sources: sources(entry),
        keywords: keywords(entry),
    }
}

pub fn claim_text(entry: &RawClaimEntry) -> String {
    text_field(entry, "claim", "Claim").unwrap_or_default()
}

pub fn context(entry: &RawClaimEntry) -> String {
    text_field(entry, "context", "Context").unwrap_or_default()
}

pub fn category(entry: &RawClaimEntry) -> String {
    text_field(entry, "category", "Category").unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Prefers a non-empty `sources` array; otherwise the single `source` string.
pub fn sources(entry: &RawClaimEntry) -> Vec<SourceRef> {
    match entry
        .get("sources")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
    {
        Some(items) => items.iter().filter_map(source_from_item).collect(),
        None => single_source(entry).into_iter().collect(),
    }
}

/// Raw `keywords` array, elements untouched, for export consumers.
pub fn keywords(entry: &RawClaimEntry) -> Option<Vec<Value>> {
    entry.get("keywords").and_then(Value::as_array).cloned()
}

fn text_field(entry: &RawClaimEntry, lower: &str, capitalized: &str) -> Option<String> {
    [lower, capitalized]
        .iter()
        .filter_map(|key| entry.get(key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn source_from_item(item: &Value) -> Option<SourceRef> {
    let (url, title) = match item {
        Value::String(url) => (url.as_str(), None),
        Value::Object(_) => (
            item.get("url").and_then(Value::as_str)?,
            item.get("title").and_then(Value::as_str),
        ),
        _ => return None,
    };
    if url.trim().is_empty() {
        return None;
    }

    let resolved = resolve_url(url);
    Some(SourceRef {
        url: resolved.url,
        domain: resolved.domain,
        title: title.map(ToString::to_string),
    })
}

fn single_source(entry: &RawClaimEntry) -> Option<SourceRef> {
    let raw = text_field(entry, "source", "Source")?;
    let lowered = raw.to_lowercase();
    if NO_SOURCE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return None;
    }

    let resolved = resolve_url(&raw);
    Some(SourceRef {
        url: resolved.url,
        domain: resolved.domain,
        title: None,
    })
}
