use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Perplexity,
}

/// Validated model payload. Holds the metadata record untouched and the claim
/// entries in the order the model emitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPayload {
    pub metadata: Value,
    pub claims: Vec<RawClaimEntry>,
}

impl ParsedPayload {
    pub fn topic_summary(&self) -> Option<&str> {
        self.metadata.get("topic_summary").and_then(Value::as_str)
    }

    pub fn total_claims(&self) -> Option<u64> {
        self.metadata.get("total_claims").and_then(Value::as_u64)
    }

    pub fn extraction_date(&self) -> Option<&str> {
        self.metadata.get("extraction_date").and_then(Value::as_str)
    }
}

/// One element of the model's `claims` array, shape unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawClaimEntry(pub Value);

impl RawClaimEntry {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Value> for RawClaimEntry {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A URL after redirect unwrapping, with its display domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: String,
    pub domain: String,
}

/// Entry of the flat, response-level source list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub index: usize,
    pub url: String,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRef {
    pub url: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimRow {
    pub id: String,
    pub claim: String,
    pub category: String,
    pub context: String,
    pub sources: Vec<SourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProviderKeyResponse {
    pub stored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionFailure {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicQueryResponse {
    pub topic: String,
    pub received_at: DateTime<Utc>,
    pub raw_content: String,
    pub metadata: Option<Value>,
    pub claims: Vec<ClaimRow>,
    pub citations: Vec<Citation>,
    pub failure: Option<ExtractionFailure>,
}
