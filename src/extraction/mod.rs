//! Turns free-form model output into normalized claim rows.
//!
//! Stages run in a fixed order: refusal detection, JSON recovery, structural
//! validation, then normalization. The first two stages fail fast with an
//! [`ExtractionError`]; normalization always succeeds.

pub mod citations;
pub mod normalize;
pub mod prompts;
pub mod recovery;
pub mod validation;

use serde_json::Value;

use crate::core::{
    errors::ExtractionError,
    types::{Citation, ClaimRow, ParsedPayload},
};

/// Everything derived from one model response.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub result: Result<ExtractedClaims, ExtractionError>,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedClaims {
    pub payload: ParsedPayload,
    pub rows: Vec<ClaimRow>,
}

/// Recovers, validates and normalizes raw model content.
pub fn extract_claims(raw: &str) -> Result<ExtractedClaims, ExtractionError> {
    recovery::detect_empty_or_refusal(raw)?;
    let json_text = recovery::recover_json_text(raw);
    tracing::debug!(
        raw_len = raw.len(),
        recovered_len = json_text.len(),
        "recovered json candidate"
    );
    let payload = validation::validate(&json_text)?;
    let rows = normalize::normalize(&payload);
    Ok(ExtractedClaims { payload, rows })
}

/// Runs the claim pipeline and, independently of its outcome, collects the
/// response-level citation list.
pub fn process_content(raw: &str, envelope: Option<&Value>) -> ExtractionOutcome {
    let result = extract_claims(raw);
    if let Err(err) = &result {
        tracing::warn!(code = err.code(), "claim extraction failed: {err}");
    }
    ExtractionOutcome {
        result,
        citations: citations::collect_citations(raw, envelope),
    }
}
