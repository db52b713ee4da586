use crate::core::errors::ExtractionError;

const REFUSAL_MARKERS: &[&str] = &[
    "sorry",
    "i apologize",
    "apologies",
    "unable to find",
    "could not find",
    "couldn't find",
    "not found",
    "no information",
    "maaf",
    "tidak ditemukan",
    "tidak dapat menemukan",
];

/// Rejects content that cannot carry a claim payload before any parsing runs.
///
/// A refusal needs a marker phrase and no sign of JSON at all, so a payload
/// that quotes "not found" inside a claim still goes through.
pub fn detect_empty_or_refusal(raw: &str) -> Result<(), ExtractionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractionError::EmptyResponse);
    }

    let lowered = trimmed.to_lowercase();
    let has_marker = REFUSAL_MARKERS.iter().any(|marker| lowered.contains(marker));
    let looks_like_json = lowered.contains('{') || lowered.contains("\"claims\"");
    if has_marker && !looks_like_json {
        return Err(ExtractionError::TopicNotFound);
    }

    Ok(())
}

/// Strips code fences and slices the outermost `{ ... }` span.
///
/// When no brace pair is found the cleaned text is returned as is, so the
/// parser reports a syntax error instead of silently dropping content.
pub fn recover_json_text(raw: &str) -> String {
    let cleaned = raw.replace("```json", "").replace("```", "");

    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => cleaned[start..=end].to_string(),
        _ => cleaned,
    }
}
