use serde_json::Value;

use crate::core::{
    errors::ExtractionError,
    types::{ParsedPayload, RawClaimEntry},
};

/// Parses recovered text and checks the minimal payload shape.
///
/// `null` counts as missing for both required fields. An empty `claims`
/// array is a valid result.
pub fn validate(json_text: &str) -> Result<ParsedPayload, ExtractionError> {
    let mut parsed: Value = serde_json::from_str(json_text)
        .map_err(|err| ExtractionError::MalformedJson(err.to_string()))?;

    let metadata = take_present(&mut parsed, "metadata")
        .ok_or(ExtractionError::IncompleteSchema("metadata"))?;
    let claims =
        take_present(&mut parsed, "claims").ok_or(ExtractionError::IncompleteSchema("claims"))?;

    let Value::Array(entries) = claims else {
        return Err(ExtractionError::InvalidClaimsType);
    };

    Ok(ParsedPayload {
        metadata,
        claims: entries.into_iter().map(RawClaimEntry).collect(),
    })
}

fn take_present(root: &mut Value, key: &str) -> Option<Value> {
    root.as_object_mut()
        .and_then(|object| object.remove(key))
        .filter(|value| !value.is_null())
}
