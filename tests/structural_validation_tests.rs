use claimscope_lib::{core::errors::ExtractionError, extraction::validation::validate};

#[test]
fn valid_payload_keeps_metadata_and_claim_order() {
    let payload = validate(
        r#"{
          "metadata": {"topic_summary": "Batteries", "total_claims": 2, "extraction_date": "2024-05-01"},
          "claims": [{"claim": "first"}, {"claim": "second"}]
        }"#,
    )
    .expect("payload should validate");

    assert_eq!(payload.topic_summary(), Some("Batteries"));
    assert_eq!(payload.total_claims(), Some(2));
    assert_eq!(payload.extraction_date(), Some("2024-05-01"));
    assert_eq!(payload.claims.len(), 2);
    assert_eq!(payload.claims[1].get("claim"), Some(&serde_json::json!("second")));
}

#[test]
fn missing_metadata_or_claims_is_incomplete_schema() {
    assert_eq!(
        validate(r#"{"claims": []}"#),
        Err(ExtractionError::IncompleteSchema("metadata"))
    );
    assert_eq!(
        validate(r#"{"metadata": {}}"#),
        Err(ExtractionError::IncompleteSchema("claims"))
    );
    assert_eq!(
        validate(r#"{"metadata": null, "claims": []}"#),
        Err(ExtractionError::IncompleteSchema("metadata"))
    );
}

#[test]
fn non_object_root_is_incomplete_schema() {
    let err = validate(r#"[{"claim": "x"}]"#).expect_err("array root");
    assert_eq!(err.code(), "INCOMPLETE_SCHEMA");
}

#[test]
fn claims_must_be_an_array() {
    assert_eq!(
        validate(r#"{"metadata": {}, "claims": {"claim": "x"}}"#),
        Err(ExtractionError::InvalidClaimsType)
    );
    assert_eq!(
        validate(r#"{"metadata": {}, "claims": "none"}"#),
        Err(ExtractionError::InvalidClaimsType)
    );
}

#[test]
fn empty_claims_array_is_not_an_error() {
    let payload = validate(r#"{"metadata": {}, "claims": []}"#).expect("empty claims are valid");
    assert!(payload.claims.is_empty());
}

#[test]
fn syntax_errors_are_malformed_json() {
    let err = validate("{ not json").expect_err("syntax error");
    assert_eq!(err.code(), "MALFORMED_JSON");
}
