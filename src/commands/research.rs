use chrono::Utc;

use crate::{
    core::{
        config::AppConfig,
        errors::{AppError, AppResult},
        types::{ExtractionFailure, Provider, TopicQueryResponse},
    },
    extraction::process_content,
    providers::chat::{ChatClient, ChatCompletion},
    security::keyring,
};

/// Key from the environment override when set, otherwise the OS keyring.
pub fn resolve_api_key(config: &AppConfig) -> AppResult<String> {
    match &config.api_key_override {
        Some(key) => Ok(key.clone()),
        None => keyring::get_provider_key(Provider::Perplexity),
    }
}

pub async fn run_topic_query(
    client: &ChatClient,
    api_key: &str,
    topic: &str,
) -> AppResult<TopicQueryResponse> {
    if topic.trim().is_empty() {
        return Err(AppError::InvalidInput("topic cannot be empty".to_string()));
    }

    tracing::info!(topic = topic.trim(), model = client.model(), "running topic query");
    let completion = client.complete_topic(api_key, topic).await?;
    Ok(build_response(topic, completion))
}

/// Extraction failures never fail the call: the response carries the failure
/// and the raw content for a fallback view.
pub fn build_response(topic: &str, completion: ChatCompletion) -> TopicQueryResponse {
    let outcome = process_content(&completion.content, Some(&completion.envelope));
    let (metadata, claims, failure) = match outcome.result {
        Ok(extracted) => (Some(extracted.payload.metadata), extracted.rows, None),
        Err(err) => (
            None,
            vec![],
            Some(ExtractionFailure {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        ),
    };
    tracing::info!(
        claims = claims.len(),
        citations = outcome.citations.len(),
        failed = failure.is_some(),
        "topic query processed"
    );

    TopicQueryResponse {
        topic: topic.trim().to_string(),
        received_at: Utc::now(),
        raw_content: completion.content,
        metadata,
        claims,
        citations: outcome.citations,
        failure,
    }
}
