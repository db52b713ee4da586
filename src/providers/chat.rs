use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::{
    core::{
        config::AppConfig,
        errors::{AppError, AppResult},
    },
    extraction::prompts::{claims_prompt, SYSTEM_PROMPT},
};

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
}

/// Text content of the first choice plus the full response body.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub envelope: Value,
}

impl ChatCompletion {
    /// Missing content becomes an empty string so extraction reports it as an
    /// empty response rather than a transport failure.
    pub fn from_envelope(envelope: Value) -> Self {
        let content = envelope
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { content, envelope }
    }
}

impl ChatClient {
    pub fn new(
        api_base: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(Self {
            http,
            api_base: api_base.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(config.api_base.clone(), config.model.clone(), config.timeout)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete_topic(&self, api_key: &str, topic: &str) -> AppResult<ChatCompletion> {
        self.complete(api_key, SYSTEM_PROMPT, &claims_prompt(topic)).await
    }

    pub async fn complete(
        &self,
        api_key: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> AppResult<ChatCompletion> {
        let endpoint = format!("{}/chat/completions", self.api_base);
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "temperature": 0.2
        });

        tracing::debug!(model = %self.model, %endpoint, "sending chat completion request");
        let response = self
            .http
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AppError::ProviderTimeout
                } else {
                    AppError::Network(err.to_string())
                }
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AppError::ProviderAuth),
            StatusCode::TOO_MANY_REQUESTS => return Err(AppError::ProviderRateLimited),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ProviderInvalidResponse(format!(
                    "status {status} body {body}"
                )));
            }
            _ => {}
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|err| AppError::ProviderInvalidResponse(err.to_string()))?;
        Ok(ChatCompletion::from_envelope(envelope))
    }
}
