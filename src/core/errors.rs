use serde::ser::SerializeStruct;
use thiserror::Error;

/// Failure kinds raised while turning raw model content into a claim payload.
///
/// Recovery and validation stop at the first of these; normalization never
/// produces one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("the model returned an empty response")]
    EmptyResponse,
    #[error("the model could not find information about this topic")]
    TopicNotFound,
    #[error("the model likely returned invalid JSON formatting: {0}")]
    MalformedJson(String),
    #[error("response JSON is missing required field: {0}")]
    IncompleteSchema(&'static str),
    #[error("response field `claims` must be an array")]
    InvalidClaimsType,
}

impl ExtractionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyResponse => "EMPTY_RESPONSE",
            Self::TopicNotFound => "TOPIC_NOT_FOUND",
            Self::MalformedJson(_) => "MALFORMED_JSON",
            Self::IncompleteSchema(_) => "INCOMPLETE_SCHEMA",
            Self::InvalidClaimsType => "INVALID_CLAIMS_TYPE",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("provider auth failed")]
    ProviderAuth,
    #[error("provider rate limited")]
    ProviderRateLimited,
    #[error("provider timeout")]
    ProviderTimeout,
    #[error("provider invalid response: {0}")]
    ProviderInvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("keyring error: {0}")]
    Keyring(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AppError", 3)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field("retryable", &self.retryable())?;
        state.end()
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Extraction(inner) => inner.code(),
            Self::ProviderAuth => "PROVIDER_AUTH",
            Self::ProviderRateLimited => "PROVIDER_RATE_LIMITED",
            Self::ProviderTimeout => "PROVIDER_TIMEOUT",
            Self::ProviderInvalidResponse(_) => "PROVIDER_INVALID_RESPONSE",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Keyring(_) => "KEYRING_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderRateLimited | Self::ProviderTimeout | Self::Network(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
