use thiserror::Error;

/// Errors raised while talking to the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error ({status}): {message}")]
    AiApi { status: u16, message: String },
    #[error("AI provider did not answer within {0} seconds")]
    Timeout(u64),
}

impl ProviderError {
    /// Whether the failure was the request timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}

/// Errors raised while resolving the model API key.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to read secrets file '{path}': {source}")]
    SecretsRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse secrets file '{path}': {source}")]
    SecretsParse {
        path: String,
        source: toml::de::Error,
    },
}

/// The failure half of a generation attempt.
///
/// Every variant is terminal for the current action; nothing is retried.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No OpenAI API key found. Add `key` to the secrets file, set OPENAI_API_KEY, or enter a key in the form.")]
    MissingCredential,
    #[error("Content generation failed: {0}")]
    GenerationFailed(#[from] ProviderError),
    #[error("The AI provider returned an empty response. Try again or adjust the topic.")]
    EmptyResponse,
}

/// A form field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter both sector and topic!")]
    MissingSector,
    #[error("Please enter both sector and topic!")]
    MissingTopic,
}
