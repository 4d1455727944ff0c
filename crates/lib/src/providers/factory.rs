//! # AI Provider Factory
//!
//! Providers are built per generation attempt, once a credential has been
//! resolved, so nothing talks to the network at startup and tests can swap in
//! a stub factory.

use crate::{
    credentials::Credential,
    errors::ProviderError,
    providers::ai::{openai::OpenAiProvider, AiProvider},
    types::ProviderSettings,
};
use std::fmt::Debug;
use tracing::debug;

/// Builds a provider client bound to a credential.
pub trait ProviderFactory: Send + Sync + Debug {
    fn create(&self, credential: &Credential) -> Result<Box<dyn AiProvider>, ProviderError>;
}

/// Creates [`OpenAiProvider`] instances from the configured settings.
#[derive(Debug, Clone)]
pub struct OpenAiProviderFactory {
    settings: ProviderSettings,
}

impl OpenAiProviderFactory {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }
}

impl ProviderFactory for OpenAiProviderFactory {
    fn create(&self, credential: &Credential) -> Result<Box<dyn AiProvider>, ProviderError> {
        debug!(
            model = %self.settings.model_name,
            url = %self.settings.api_url,
            "Creating OpenAI provider."
        );
        Ok(Box::new(OpenAiProvider::new(
            self.settings.api_url.clone(),
            credential.expose().to_string(),
            self.settings.model_name.clone(),
            self.settings.request_timeout_secs,
        )?))
    }
}
