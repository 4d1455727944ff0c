//! # Content Generator
//!
//! Turns a validated [`GenerationRequest`] into generated text: resolve the
//! credential, build a provider, fill the template, make exactly one
//! completion call and reject empty answers.

use crate::{
    constants::GENERATION_TEMPERATURE,
    credentials::{Credential, CredentialResolver},
    errors::GenerationError,
    prompts::template_for,
    providers::factory::ProviderFactory,
    types::{CompletionRequest, GeneratedContent, GenerationRequest, GenerationResult},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ContentGenerator {
    resolver: CredentialResolver,
    factory: Arc<dyn ProviderFactory>,
    max_tokens: Option<u32>,
}

impl ContentGenerator {
    pub fn new(resolver: CredentialResolver, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            resolver,
            factory,
            max_tokens: None,
        }
    }

    /// Caps the completion length sent to the provider.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    /// Builds the completion for a request without sending it.
    pub fn completion_request(&self, request: &GenerationRequest) -> CompletionRequest {
        let prompt = template_for(request.content_type()).fill(request.sector(), request.topic());
        CompletionRequest {
            prompt,
            temperature: GENERATION_TEMPERATURE,
            max_tokens: self.max_tokens,
        }
    }

    /// Generates content for a request.
    ///
    /// `session_credential` is the key the user entered in their session, if
    /// any; it is only used when neither the secret store nor the environment
    /// provides one. Without any credential no provider is built and no
    /// request is sent.
    #[instrument(skip(self, session_credential), fields(content_type = %request.content_type()))]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        session_credential: Option<&Credential>,
    ) -> GenerationResult {
        let (credential, source) = self
            .resolver
            .resolve(session_credential)
            .ok_or(GenerationError::MissingCredential)?;
        debug!(?source, "Resolved API credential.");

        let provider = self.factory.create(&credential)?;
        let completion = self.completion_request(request);
        debug!(prompt = %completion.prompt, "Filled prompt template.");

        let text = provider.generate(&completion).await.inspect_err(|e| {
            warn!(error = %e, "Completion request failed.");
        })?;

        if text.trim().is_empty() {
            warn!("AI provider returned an empty completion.");
            return Err(GenerationError::EmptyResponse);
        }

        info!(chars = text.len(), "Generated content.");
        Ok(GeneratedContent {
            content_type: request.content_type(),
            text,
        })
    }
}
