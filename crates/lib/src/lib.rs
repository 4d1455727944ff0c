//! # Template-Driven Content Generation
//!
//! This crate fills one of five fixed prompt templates with an industry sector
//! and a topic, sends the prompt to an OpenAI-compatible completion provider,
//! and returns the generated text or a typed failure.

pub mod constants;
pub mod credentials;
pub mod errors;
pub mod generator;
pub mod prompts;
pub mod providers;
pub mod types;

pub use credentials::{Credential, CredentialResolver, CredentialSource, FileSecretStore};
pub use errors::{GenerationError, ProviderError, ValidationError};
pub use generator::ContentGenerator;
pub use prompts::{template_for, PromptTemplate};
pub use types::{
    CompletionRequest, ContentType, GeneratedContent, GenerationRequest, GenerationResult,
    ProviderSettings,
};
