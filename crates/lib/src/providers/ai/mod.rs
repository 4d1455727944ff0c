pub mod openai;

use crate::{errors::ProviderError, types::CompletionRequest};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a completion provider.
///
/// One call is one outbound request: implementations must not retry.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends the filled prompt and returns the raw completion text.
    ///
    /// The text is returned as the provider sent it; empty-response checks
    /// belong to the caller.
    async fn generate(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

dyn_clone::clone_trait_object!(AiProvider);
