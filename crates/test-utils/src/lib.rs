use async_trait::async_trait;
use contentgen::credentials::Credential;
use contentgen::errors::ProviderError;
use contentgen::providers::ai::AiProvider;
use contentgen::providers::factory::ProviderFactory;
use contentgen::types::CompletionRequest;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Mock AI Provider ---

/// How a [`MockAiProvider`] answers.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Returns the prompt it was sent.
    Echo,
    /// Returns the same text for every prompt.
    Fixed(String),
    /// Fails as if the provider answered with an error status.
    Fail { status: u16, message: String },
    /// Fails as if the request timed out.
    Timeout,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    behavior: MockBehavior,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAiProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn fixed(text: &str) -> Self {
        Self::new(MockBehavior::Fixed(text.to_string()))
    }

    /// Holds every answer back for `delay`, to keep a generation in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::Echo => Ok(request.prompt.clone()),
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Fail { status, message } => Err(ProviderError::AiApi {
                status: *status,
                message: message.clone(),
            }),
            MockBehavior::Timeout => Err(ProviderError::Timeout(1)),
        }
    }
}

// --- Mock Provider Factory ---

/// Hands out clones of one [`MockAiProvider`] and records the keys it saw.
#[derive(Clone, Debug)]
pub struct MockProviderFactory {
    provider: MockAiProvider,
    credentials: Arc<Mutex<Vec<String>>>,
}

impl MockProviderFactory {
    pub fn new(provider: MockAiProvider) -> Self {
        Self {
            provider,
            credentials: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The shared provider, for inspecting its recorded calls.
    pub fn provider(&self) -> &MockAiProvider {
        &self.provider
    }

    /// The raw keys passed to `create`, in order.
    pub fn seen_credentials(&self) -> Vec<String> {
        self.credentials.lock().unwrap().clone()
    }
}

impl ProviderFactory for MockProviderFactory {
    fn create(&self, credential: &Credential) -> Result<Box<dyn AiProvider>, ProviderError> {
        self.credentials
            .lock()
            .unwrap()
            .push(credential.expose().to_string());
        Ok(Box::new(self.provider.clone()))
    }
}
