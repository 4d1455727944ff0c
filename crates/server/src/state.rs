//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds the configuration, the
//! content generator and the in-memory session store, making them accessible
//! to all request handlers.

use crate::{config::AppConfig, session::SessionStore};
use contentgen::{
    credentials::SecretStore,
    providers::factory::{OpenAiProviderFactory, ProviderFactory},
    ContentGenerator, CredentialResolver, FileSecretStore,
};
use std::{path::Path, sync::Arc, time::Duration};
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// Fills templates and calls the completion provider.
    pub generator: Arc<ContentGenerator>,
    /// Per-browser sessions, keyed by cookie.
    pub sessions: SessionStore,
}

/// Builds the shared application state from the configuration.
///
/// The secrets file is read once here. Provider clients are created per
/// generation by an [`OpenAiProviderFactory`], so no key is needed at startup.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let factory = Arc::new(OpenAiProviderFactory::new(config.provider.clone()));
    build_app_state_with_factory(config, factory)
}

/// Like [`build_app_state`], with a caller-supplied provider factory.
pub fn build_app_state_with_factory(
    config: AppConfig,
    factory: Arc<dyn ProviderFactory>,
) -> anyhow::Result<AppState> {
    let store = FileSecretStore::load(Path::new(&config.credentials.secrets_path))?;
    let store: Arc<dyn SecretStore> = Arc::new(store);
    let resolver = CredentialResolver::new(
        Some(store),
        &config.credentials.secret_name,
        &config.credentials.env_var,
    );
    info!(
        managed_key = resolver.has_managed_credential(),
        model = %config.provider.model_name,
        "Initialized content generator."
    );

    let generator =
        ContentGenerator::new(resolver, factory).with_max_tokens(config.provider.max_tokens);
    let sessions = SessionStore::new(Duration::from_secs(config.session_idle_minutes * 60));

    Ok(AppState {
        config: Arc::new(config),
        generator: Arc::new(generator),
        sessions,
    })
}
