//! # Credential Resolution
//!
//! Finds the model API key. Sources are consulted in a fixed order and the first
//! non-empty value wins:
//!
//! 1. the managed secrets file (trusted deployment configuration),
//! 2. the process environment,
//! 3. a key the user typed into the current session.

use crate::{
    constants::{DEFAULT_API_KEY_ENV_VAR, DEFAULT_SECRET_NAME},
    errors::CredentialError,
};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// An opaque API key. Its `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a secret, returning `None` when it is empty after trimming.
    pub fn new(secret: &str) -> Option<Self> {
        let secret = secret.trim();
        if secret.is_empty() {
            None
        } else {
            Some(Self(secret.to_string()))
        }
    }

    /// The raw secret, for placing in an outbound request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretStore,
    Environment,
    Session,
}

/// A read-only store of named secrets.
pub trait SecretStore: Send + Sync + fmt::Debug {
    fn get(&self, name: &str) -> Option<String>;
}

/// Secrets read once from a TOML file of `name = "value"` pairs.
#[derive(Clone, Default)]
pub struct FileSecretStore {
    values: BTreeMap<String, String>,
}

impl fmt::Debug for FileSecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSecretStore")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .field("values", &"[REDACTED]")
            .finish()
    }
}

impl FileSecretStore {
    /// Loads a secrets file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        if !path.exists() {
            debug!(path = %path.display(), "Secrets file not present; store is empty.");
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|source| CredentialError::SecretsRead {
                path: path.display().to_string(),
                source,
            })?;
        let store = Self::from_toml_str(&content).map_err(|source| {
            CredentialError::SecretsParse {
                path: path.display().to_string(),
                source,
            }
        })?;
        info!(
            path = %path.display(),
            entries = store.values.len(),
            "Loaded secrets file."
        );
        Ok(store)
    }

    /// Parses secrets from TOML text. Non-string values are ignored.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let table: toml::Table = content.parse()?;
        let values = table
            .into_iter()
            .filter_map(|(name, value)| match value {
                toml::Value::String(s) => Some((name, s)),
                _ => None,
            })
            .collect();
        Ok(Self { values })
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Resolves the API key for a generation attempt.
#[derive(Clone, Debug)]
pub struct CredentialResolver {
    store: Option<Arc<dyn SecretStore>>,
    secret_name: String,
    env_var: String,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(None, DEFAULT_SECRET_NAME, DEFAULT_API_KEY_ENV_VAR)
    }
}

impl CredentialResolver {
    pub fn new(store: Option<Arc<dyn SecretStore>>, secret_name: &str, env_var: &str) -> Self {
        Self {
            store,
            secret_name: secret_name.to_string(),
            env_var: env_var.to_string(),
        }
    }

    /// Returns the first non-empty credential, checking the secret store, then
    /// the environment, then the key cached in the caller's session.
    pub fn resolve(
        &self,
        session_credential: Option<&Credential>,
    ) -> Option<(Credential, CredentialSource)> {
        if let Some(credential) = self.from_managed_sources() {
            return Some(credential);
        }
        session_credential.map(|c| (c.clone(), CredentialSource::Session))
    }

    /// Whether a key is available without asking the user for one.
    pub fn has_managed_credential(&self) -> bool {
        self.from_managed_sources().is_some()
    }

    fn from_managed_sources(&self) -> Option<(Credential, CredentialSource)> {
        let from_store = self
            .store
            .as_ref()
            .and_then(|store| store.get(&self.secret_name))
            .and_then(|value| Credential::new(&value));
        if let Some(credential) = from_store {
            return Some((credential, CredentialSource::SecretStore));
        }

        std::env::var(&self.env_var)
            .ok()
            .and_then(|value| Credential::new(&value))
            .map(|credential| (credential, CredentialSource::Environment))
    }
}
