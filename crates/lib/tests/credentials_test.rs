//! # Credential Resolution Tests
//!
//! These tests pin the resolution order: secrets file, then environment, then
//! the key cached in the session. Environment variables are process-global, so
//! every test that touches them is serialized and uses its own variable name.

use contentgen::credentials::{
    Credential, CredentialResolver, CredentialSource, FileSecretStore, SecretStore,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn store_with_key(value: &str) -> Arc<dyn SecretStore> {
    Arc::new(FileSecretStore::from_toml_str(&format!("key = \"{value}\"")).unwrap())
}

#[test]
#[serial]
fn test_secret_store_wins_over_environment_and_session() {
    let env_var = "CONTENTGEN_TEST_KEY_STORE_FIRST";
    env::set_var(env_var, "from-env");
    let resolver = CredentialResolver::new(Some(store_with_key("from-store")), "key", env_var);
    let session = Credential::new("from-session");

    let (credential, source) = resolver.resolve(session.as_ref()).unwrap();
    assert_eq!(credential.expose(), "from-store");
    assert_eq!(source, CredentialSource::SecretStore);

    env::remove_var(env_var);
}

#[test]
#[serial]
fn test_environment_wins_over_session() {
    let env_var = "CONTENTGEN_TEST_KEY_ENV_SECOND";
    env::set_var(env_var, "from-env");
    let resolver = CredentialResolver::new(None, "key", env_var);
    let session = Credential::new("from-session");

    let (credential, source) = resolver.resolve(session.as_ref()).unwrap();
    assert_eq!(credential.expose(), "from-env");
    assert_eq!(source, CredentialSource::Environment);
    assert!(resolver.has_managed_credential());

    env::remove_var(env_var);
}

#[test]
#[serial]
fn test_session_key_used_when_nothing_else_is_set() {
    let env_var = "CONTENTGEN_TEST_KEY_SESSION_LAST";
    env::remove_var(env_var);
    let resolver = CredentialResolver::new(Some(store_with_key("   ")), "key", env_var);
    let session = Credential::new("from-session");

    assert!(!resolver.has_managed_credential());
    let (credential, source) = resolver.resolve(session.as_ref()).unwrap();
    assert_eq!(credential.expose(), "from-session");
    assert_eq!(source, CredentialSource::Session);
}

#[test]
#[serial]
fn test_blank_values_are_skipped() {
    let env_var = "CONTENTGEN_TEST_KEY_BLANK";
    env::set_var(env_var, "  ");
    let resolver = CredentialResolver::new(Some(store_with_key("")), "key", env_var);

    assert!(resolver.resolve(None).is_none());
    assert!(Credential::new(" \t ").is_none());

    env::remove_var(env_var);
}

#[test]
fn test_file_secret_store_reads_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "key = \"sk-file\"\nother = 42").unwrap();

    let store = FileSecretStore::load(file.path()).unwrap();
    assert_eq!(store.get("key"), Some("sk-file".to_string()));
    assert_eq!(store.get("other"), None, "non-string values are ignored");
}

#[test]
fn test_missing_secrets_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSecretStore::load(&dir.path().join("secrets.toml")).unwrap();
    assert_eq!(store.get("key"), None);
}

#[test]
fn test_malformed_secrets_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "key = = broken").unwrap();
    assert!(FileSecretStore::load(file.path()).is_err());
}

#[test]
fn test_credential_debug_is_redacted() {
    let credential = Credential::new("sk-very-secret").unwrap();
    let rendered = format!("{credential:?}");
    assert!(!rendered.contains("sk-very-secret"));

    let store = FileSecretStore::from_toml_str("key = \"sk-very-secret\"").unwrap();
    assert!(!format!("{store:?}").contains("sk-very-secret"));
}
