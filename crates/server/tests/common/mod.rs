//! # Common Test Utilities
//!
//! `TestApp` spawns a real server on a random port. By default the server
//! talks to an `httpmock::MockServer` standing in for the chat completions
//! endpoint; tests can instead inject a provider factory from
//! `contentgen-test-utils`.

// Not every test binary uses every helper.
#![allow(unused)]

use anyhow::Result;
use contentgen::{providers::factory::ProviderFactory, ProviderSettings};
use contentgen_server::{
    config::{AppConfig, CredentialsConfig},
    serve,
    state::{build_app_state, build_app_state_with_factory},
};
use httpmock::MockServer;
use reqwest::{redirect::Policy, Client};
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};

/// The path the mock completion endpoint is served on.
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// The API key written to the secrets file by [`TestOptions::with_secret_key`].
pub const TEST_API_KEY: &str = "sk-test-secret";

// Never set, so the environment never supplies a key.
const UNSET_ENV_VAR: &str = "CONTENTGEN_TEST_NO_SUCH_API_KEY";

#[derive(Default)]
pub struct TestOptions {
    secret_key: Option<String>,
    factory: Option<Arc<dyn ProviderFactory>>,
    request_timeout_secs: Option<u64>,
}

impl TestOptions {
    pub fn with_secret_key(mut self) -> Self {
        self.secret_key = Some(TEST_API_KEY.to_string());
        self
    }

    pub fn with_factory(mut self, factory: Arc<dyn ProviderFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _secrets_dir: TempDir,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns a server whose secrets file holds [`TEST_API_KEY`].
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(TestOptions::default().with_secret_key()).await
    }

    pub async fn spawn_with(options: TestOptions) -> Result<Self> {
        dotenvy::dotenv().ok();
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;

        let secrets_dir = tempfile::tempdir()?;
        let secrets_path = secrets_dir.path().join("secrets.toml");
        if let Some(key) = &options.secret_key {
            std::fs::write(&secrets_path, format!("key = \"{key}\"\n"))?;
        }

        let config = AppConfig {
            port: 0,
            session_idle_minutes: 120,
            provider: ProviderSettings {
                api_url: mock_server.url(COMPLETIONS_PATH),
                request_timeout_secs: options.request_timeout_secs.unwrap_or(5),
                ..ProviderSettings::default()
            },
            credentials: CredentialsConfig {
                secrets_path: secrets_path.display().to_string(),
                env_var: UNSET_ENV_VAR.to_string(),
                ..CredentialsConfig::default()
            },
        };

        let app_state = match options.factory {
            Some(factory) => build_app_state_with_factory(config, factory)?,
            None => build_app_state(config)?,
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let server_handle = tokio::spawn(async move {
            if let Err(e) = serve(listener, app_state).await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        // Redirects are not followed so tests can assert on them.
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            address,
            client,
            mock_server,
            _secrets_dir: secrets_dir,
            _server_handle: server_handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// A second browser: same server, separate cookie jar.
    pub fn new_client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to build client")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send form")
    }

    pub async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to send JSON request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn page(&self) -> String {
        self.get("/").await.text().await.expect("Failed to read page")
    }

    pub async fn session(&self) -> Value {
        let body: Value = self
            .get("/api/session")
            .await
            .json()
            .await
            .expect("Failed to parse session JSON");
        body["result"].clone()
    }
}

/// A chat completions response with one choice.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
