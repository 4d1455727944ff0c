//! # OpenAI Provider Tests
//!
//! Runs `OpenAiProvider` against a `wiremock` server standing in for the chat
//! completions endpoint.

use contentgen::providers::ai::{openai::OpenAiProvider, AiProvider};
use contentgen::{CompletionRequest, ProviderError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(prompt: &str) -> CompletionRequest {
    CompletionRequest {
        prompt: prompt.to_string(),
        temperature: 0.75,
        max_tokens: None,
    }
}

fn provider_for(server: &MockServer, timeout_secs: u64) -> OpenAiProvider {
    // `try_init` is used to prevent panic if the logger is already initialized.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();

    OpenAiProvider::new(
        format!("{}/v1/chat/completions", server.uri()),
        "sk-test".to_string(),
        "gpt-test".to_string(),
        timeout_secs,
    )
    .expect("Failed to create OpenAiProvider")
}

#[tokio::test]
async fn test_sends_prompt_and_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "temperature": 0.75,
            "stream": false,
            "messages": [{"role": "user", "content": "Write about Fintech"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Fintech is booming."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider_for(&server, 5)
        .generate(&completion("Write about Fintech"))
        .await
        .unwrap();

    assert_eq!(text, "Fintech is booming.");
}

#[tokio::test]
async fn test_max_tokens_is_omitted_unless_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "max_tokens": 300 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "capped"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = completion("prompt");
    request.max_tokens = Some(300);
    let text = provider_for(&server, 5).generate(&request).await.unwrap();
    assert_eq!(text, "capped");
}

#[tokio::test]
async fn test_error_status_becomes_ai_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
        .mount(&server)
        .await;

    let err = provider_for(&server, 5)
        .generate(&completion("prompt"))
        .await
        .unwrap_err();

    match err {
        ProviderError::AiApi { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected AiApi error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_choices_yield_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let text = provider_for(&server, 5)
        .generate(&completion("prompt"))
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server, 5)
        .generate(&completion("prompt"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::AiDeserialization(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "late"}}]
                })),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server, 1)
        .generate(&completion("prompt"))
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}
