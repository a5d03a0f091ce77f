//! Integration tests for the OpenRouter backend.
//!
//! All HTTP traffic goes to a local `wiremock` server; no test talks to
//! the real provider.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::time::Duration;

use bullpen_llm::{ChatBackend, LlmConfig, LlmError, RenderedPrompt, create_backend};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer, request_timeout_secs: u64, max_retries: u32) -> LlmConfig {
    LlmConfig {
        offline: false,
        api_url: server.uri(),
        request_timeout_secs,
        max_retries,
        templates_dir: None,
    }
}

fn test_backend(server: &MockServer, request_timeout_secs: u64, max_retries: u32) -> ChatBackend {
    let config = test_config(server, request_timeout_secs, max_retries);
    create_backend(&config, Some(String::from("test-key"))).unwrap()
}

fn test_prompt() -> RenderedPrompt {
    RenderedPrompt {
        system: String::from("You are the studio's only developer."),
        user: String::from("Write a tiny program."),
    }
}

#[tokio::test]
async fn happy_path_returns_text_cost_and_latency() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "mistralai/devstral-small",
            "usage": {"include": true}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "```python\nprint(\"hi\")\n```"}}],
            "usage": {"cost": 0.00042}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = test_backend(&server, 5, 0);
    let completion = backend
        .complete("mistralai/devstral-small", &test_prompt())
        .await
        .unwrap();

    assert!(completion.text.contains("print"));
    assert_eq!(completion.cost, Decimal::new(42, 5));
    assert!(completion.latency > Duration::ZERO);
}

#[tokio::test]
async fn missing_cost_field_bills_zero() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "1. Plan\n2. Build\n3. Check"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = test_backend(&server, 5, 0);
    let completion = backend
        .complete("google/gemini-2.5-flash", &test_prompt())
        .await
        .unwrap();

    assert_eq!(completion.cost, Decimal::ZERO);
}

#[tokio::test]
async fn retries_after_server_error() {
    let server = MockServer::start().await;

    // First attempt lands on the failing mock; it expires after one use
    // and the retry falls through to the healthy one.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider hiccup"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "recovered"}}],
            "usage": {"cost": 0.0001}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = test_backend(&server, 5, 2);
    let completion = backend
        .complete("mistralai/devstral-small", &test_prompt())
        .await
        .unwrap();

    assert_eq!(completion.text, "recovered");
}

#[tokio::test]
async fn gives_up_after_exhausting_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("still down"))
        .expect(2)
        .mount(&server)
        .await;

    let backend = test_backend(&server, 5, 1);
    let result = backend
        .complete("mistralai/devstral-small", &test_prompt())
        .await;

    match result {
        Err(LlmError::Backend(message)) => assert!(message.contains("500")),
        other => panic!("expected a backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_provider_surfaces_as_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({
                    "choices": [{"message": {"content": "too late"}}]
                })),
        )
        .mount(&server)
        .await;

    let backend = test_backend(&server, 1, 0);
    let result = backend
        .complete("mistralai/devstral-small", &test_prompt())
        .await;

    assert!(matches!(
        result,
        Err(LlmError::Timeout { limit_secs: 1 })
    ));
}

#[tokio::test]
async fn malformed_body_is_a_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = test_backend(&server, 5, 0);
    let result = backend
        .complete("mistralai/devstral-small", &test_prompt())
        .await;

    match result {
        Err(LlmError::Backend(message)) => {
            assert!(message.contains("choices[0].message.content"));
        }
        other => panic!("expected a backend error, got {other:?}"),
    }
}
