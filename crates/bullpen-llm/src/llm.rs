//! Language-model backend dispatch and the OpenRouter client.
//!
//! Defines an enum-based dispatch for backends, avoiding the
//! dyn-compatibility issues with async trait methods. The online backend
//! speaks the OpenRouter chat-completions dialect over `reqwest`; the
//! offline backend answers instantly with a fixed reply at zero cost so
//! runs stay reproducible without the network.
//!
//! Every online attempt runs under its own timeout and failed calls are
//! retried a bounded number of times before the error propagates.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::prompt::RenderedPrompt;

/// The reply every offline completion returns.
///
/// A valid one-line program, so the developer's artifact still compiles
/// when the whole workday runs without the network.
pub const OFFLINE_REPLY: &str = "print(\"hello from the bullpen\")";

/// Pause between retry attempts.
const RETRY_PAUSE: Duration = Duration::from_millis(250);

/// The outcome of one completion call.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Raw reply text from the model.
    pub text: String,
    /// Provider-reported cost of the call in dollars; zero when the
    /// provider omits it.
    pub cost: Decimal,
    /// Wall-clock duration of the successful attempt.
    pub latency: Duration,
}

// ---------------------------------------------------------------------------
// Unified backend enum (dyn-compatible alternative to async trait)
// ---------------------------------------------------------------------------

/// A language-model backend that can answer a rendered prompt.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible in Rust.
pub enum ChatBackend {
    /// OpenRouter-compatible chat completions API.
    OpenRouter(OpenRouterBackend),
    /// Deterministic canned replies for tests and dry runs.
    Offline(OfflineBackend),
}

impl ChatBackend {
    /// Send a prompt to the model and return the reply with its price.
    ///
    /// Dispatches to the concrete backend implementation.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Backend`] if every attempt fails, or
    /// [`LlmError::Timeout`] if the final attempt ran out of time.
    pub async fn complete(
        &self,
        model: &str,
        prompt: &RenderedPrompt,
    ) -> Result<Completion, LlmError> {
        match self {
            Self::OpenRouter(backend) => backend.complete(model, prompt).await,
            Self::Offline(backend) => Ok(backend.complete()),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::OpenRouter(_) => "openrouter",
            Self::Offline(_) => "offline",
        }
    }
}

/// Create a backend from configuration.
///
/// Dispatches on the explicit `offline` field; the credential is only
/// required for the online backend.
///
/// # Errors
///
/// Returns [`LlmError::Config`] when online mode is requested without an
/// API key.
pub fn create_backend(
    config: &LlmConfig,
    api_key: Option<String>,
) -> Result<ChatBackend, LlmError> {
    if config.offline {
        return Ok(ChatBackend::Offline(OfflineBackend));
    }
    let api_key = api_key.ok_or_else(|| {
        LlmError::Config(String::from(
            "OPENROUTER_API_KEY is required unless offline mode is enabled",
        ))
    })?;
    Ok(ChatBackend::OpenRouter(OpenRouterBackend::new(
        config, api_key,
    )))
}

// ---------------------------------------------------------------------------
// OpenRouter backend
// ---------------------------------------------------------------------------

/// Backend for the OpenRouter chat-completions API.
///
/// Requests carry the per-role model id and ask the provider to include
/// usage accounting, which is how per-call dollar cost comes back.
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenRouterBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    attempt_timeout: Duration,
    max_retries: u32,
}

impl OpenRouterBackend {
    /// Create a new OpenRouter backend.
    pub fn new(config: &LlmConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key,
            attempt_timeout: Duration::from_secs(config.request_timeout_secs),
            max_retries: config.max_retries,
        }
    }

    /// Send a prompt and return the reply with its price.
    ///
    /// Each attempt runs under its own timeout; failed attempts are
    /// retried up to the configured limit with a short pause in between.
    async fn complete(&self, model: &str, prompt: &RenderedPrompt) -> Result<Completion, LlmError> {
        let mut attempt: u32 = 0;
        loop {
            let started = Instant::now();
            let outcome =
                tokio::time::timeout(self.attempt_timeout, self.send_once(model, prompt)).await;

            let error = match outcome {
                Ok(Ok((text, cost))) => {
                    return Ok(Completion {
                        text,
                        cost,
                        latency: started.elapsed(),
                    });
                }
                Ok(Err(error)) => error,
                Err(_elapsed) => LlmError::Timeout {
                    limit_secs: self.attempt_timeout.as_secs(),
                },
            };

            if attempt >= self.max_retries {
                return Err(error);
            }
            attempt = attempt.saturating_add(1);
            tracing::warn!(model, attempt, error = %error, "language-model call failed; retrying");
            tokio::time::sleep(RETRY_PAUSE).await;
        }
    }

    /// One POST to the chat-completions endpoint.
    async fn send_once(
        &self,
        model: &str,
        prompt: &RenderedPrompt,
    ) -> Result<(String, Decimal), LlmError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "usage": {"include": true}
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Backend(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unable to read error body"));
            return Err(LlmError::Backend(format!(
                "provider returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Backend(format!("response parse failed: {e}")))?;

        let text = extract_reply_text(&json)?;
        let cost = extract_reply_cost(&json);
        Ok((text, cost))
    }
}

/// Extract the reply text from a chat-completions response.
fn extract_reply_text(json: &serde_json::Value) -> Result<String, LlmError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            LlmError::Backend(String::from(
                "response missing choices[0].message.content",
            ))
        })
}

/// Extract the provider-reported dollar cost, tolerating its absence.
///
/// OpenRouter reports `usage.cost` when usage accounting is requested;
/// replies without it are billed as zero.
fn extract_reply_cost(json: &serde_json::Value) -> Decimal {
    json.get("usage")
        .and_then(|u| u.get("cost"))
        .and_then(serde_json::Value::as_f64)
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Offline backend
// ---------------------------------------------------------------------------

/// Backend that answers instantly with [`OFFLINE_REPLY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

impl OfflineBackend {
    /// Produce the canned completion at zero cost and zero latency.
    #[must_use]
    pub fn complete(self) -> Completion {
        Completion {
            text: String::from(OFFLINE_REPLY),
            cost: Decimal::ZERO,
            latency: Duration::ZERO,
        }
    }
}
