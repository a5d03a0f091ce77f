//! Client configuration for the language-model provider.
//!
//! The [`LlmConfig`] struct bundles the knobs of the client: the offline
//! toggle, the endpoint, and the retry/timeout discipline. The API key is
//! deliberately not part of this struct so it never lands in a config
//! file; callers pass the credential separately.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Configuration for the language-model client.
///
/// Every field is defaulted, so an absent `llm:` mapping in the studio
/// config deserializes to the reference values: online against the
/// public OpenRouter endpoint, a 60 second per-attempt timeout, and two
/// retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Answer every request with a fixed reply at zero cost instead of
    /// calling the network (default: false).
    #[serde(default)]
    pub offline: bool,

    /// Base URL of the chat-completions API (default: the public
    /// OpenRouter endpoint).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Timeout for one completion attempt, in seconds (default: 60).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How many times a failed call is retried before the error
    /// propagates (default: 2).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Directory of prompt template overrides; the embedded defaults are
    /// used when unset.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    String::from("https://openrouter.ai/api/v1")
}

const fn default_request_timeout_secs() -> u64 {
    60
}

const fn default_max_retries() -> u32 {
    2
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            offline: false,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            templates_dir: None,
        }
    }
}

impl LlmConfig {
    /// Check for values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] when the endpoint is blank or the
    /// per-attempt timeout is zero.
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.api_url.trim().is_empty() {
            return Err(LlmError::Config(String::from("api_url must not be empty")));
        }
        if self.request_timeout_secs == 0 {
            return Err(LlmError::Config(String::from(
                "request_timeout_secs must be at least 1",
            )));
        }
        Ok(())
    }
}
