//! Error types for the language-model client.
//!
//! Uses `thiserror` for typed errors that surface through the whole call
//! path: prompt rendering, HTTP transport, reply extraction.

/// Errors that can occur while talking to the language-model provider.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Failed to render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// The provider returned an error or was unreachable.
    #[error("language-model backend error: {0}")]
    Backend(String),

    /// A single attempt ran past the configured request timeout.
    #[error("timeout: language-model call exceeded {limit_secs}s")]
    Timeout {
        /// The per-attempt limit that was exceeded, in seconds.
        limit_secs: u64,
    },

    /// Client configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),
}
