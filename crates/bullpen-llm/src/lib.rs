//! Language-model client for the Bullpen studio simulation.
//!
//! Everything the crew needs to talk to a model lives here: the backend
//! dispatch (OpenRouter online, canned replies offline), the prompt
//! engine with its embedded templates, and the reply post-processing
//! that turns a chatty answer into file contents.
//!
//! # Modules
//!
//! - [`config`] -- Client knobs: offline toggle, endpoint, retries ([`LlmConfig`])
//! - [`llm`] -- Backend dispatch and the OpenRouter client ([`ChatBackend`])
//! - [`prompt`] -- Template loading and rendering ([`PromptEngine`])
//! - [`parse`] -- Fenced code block extraction
//! - [`error`] -- Typed errors for the whole call path ([`LlmError`])

pub mod config;
pub mod error;
pub mod llm;
pub mod parse;
pub mod prompt;

// Re-export primary types at crate root for convenience.
pub use config::LlmConfig;
pub use error::LlmError;
pub use llm::{ChatBackend, Completion, OFFLINE_REPLY, create_backend};
pub use parse::extract_code_block;
pub use prompt::{PromptEngine, RenderedPrompt};
