//! Prompt template loading and rendering via `minijinja`.
//!
//! The studio sends three kinds of prompt: the manager's planning ask,
//! the developer's build ask, and the gossip line. Defaults for all
//! three are compiled into the binary; an optional on-disk directory
//! overrides them so operators can tune crew behavior without
//! recompiling.

use std::path::Path;

use bullpen_types::AgentKind;
use minijinja::Environment;

use crate::error::LlmError;

/// Default manager planning template.
const MANAGER_TEMPLATE: &str = include_str!("../templates/manager.j2");
/// Default developer build template.
const DEVELOPER_TEMPLATE: &str = include_str!("../templates/developer.j2");
/// Default gossip line template.
const GOSSIP_TEMPLATE: &str = include_str!("../templates/gossip.j2");

/// Manages prompt template loading and rendering.
///
/// Wraps a `minijinja` [`Environment`] with all three studio templates
/// pre-loaded. Override templates are read once at construction;
/// edits on disk are picked up on the next call to [`PromptEngine::new`].
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to a backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing the speaker's persona.
    pub system: String,
    /// User message carrying the actual ask.
    pub user: String,
}

impl PromptEngine {
    /// Create a prompt engine, preferring templates from `overrides`
    /// when given and falling back to the embedded defaults.
    ///
    /// An override directory must contain all of `manager.j2`,
    /// `developer.j2`, and `gossip.j2`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Template`] when an override file cannot be
    /// read or a template fails to compile.
    pub fn new(overrides: Option<&Path>) -> Result<Self, LlmError> {
        let mut env = Environment::new();

        let manager_tpl = load_template(overrides, "manager.j2", MANAGER_TEMPLATE)?;
        let developer_tpl = load_template(overrides, "developer.j2", DEVELOPER_TEMPLATE)?;
        let gossip_tpl = load_template(overrides, "gossip.j2", GOSSIP_TEMPLATE)?;

        env.add_template_owned("manager", manager_tpl)
            .map_err(|e| LlmError::Template(format!("failed to add manager template: {e}")))?;
        env.add_template_owned("developer", developer_tpl)
            .map_err(|e| LlmError::Template(format!("failed to add developer template: {e}")))?;
        env.add_template_owned("gossip", gossip_tpl)
            .map_err(|e| LlmError::Template(format!("failed to add gossip template: {e}")))?;

        Ok(Self { env })
    }

    /// Render the manager's planning prompt for the day's brief.
    pub fn plan_prompt(&self, brief: &str) -> Result<RenderedPrompt, LlmError> {
        let user = self.render("manager", serde_json::json!({ "brief": brief }))?;
        Ok(RenderedPrompt {
            system: String::from(AgentKind::Manager.persona()),
            user,
        })
    }

    /// Render the developer's build prompt for the day's brief.
    pub fn build_prompt(&self, brief: &str) -> Result<RenderedPrompt, LlmError> {
        let user = self.render("developer", serde_json::json!({ "brief": brief }))?;
        Ok(RenderedPrompt {
            system: String::from(AgentKind::Developer.persona()),
            user,
        })
    }

    /// Render the gossip prompt for the chosen speaker.
    pub fn gossip_prompt(&self, speaker: AgentKind) -> Result<RenderedPrompt, LlmError> {
        let user = self.render(
            "gossip",
            serde_json::json!({ "speaker": speaker.display_name() }),
        )?;
        Ok(RenderedPrompt {
            system: String::from(speaker.persona()),
            user,
        })
    }

    /// Render one named template against a context value.
    fn render(&self, name: &str, ctx: serde_json::Value) -> Result<String, LlmError> {
        self.env
            .get_template(name)
            .map_err(|e| LlmError::Template(format!("missing {name} template: {e}")))?
            .render(ctx)
            .map_err(|e| LlmError::Template(format!("{name} render failed: {e}")))
    }
}

/// Read a template from the override directory, or fall back to the
/// embedded default.
fn load_template(
    overrides: Option<&Path>,
    filename: &str,
    embedded: &str,
) -> Result<String, LlmError> {
    match overrides {
        Some(dir) => {
            let path = dir.join(filename);
            std::fs::read_to_string(&path)
                .map_err(|e| LlmError::Template(format!("failed to read {}: {e}", path.display())))
        }
        None => Ok(String::from(embedded)),
    }
}
