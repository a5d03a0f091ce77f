//! The studio crew and the categories that label timeline rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A member of the studio crew.
///
/// The roster is fixed: every behavior in the simulation dispatches on
/// exactly one of these three roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// Plans the project and hands out the work.
    Manager,
    /// Writes the program the studio ships.
    Developer,
    /// Checks the developer's work in the sandbox.
    Qa,
}

impl AgentKind {
    /// Every crew member, in seating order.
    pub const ALL: [Self; 3] = [Self::Manager, Self::Developer, Self::Qa];

    /// Display name used in timeline and gossip rows.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Developer => "Dev-A",
            Self::Qa => "QA",
        }
    }

    /// Model identifier sent to the language-model provider for this role.
    #[must_use]
    pub const fn model_id(self) -> &'static str {
        match self {
            Self::Manager => "google/gemini-2.5-flash",
            Self::Developer | Self::Qa => "mistralai/devstral-small",
        }
    }

    /// One-line persona used as the system message for this role.
    #[must_use]
    pub const fn persona(self) -> &'static str {
        match self {
            Self::Manager => {
                "You are the engineering manager of a tiny software studio. \
                 You are brisk, organized, and allergic to scope creep."
            }
            Self::Developer => {
                "You are the studio's only developer. You write small, clean \
                 programs and nothing else."
            }
            Self::Qa => {
                "You are the studio's QA engineer. You trust nothing until \
                 the sandbox says PASS."
            }
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Category column for timeline rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    /// Work lines, spend bookkeeping, and run lifecycle notices.
    Info,
    /// Ambient occurrences: coffee, lunch, meetings, the deadline.
    Event,
    /// Whispered gossip lines.
    Gossip,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Event => "EVENT",
            Self::Gossip => "GOSSIP",
        };
        f.write_str(label)
    }
}
