//! Prompt trait and types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Missing required argument '{0}'")]
    MissingArgument(String),

    #[error("Invalid value for '{name}': expected one of {}", .allowed.join(", "))]
    InvalidArgument { name: String, allowed: Vec<String> },

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),
}

/// Declared prompt argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl PromptArgument {
    pub fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
        }
    }

    pub fn optional(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub text: String,
}

impl PromptMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// A rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResult {
    pub description: String,
    pub messages: Vec<PromptMessage>,
}

/// Listing entry for a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

/// Arguments supplied when rendering a prompt.
pub type PromptArgs = HashMap<String, String>;

/// A conversation starter the agent host can offer to users.
pub trait Prompt: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn arguments(&self) -> Vec<PromptArgument> {
        Vec::new()
    }

    /// Render the prompt. Required arguments are checked before this is called.
    fn render(&self, args: &PromptArgs) -> Result<PromptResult, PromptError>;

    fn descriptor(&self) -> PromptDescriptor {
        PromptDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            arguments: self.arguments(),
        }
    }
}

/// Non-blank argument value.
pub(crate) fn arg<'a>(args: &'a PromptArgs, name: &str) -> Option<&'a str> {
    args.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Optional argument restricted to `allowed` values.
pub(crate) fn choice<'a>(
    args: &'a PromptArgs,
    name: &str,
    allowed: &[&str],
) -> Result<Option<&'a str>, PromptError> {
    match arg(args, name) {
        None => Ok(None),
        Some(value) if allowed.contains(&value) => Ok(Some(value)),
        Some(_) => Err(PromptError::InvalidArgument {
            name: name.to_string(),
            allowed: allowed.iter().map(|a| a.to_string()).collect(),
        }),
    }
}
