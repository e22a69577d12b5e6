//! Tool trait and types.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::CallContext;
use crate::error::{AuthError, ReservationError, UpstreamError};

/// Error type for tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Wrap a core error, prefixing its message with what the tool was doing.
    pub fn from_reservation(context: &str, err: ReservationError) -> Self {
        match err {
            ReservationError::Config(e) => {
                ToolError::ExecutionFailed(format!("{}: {}", context, e))
            }
            ReservationError::Auth(e @ AuthError::Rejected { .. })
            | ReservationError::Auth(e @ AuthError::MissingToken) => {
                ToolError::NotAuthorized(format!("{}: {}", context, e))
            }
            ReservationError::Auth(e) => ToolError::ExternalService(format!("{}: {}", context, e)),
            ReservationError::Upstream(UpstreamError::Timeout(d)) => ToolError::Timeout(d),
            ReservationError::Upstream(e) if matches!(e.status(), Some(401 | 403)) => {
                ToolError::NotAuthorized(format!("{}: {}", context, e))
            }
            ReservationError::Upstream(e) => {
                ToolError::ExternalService(format!("{}: {}", context, e))
            }
        }
    }
}

/// Output from a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result data.
    pub result: serde_json::Value,
    /// Time taken.
    pub duration: Duration,
}

impl ToolOutput {
    /// Create a successful output with a JSON result.
    pub fn success(result: serde_json::Value, duration: Duration) -> Self {
        Self { result, duration }
    }

    /// Create a text output.
    pub fn text(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            result: serde_json::Value::String(text.into()),
            duration,
        }
    }

    /// Human-readable message carried by the result, if any.
    pub fn message(&self) -> Option<&str> {
        match &self.result {
            serde_json::Value::String(s) => Some(s),
            other => other.get("message").and_then(|m| m.as_str()),
        }
    }
}

/// Definition of a tool's parameters using JSON Schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Trait for tools exposed to the agent host.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Get a description of what the tool does.
    fn description(&self) -> &str;

    /// Get the JSON Schema for the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError>;

    /// Whether this tool requires explicit user approval before execution.
    ///
    /// True for tools that change a reservation.
    fn requires_approval(&self) -> bool {
        false
    }

    /// Get the tool schema for function calling.
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Read a required string parameter.
pub(crate) fn require_str<'a>(
    params: &'a serde_json::Value,
    name: &str,
) -> Result<&'a str, ToolError> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ToolError::InvalidParameters(format!("missing '{}' parameter", name)))
}
