//! Readable resources addressed by URI.

mod available_time_slot;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use available_time_slot::{AvailableTimeSlotResource, SlotUri};

pub const JSON_MIME: &str = "application/json";

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("No resource matches URI: {0}")]
    UnknownUri(String),

    #[error("Failed to encode resource {uri}: {reason}")]
    Encode { uri: String, reason: String },
}

/// Advertised shape of a family of resource URIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTemplate {
    pub name: String,
    pub title: String,
    pub uri_template: String,
    pub description: String,
    pub mime_type: String,
}

/// Body returned when a resource is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

impl ResourceContents {
    pub fn json(uri: &str, value: &serde_json::Value) -> Result<Self, ResourceError> {
        let text = serde_json::to_string(value).map_err(|e| ResourceError::Encode {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            uri: uri.to_string(),
            mime_type: JSON_MIME.to_string(),
            text,
        })
    }
}

#[async_trait]
pub trait Resource: Send + Sync {
    fn template(&self) -> ResourceTemplate;

    /// Whether this resource serves `uri`.
    fn matches(&self, uri: &str) -> bool;

    async fn read(&self, uri: &str) -> Result<ResourceContents, ResourceError>;
}

#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resource: Arc<dyn Resource>) {
        self.resources.push(resource);
    }

    pub fn templates(&self) -> Vec<ResourceTemplate> {
        self.resources.iter().map(|r| r.template()).collect()
    }

    /// Read `uri` from the first resource that serves it.
    pub async fn read(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        let resource = self
            .resources
            .iter()
            .find(|r| r.matches(uri))
            .ok_or_else(|| ResourceError::UnknownUri(uri.to_string()))?;
        tracing::debug!(uri, "Reading resource");
        resource.read(uri).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_uri() {
        let registry = ResourceRegistry::new();
        let err = registry.read("other://x").await.unwrap_err();
        assert_eq!(err.to_string(), "No resource matches URI: other://x");
    }
}
