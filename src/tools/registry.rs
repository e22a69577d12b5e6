//! Tool registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::context::CallContext;
use crate::tools::tool::{Tool, ToolError, ToolOutput, ToolSchema};

/// Registered tools, dispatched by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Registration order, for stable listings.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Replacing already registered tool");
        } else {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Schemas of all tools in registration order.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.schema())
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let start = Instant::now();
        tracing::info!(
            tool = name,
            call_id = %ctx.call_id,
            received_at = %ctx.received_at,
            "Executing tool"
        );

        let result = tool.execute(params, ctx).await;
        match &result {
            Ok(_) => tracing::info!(
                tool = name,
                call_id = %ctx.call_id,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Tool completed"
            ),
            Err(e) => tracing::warn!(
                tool = name,
                call_id = %ctx.call_id,
                "Tool failed: {}",
                e
            ),
        }
        result
    }
}
