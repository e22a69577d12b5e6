//! Prompt registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::prompt::{Prompt, PromptArgs, PromptDescriptor, PromptError, PromptResult, arg};

#[derive(Default)]
pub struct PromptRegistry {
    prompts: HashMap<String, Arc<dyn Prompt>>,
    order: Vec<String>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, prompt: Arc<dyn Prompt>) {
        let name = prompt.name().to_string();
        if self.prompts.insert(name.clone(), prompt).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Prompt>> {
        self.prompts.get(name).cloned()
    }

    pub fn list(&self) -> Vec<PromptDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.prompts.get(name))
            .map(|p| p.descriptor())
            .collect()
    }

    /// Render a prompt by name after checking its required arguments.
    pub fn render(&self, name: &str, args: &PromptArgs) -> Result<PromptResult, PromptError> {
        let prompt = self
            .get(name)
            .ok_or_else(|| PromptError::UnknownPrompt(name.to_string()))?;

        if let Some(missing) = prompt
            .arguments()
            .into_iter()
            .find(|a| a.required && arg(args, &a.name).is_none())
        {
            return Err(PromptError::MissingArgument(missing.name));
        }

        tracing::debug!(prompt = name, "Rendering prompt");
        prompt.render(args)
    }
}
