//! Catalog of everything the agent host can discover and invoke.

use std::sync::Arc;

use crate::availability::AvailabilityQuery;
use crate::config::SevenRoomsConfig;
use crate::context::CallContext;
use crate::directory::RestaurantDirectory;
use crate::prompts::{
    PromptArgs, PromptDescriptor, PromptError, PromptRegistry, PromptResult,
    register_builtin_prompts,
};
use crate::resources::{
    AvailableTimeSlotResource, ResourceContents, ResourceError, ResourceRegistry,
    ResourceTemplate,
};
use crate::sevenrooms::SevenRoomsClient;
use crate::tools::{ToolError, ToolOutput, ToolRegistry, ToolSchema, register_builtin_tools};

/// Name advertised to the agent host.
pub const SERVER_NAME: &str = "sevenrooms-reservations";

/// Tools, prompts and resources backed by one SevenRooms client.
pub struct ReservationServer {
    tools: ToolRegistry,
    prompts: PromptRegistry,
    resources: ResourceRegistry,
}

impl ReservationServer {
    pub fn from_config(config: SevenRoomsConfig) -> Self {
        Self::new(
            Arc::new(SevenRoomsClient::new(config)),
            Arc::new(RestaurantDirectory::builtin()),
        )
    }

    pub fn new(client: Arc<SevenRoomsClient>, directory: Arc<RestaurantDirectory>) -> Self {
        let query = Arc::new(AvailabilityQuery::new(
            Arc::clone(&client),
            Arc::clone(&directory),
        ));

        let mut tools = ToolRegistry::new();
        register_builtin_tools(
            &mut tools,
            client,
            Arc::clone(&directory),
            Arc::clone(&query),
        );

        let mut prompts = PromptRegistry::new();
        register_builtin_prompts(&mut prompts, directory);

        let mut resources = ResourceRegistry::new();
        resources.register(Arc::new(AvailableTimeSlotResource::new(query)));

        tracing::debug!(
            server = SERVER_NAME,
            tools = tools.len(),
            prompts = prompts.list().len(),
            "Reservation server ready"
        );

        Self {
            tools,
            prompts,
            resources,
        }
    }

    pub fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.schemas()
    }

    /// Whether a tool changes a reservation and should be confirmed by the user.
    pub fn tool_requires_approval(&self, name: &str) -> Option<bool> {
        self.tools.get(name).map(|t| t.requires_approval())
    }

    pub async fn call_tool(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        self.tools.execute(name, args, ctx).await
    }

    pub fn list_prompts(&self) -> Vec<PromptDescriptor> {
        self.prompts.list()
    }

    pub fn get_prompt(&self, name: &str, args: &PromptArgs) -> Result<PromptResult, PromptError> {
        self.prompts.render(name, args)
    }

    pub fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.resources.templates()
    }

    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        self.resources.read(uri).await
    }
}
