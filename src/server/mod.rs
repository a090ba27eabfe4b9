//! MCP server implementation for ClickUp.
//!
//! Every tool resolves the API key for its own call, builds one request and
//! hands the invoker's result back as JSON text. Remote failures are ordinary
//! results, not protocol errors.

mod helpers;
pub mod params;
pub mod prompts;
pub mod resources;
pub mod week;

use crate::auth::KeyResolver;
use crate::client::ClickUpClient;
use crate::request::ApiRequest;
use crate::types::ApiResponse;
use crate::Error;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, ErrorData as McpError, GetPromptRequestParams, GetPromptResult, Implementation,
    ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult, PaginatedRequestParams,
    ProtocolVersion, ReadResourceRequestParams, ReadResourceResult, ServerCapabilities, ServerInfo,
    Tool,
};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, RoleServer, ServerHandler};
use serde_json::{json, Value};
use tracing::debug;

use helpers::*;
pub use params::*;

/// MCP server for ClickUp operations.
#[derive(Debug, Clone)]
pub struct ClickUpServer {
    client: ClickUpClient,
    keys: KeyResolver,
    tool_router: ToolRouter<ClickUpServer>,
}

#[tool_router]
impl ClickUpServer {
    /// Create a new ClickUp MCP server.
    pub fn new(keys: KeyResolver) -> Result<Self, Error> {
        Ok(Self::with_client(ClickUpClient::new()?, keys))
    }

    /// Create a server with a custom client (tests point it at a mock API).
    pub fn with_client(client: ClickUpClient, keys: KeyResolver) -> Self {
        Self {
            client,
            keys,
            tool_router: Self::tool_router(),
        }
    }

    /// Every registered tool with its input schema.
    pub fn tools() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    // ========================================================================
    // Authorization
    // ========================================================================

    #[tool(
        name = "getAuthorizedUser",
        description = "Fetch metadata for the authorized user"
    )]
    async fn get_authorized_user(
        &self,
        _params: Parameters<NoParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::get("user")).await
    }

    #[tool(
        name = "getWorkspaces",
        description = "List all workspaces accessible by the authorized user"
    )]
    async fn get_workspaces(
        &self,
        _params: Parameters<NoParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::get("team")).await
    }

    // ========================================================================
    // Space
    // ========================================================================

    #[tool(
        name = "getSpaces",
        description = "Fetch all spaces in a workspace"
    )]
    async fn get_spaces(
        &self,
        params: Parameters<GetSpacesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, params.0.request()).await
    }

    #[tool(
        name = "createSpace",
        description = "Create a new space in the specified workspace with given features. \
            All nine feature toggles must be supplied."
    )]
    async fn create_space(
        &self,
        params: Parameters<CreateSpaceParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(
        name = "getSpace",
        description = "Fetch metadata for a specific space"
    )]
    async fn get_space(
        &self,
        params: Parameters<SpaceIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::get(params.0.path())).await
    }

    #[tool(
        name = "updateSpace",
        description = "Update properties of a specific space. Color defaults to #7B68EE."
    )]
    async fn update_space(
        &self,
        params: Parameters<UpdateSpaceParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(name = "deleteSpace", description = "Delete a specific space")]
    async fn delete_space(
        &self,
        params: Parameters<SpaceIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::delete(params.0.path())).await
    }

    // ========================================================================
    // Folder
    // ========================================================================

    #[tool(
        name = "getFolders",
        description = "Fetch all folders in the specified space"
    )]
    async fn get_folders(
        &self,
        params: Parameters<SpaceIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let path = format!("{}/folder", params.0.path());
        self.forward(&ctx, ApiRequest::get(path)).await
    }

    #[tool(
        name = "createFolder",
        description = "Create a new folder in the specified space with a given name"
    )]
    async fn create_folder(
        &self,
        params: Parameters<CreateFolderParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(
        name = "getFolder",
        description = "Fetch metadata for a specific folder"
    )]
    async fn get_folder(
        &self,
        params: Parameters<FolderIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::get(params.0.path())).await
    }

    #[tool(
        name = "updateFolder",
        description = "Update the name of a specific folder"
    )]
    async fn update_folder(
        &self,
        params: Parameters<UpdateFolderParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(name = "deleteFolder", description = "Delete a specific folder")]
    async fn delete_folder(
        &self,
        params: Parameters<FolderIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::delete(params.0.path())).await
    }

    // ========================================================================
    // List
    // ========================================================================

    #[tool(
        name = "getLists",
        description = "Fetch all lists in the specified folder"
    )]
    async fn get_lists(
        &self,
        params: Parameters<FolderIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let path = format!("{}/list", params.0.path());
        self.forward(&ctx, ApiRequest::get(path)).await
    }

    #[tool(
        name = "createList",
        description = "Create a new list in the specified folder"
    )]
    async fn create_list(
        &self,
        params: Parameters<CreateListParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(
        name = "getFolderlessList",
        description = "Fetch lists that sit directly in a space, outside any folder"
    )]
    async fn get_folderless_list(
        &self,
        params: Parameters<SpaceIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let path = format!("{}/list", params.0.path());
        self.forward(&ctx, ApiRequest::get(path)).await
    }

    #[tool(
        name = "getList",
        description = "Fetch metadata for a specific list"
    )]
    async fn get_list(
        &self,
        params: Parameters<ListIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::get(params.0.path())).await
    }

    #[tool(
        name = "updateList",
        description = "Update properties of a specific list. Only the given fields change."
    )]
    async fn update_list(
        &self,
        params: Parameters<UpdateListParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(name = "deleteList", description = "Delete a specific list")]
    async fn delete_list(
        &self,
        params: Parameters<ListIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::delete(params.0.path())).await
    }

    // ========================================================================
    // Task
    // ========================================================================

    #[tool(
        name = "getTasks",
        description = "Retrieve tasks/subtasks for a ClickUp list. When using time-based filters \
            (e.g. due_date_gt, date_created_lt), supply 13-digit Unix timestamps (ms since epoch) \
            in the user's timezone (default Asia/Singapore (SGT)). Only include date filters \
            (including date_done_gt and date_done_lt) when explicitly requested by the user; \
            do not infer or confuse date_done with date_closed. After execution, include the \
            full JSON result in your response and do not omit or summarize it."
    )]
    async fn get_tasks(
        &self,
        params: Parameters<GetTasksParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let Some(key) = self.api_key(&ctx) else {
            return Ok(text_response(KEY_MISSING));
        };

        let response = match self.client.invoke(&params.0.request(), &key).await {
            ApiResponse::Success(Value::Null) => ApiResponse::Success(json!([])),
            other => other,
        };
        Ok(api_response(&response))
    }

    #[tool(
        name = "createTask",
        description = "Create a new task in the specified list"
    )]
    async fn create_task(
        &self,
        params: Parameters<CreateTaskParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(
        name = "getTask",
        description = "Fetch metadata for a specific task. Timestamps are also given in \
            Asia/Singapore time as <field>_sgt (YYYY-MM-DD HH:MM:SS)."
    )]
    async fn get_task(
        &self,
        params: Parameters<TaskIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let Some(key) = self.api_key(&ctx) else {
            return Ok(text_response(KEY_MISSING));
        };

        let request = ApiRequest::get(params.0.path());
        let response = match self.client.invoke(&request, &key).await {
            ApiResponse::Success(mut task) => {
                annotate_task_dates(&mut task);
                ApiResponse::Success(task)
            }
            failure => failure,
        };
        Ok(api_response(&response))
    }

    #[tool(
        name = "updateTask",
        description = "Update properties of a specific task"
    )]
    async fn update_task(
        &self,
        params: Parameters<UpdateTaskParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(name = "deleteTask", description = "Delete a specific task")]
    async fn delete_task(
        &self,
        params: Parameters<TaskIdParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, ApiRequest::delete(params.0.path())).await
    }

    #[tool(
        name = "getWeekTasks",
        description = "Retrieve tasks for a specified ClickUp list that closed within a specific \
            date range and are assigned to a given user. Parameters list_id must be a string, \
            start_date and end_date must be raw date eg. 5 May 2025, and assignee must be a \
            string (case-insensitive substring match). All parameters are required; the tool \
            returns an error if any are missing."
    )]
    async fn get_week_tasks(
        &self,
        params: Parameters<GetWeekTasksParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let Some(key) = self.api_key(&ctx) else {
            return Ok(text_response(KEY_MISSING));
        };

        match week::collect_week_tasks(&self.client, &key, &params.0).await {
            Ok(tasks) => {
                let text = serde_json::to_string(&tasks)
                    .map_err(|e| to_mcp_error("Failed to serialize response", e))?;
                Ok(text_response(text))
            }
            Err(e) => Ok(text_response(e.to_string())),
        }
    }

    // ========================================================================
    // Document
    // ========================================================================

    #[tool(
        name = "searchDocs",
        description = "Search documents in a workspace with optional filters"
    )]
    async fn search_docs(
        &self,
        params: Parameters<SearchDocsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, params.0.request()).await
    }

    #[tool(
        name = "createDoc",
        description = "Create a new document in a workspace"
    )]
    async fn create_doc(
        &self,
        params: Parameters<CreateDocParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, built(params.0.request())?).await
    }

    #[tool(
        name = "getDoc",
        description = "Fetch metadata for a specific document"
    )]
    async fn get_doc(
        &self,
        params: Parameters<GetDocParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, params.0.request()).await
    }

    #[tool(
        name = "getDocPages",
        description = "Fetch pages of a specific document with formatting options"
    )]
    async fn get_doc_pages(
        &self,
        params: Parameters<GetDocPagesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(&ctx, params.0.request()).await
    }
}

// ============================================================================
// Call plumbing
// ============================================================================

impl ClickUpServer {
    /// Key for the current call: the inbound header if any, else the fallback.
    fn api_key(&self, ctx: &RequestContext<RoleServer>) -> Option<String> {
        self.keys.resolve_from(&ctx.extensions)
    }

    /// Resolve the key and pass one request through unchanged.
    async fn forward(
        &self,
        ctx: &RequestContext<RoleServer>,
        request: ApiRequest,
    ) -> Result<CallToolResult, McpError> {
        let Some(key) = self.api_key(ctx) else {
            return Ok(text_response(KEY_MISSING));
        };
        Ok(api_response(&self.client.invoke(&request, &key).await))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ClickUpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "clickupmcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "ClickUp MCP server providing tools and resources for workspaces, spaces, \
                 folders, lists, tasks and docs. Send an API key in the X-ClickUp-API-Key \
                 header or start the server with CLICKUP_API_KEY."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(resources::list())
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(resources::templates())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri;
        let Some((resource, api_request)) = resources::resolve(&uri) else {
            let message = format!("Unknown resource: {}", uri);
            return Err(McpError::resource_not_found(message, None));
        };
        debug!(resource = resource.name(), "Reading resource");

        let body = match self.keys.resolve_from(&ctx.extensions) {
            Some(key) => self.client.invoke(&api_request, &key).await.to_json(),
            None => json!({ "error": KEY_MISSING }),
        };
        Ok(resources::contents(&uri, &body))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(prompts::list())
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let Some(prompt) = prompts::get(&request.name, request.arguments.as_ref()) else {
            return Err(validation_error(&format!("Unknown prompt: {}", request.name)));
        };
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests;
