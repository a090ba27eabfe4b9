//! Parameter types for MCP tool inputs.
//!
//! Each parameter type also knows the single API request it maps to. Field
//! names on the input side are the public tool schema and must not change;
//! the `*Body` types carry the names ClickUp expects on the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::request::ApiRequest;
use crate::Error;

/// Parameters for tools that take no input.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

// ============================================================================
// Space
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetSpacesParams {
    /// Workspace (team) ID
    pub team_id: i64,
    /// Include archived spaces
    #[serde(default)]
    pub archived: Option<bool>,
}

impl GetSpacesParams {
    pub fn request(self) -> ApiRequest {
        ApiRequest::get(format!("team/{}/space", self.team_id)).query_opt("archived", self.archived)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceIdParams {
    pub space_id: String,
}

impl SpaceIdParams {
    pub fn path(&self) -> String {
        format!("space/{}", self.space_id)
    }
}

/// A single on/off space feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Toggle {
    pub enabled: bool,
}

/// ClickApps toggled on a space. Every feature must be supplied.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceFeatures {
    pub due_dates: Toggle,
    pub time_tracking: Toggle,
    pub tags: Toggle,
    pub time_estimates: Toggle,
    pub checklists: Toggle,
    pub custom_fields: Toggle,
    pub remap_dependencies: Toggle,
    pub dependency_warning: Toggle,
    pub portfolios: Toggle,
}

/// Wire form of [`SpaceFeatures`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturesBody {
    pub due_dates: Toggle,
    pub time_tracking: Toggle,
    pub tags: Toggle,
    pub time_estimates: Toggle,
    pub checklists: Toggle,
    pub custom_fields: Toggle,
    pub remap_dependencies: Toggle,
    pub dependency_warning: Toggle,
    pub portfolios: Toggle,
}

impl From<SpaceFeatures> for FeaturesBody {
    fn from(f: SpaceFeatures) -> Self {
        Self {
            due_dates: f.due_dates,
            time_tracking: f.time_tracking,
            tags: f.tags,
            time_estimates: f.time_estimates,
            checklists: f.checklists,
            custom_fields: f.custom_fields,
            remap_dependencies: f.remap_dependencies,
            dependency_warning: f.dependency_warning,
            portfolios: f.portfolios,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceParams {
    /// Workspace (team) ID
    pub workspace_id: String,
    pub name: String,
    pub multiple_assignees: bool,
    pub features: SpaceFeatures,
}

#[derive(Debug, Serialize)]
struct CreateSpaceBody {
    name: String,
    multiple_assignees: bool,
    features: FeaturesBody,
}

impl CreateSpaceParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        ApiRequest::post(format!("team/{}/space", self.workspace_id)).json(&CreateSpaceBody {
            name: self.name,
            multiple_assignees: self.multiple_assignees,
            features: self.features.into(),
        })
    }
}

/// Color used when an update does not name one.
pub const DEFAULT_SPACE_COLOR: &str = "#7B68EE";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceParams {
    pub space_id: String,
    pub name: String,
    /// Hex color, defaults to #7B68EE
    #[serde(default)]
    pub color: Option<String>,
    pub is_private: bool,
    #[serde(default)]
    pub admin_can_manage: Option<bool>,
    #[serde(default)]
    pub multiple_assignees: Option<bool>,
    pub features: SpaceFeatures,
}

#[derive(Debug, Serialize)]
struct UpdateSpaceBody {
    name: String,
    color: String,
    private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    admin_can_manage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multiple_assignees: Option<bool>,
    features: FeaturesBody,
}

impl UpdateSpaceParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        let color = self
            .color
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_SPACE_COLOR.to_string());

        ApiRequest::put(format!("space/{}", self.space_id)).json(&UpdateSpaceBody {
            name: self.name,
            color,
            private: self.is_private,
            admin_can_manage: self.admin_can_manage,
            multiple_assignees: self.multiple_assignees,
            features: self.features.into(),
        })
    }
}

// ============================================================================
// Folder
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderIdParams {
    pub folder_id: String,
}

impl FolderIdParams {
    pub fn path(&self) -> String {
        format!("folder/{}", self.folder_id)
    }
}

#[derive(Debug, Serialize)]
struct NameBody {
    name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderParams {
    pub space_id: String,
    pub name: String,
}

impl CreateFolderParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        let body = NameBody { name: self.name };
        ApiRequest::post(format!("space/{}/folder", self.space_id)).json(&body)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderParams {
    pub folder_id: String,
    pub name: String,
}

impl UpdateFolderParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        ApiRequest::put(format!("folder/{}", self.folder_id)).json(&NameBody { name: self.name })
    }
}

// ============================================================================
// List
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListIdParams {
    pub list_id: String,
}

impl ListIdParams {
    pub fn path(&self) -> String {
        format!("list/{}", self.list_id)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListParams {
    pub folder_id: String,
    pub name: String,
    /// List description
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateListBody {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl CreateListParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        ApiRequest::post(format!("folder/{}/list", self.folder_id)).json(&CreateListBody {
            name: self.name,
            content: self.content,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListParams {
    pub list_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Due date, epoch milliseconds
    #[serde(default)]
    pub due_date: Option<i64>,
    /// Whether the due date includes a time of day
    #[serde(default)]
    pub due_date_time: Option<bool>,
    #[serde(default)]
    pub priority: Option<i64>,
    /// Assignee user ID
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub unset_status: Option<bool>,
}

#[derive(Debug, Serialize)]
struct UpdateListBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unset_status: Option<bool>,
}

impl UpdateListParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        ApiRequest::put(format!("list/{}", self.list_id)).json(&UpdateListBody {
            name: self.name,
            content: self.content,
            due_date: self.due_date,
            due_date_time: self.due_date_time,
            priority: self.priority,
            assignee: self.assignee,
            status: self.status,
            unset_status: self.unset_status,
        })
    }
}

// ============================================================================
// Task
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    pub task_id: String,
}

impl TaskIdParams {
    pub fn path(&self) -> String {
        format!("task/{}", self.task_id)
    }
}

/// Filters for listing a list's tasks. Every field maps to the query key of
/// the same name; time filters are 13-digit epoch milliseconds.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetTasksParams {
    pub list_id: i64,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub include_markdown_description: Option<bool>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub reverse: Option<bool>,
    #[serde(default)]
    pub subtasks: Option<bool>,
    #[serde(default)]
    pub statuses: Option<Vec<String>>,
    #[serde(default)]
    pub include_closed: Option<bool>,
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
    #[serde(default)]
    pub watchers: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub due_date_gt: Option<i64>,
    #[serde(default)]
    pub due_date_lt: Option<i64>,
    #[serde(default)]
    pub date_created_gt: Option<i64>,
    #[serde(default)]
    pub date_created_lt: Option<i64>,
    #[serde(default)]
    pub date_updated_gt: Option<i64>,
    #[serde(default)]
    pub date_updated_lt: Option<i64>,
    #[serde(default)]
    pub date_done_gt: Option<i64>,
    #[serde(default)]
    pub date_done_lt: Option<i64>,
    #[serde(default)]
    pub custom_fields: Option<Vec<String>>,
    #[serde(default)]
    pub custom_field: Option<Vec<String>>,
    #[serde(default)]
    pub custom_items: Option<Vec<i64>>,
}

impl GetTasksParams {
    pub fn request(self) -> ApiRequest {
        ApiRequest::get(format!("list/{}/task", self.list_id))
            .query_opt("archived", self.archived)
            .query_opt(
                "include_markdown_description",
                self.include_markdown_description,
            )
            .query_opt("page", self.page)
            .query_opt("order_by", self.order_by)
            .query_opt("reverse", self.reverse)
            .query_opt("subtasks", self.subtasks)
            .query_each("statuses", self.statuses)
            .query_opt("include_closed", self.include_closed)
            .query_each("assignees", self.assignees)
            .query_each("watchers", self.watchers)
            .query_each("tags", self.tags)
            .query_opt("due_date_gt", self.due_date_gt)
            .query_opt("due_date_lt", self.due_date_lt)
            .query_opt("date_created_gt", self.date_created_gt)
            .query_opt("date_created_lt", self.date_created_lt)
            .query_opt("date_updated_gt", self.date_updated_gt)
            .query_opt("date_updated_lt", self.date_updated_lt)
            .query_opt("date_done_gt", self.date_done_gt)
            .query_opt("date_done_lt", self.date_done_lt)
            .query_each("custom_fields", self.custom_fields)
            .query_each("custom_field", self.custom_field)
            .query_each("custom_items", self.custom_items)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    pub list_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    /// Due date, epoch milliseconds
    #[serde(default)]
    pub due_date: Option<i64>,
    /// Assignee user IDs
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct TaskBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
}

impl CreateTaskParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        ApiRequest::post(format!("list/{}/task", self.list_id)).json(&TaskBody {
            name: Some(self.name),
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            assignees: self.assignees,
            tags: self.tags,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    pub task_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    /// Due date, epoch milliseconds
    #[serde(default)]
    pub due_date: Option<i64>,
}

impl UpdateTaskParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        ApiRequest::put(format!("task/{}", self.task_id)).json(&TaskBody {
            name: self.name,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            assignees: None,
            tags: None,
        })
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWeekTasksParams {
    pub list_id: String,
    /// First day of the range, e.g. "5 May 2025" or "2025-05-05"
    pub start_date: String,
    /// Last day of the range, inclusive
    pub end_date: String,
    /// Case-insensitive fragment of the first assignee's username
    pub assignee_username: String,
}

// ============================================================================
// Document
// ============================================================================

/// Default page size for document search.
pub const DEFAULT_DOC_LIMIT: i64 = 50;
/// Page depth meaning "all levels".
pub const DEFAULT_PAGE_DEPTH: i64 = -1;
/// Default page content format.
pub const DEFAULT_CONTENT_FORMAT: &str = "text/md";

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SearchDocsParams {
    #[serde(rename = "workspaceId")]
    pub workspace_id: i64,
    /// Doc ID
    #[serde(default)]
    pub id: Option<String>,
    /// Creator user ID
    #[serde(default)]
    pub creator: Option<i64>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub parent_type: Option<String>,
    /// Page size, defaults to 50
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl SearchDocsParams {
    pub fn request(self) -> ApiRequest {
        ApiRequest::get(format!("/v3/workspaces/{}/docs", self.workspace_id))
            .query_non_empty("id", self.id)
            .query_opt("creator", self.creator)
            .query("deleted", self.deleted.unwrap_or(false))
            .query("archived", self.archived.unwrap_or(false))
            .query_non_empty("parent_id", self.parent_id)
            .query_non_empty("parent_type", self.parent_type)
            .query("limit", self.limit.unwrap_or(DEFAULT_DOC_LIMIT))
            .query_non_empty("next_cursor", self.next_cursor)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDocParams {
    #[serde(rename = "workspaceId")]
    pub workspace_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "parentDoc")]
    pub parent_doc: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateDocBody {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(rename = "parentDoc", skip_serializing_if = "Option::is_none")]
    parent_doc: Option<String>,
}

impl CreateDocParams {
    pub fn request(self) -> Result<ApiRequest, Error> {
        ApiRequest::post(format!("team/{}/doc", self.workspace_id)).json(&CreateDocBody {
            title: self.title,
            content: self.content.filter(|c| !c.is_empty()),
            parent_doc: self.parent_doc.filter(|p| !p.is_empty()),
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDocParams {
    #[serde(rename = "workspaceId")]
    pub workspace_id: i64,
    #[serde(rename = "docId")]
    pub doc_id: String,
}

impl GetDocParams {
    pub fn request(self) -> ApiRequest {
        ApiRequest::get(format!("/v3/workspaces/{}/docs/{}", self.workspace_id, self.doc_id))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDocPagesParams {
    #[serde(rename = "workspaceId")]
    pub workspace_id: i64,
    #[serde(rename = "docId")]
    pub doc_id: String,
    /// Levels of nested pages to return, -1 for all
    #[serde(default)]
    pub max_page_depth: Option<i64>,
    /// "text/md" or "text/plain"
    #[serde(default)]
    pub content_format: Option<String>,
}

impl GetDocPagesParams {
    pub fn request(self) -> ApiRequest {
        doc_pages_request(
            &self.workspace_id.to_string(),
            &self.doc_id,
            self.max_page_depth,
            self.content_format,
        )
    }
}

/// `GET /v3/workspaces/{w}/docs/{d}/pages` with depth and format defaults.
pub fn doc_pages_request(
    workspace_id: &str,
    doc_id: &str,
    max_page_depth: Option<i64>,
    content_format: Option<String>,
) -> ApiRequest {
    ApiRequest::get(format!("/v3/workspaces/{}/docs/{}/pages", workspace_id, doc_id))
        .query(
            "max_page_depth",
            max_page_depth.unwrap_or(DEFAULT_PAGE_DEPTH),
        )
        .query(
            "content_format",
            content_format.unwrap_or_else(|| DEFAULT_CONTENT_FORMAT.to_string()),
        )
}
