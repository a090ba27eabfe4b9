//! URI-addressed read-only resources.
//!
//! Each resource maps a `clickup://` URI onto one GET against the API. The
//! user resource has a fixed URI; the rest are templates whose `{name}`
//! segments are filled from the requested URI.

use rmcp::model::{
    AnnotateAble, ListResourceTemplatesResult, ListResourcesResult, RawResource,
    RawResourceTemplate, ReadResourceResult, Resource, ResourceContents, ResourceTemplate,
};
use serde_json::Value;

use crate::request::ApiRequest;

use super::params::doc_pages_request;

pub const MIME_JSON: &str = "application/json";

/// Every resource the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickUpResource {
    User,
    Workspace,
    Space,
    SpaceFolders,
    Folder,
    FolderLists,
    SpaceLists,
    List,
    ListTasks,
    Task,
    Docs,
    Doc,
    DocPages,
}

impl ClickUpResource {
    pub const ALL: [ClickUpResource; 13] = [
        ClickUpResource::User,
        ClickUpResource::Workspace,
        ClickUpResource::Space,
        ClickUpResource::SpaceFolders,
        ClickUpResource::Folder,
        ClickUpResource::FolderLists,
        ClickUpResource::SpaceLists,
        ClickUpResource::List,
        ClickUpResource::ListTasks,
        ClickUpResource::Task,
        ClickUpResource::Docs,
        ClickUpResource::Doc,
        ClickUpResource::DocPages,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClickUpResource::User => "clickup_user",
            ClickUpResource::Workspace => "clickup_workspace",
            ClickUpResource::Space => "clickup_space",
            ClickUpResource::SpaceFolders => "clickup_space_folders",
            ClickUpResource::Folder => "clickup_folder",
            ClickUpResource::FolderLists => "clickup_folder_lists",
            ClickUpResource::SpaceLists => "clickup_space_lists",
            ClickUpResource::List => "clickup_list",
            ClickUpResource::ListTasks => "clickup_list_tasks",
            ClickUpResource::Task => "clickup_task",
            ClickUpResource::Docs => "clickup_docs",
            ClickUpResource::Doc => "clickup_doc",
            ClickUpResource::DocPages => "clickup_doc_pages",
        }
    }

    pub fn uri_template(self) -> &'static str {
        match self {
            ClickUpResource::User => "clickup://user",
            ClickUpResource::Workspace => "clickup://workspace/{workspace_id}",
            ClickUpResource::Space => "clickup://space/{space_id}",
            ClickUpResource::SpaceFolders => "clickup://space/{space_id}/folders",
            ClickUpResource::Folder => "clickup://folder/{folder_id}",
            ClickUpResource::FolderLists => "clickup://folder/{folder_id}/lists",
            ClickUpResource::SpaceLists => "clickup://space/{space_id}/lists",
            ClickUpResource::List => "clickup://list/{list_id}",
            ClickUpResource::ListTasks => "clickup://list/{list_id}/tasks",
            ClickUpResource::Task => "clickup://task/{task_id}",
            ClickUpResource::Docs => "clickup://workspace/{workspace_id}/docs",
            ClickUpResource::Doc => "clickup://workspace/{workspace_id}/doc/{doc_id}",
            ClickUpResource::DocPages => "clickup://workspace/{workspace_id}/doc/{doc_id}/pages",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ClickUpResource::User => "Fetch metadata for the authorized user",
            ClickUpResource::Workspace => "Fetch metadata for a specific workspace",
            ClickUpResource::Space => "Fetch metadata for a specific space",
            ClickUpResource::SpaceFolders => "Fetch all folders in the specified space",
            ClickUpResource::Folder => "Fetch metadata for a specific folder",
            ClickUpResource::FolderLists => "Fetch all lists in the specified folder",
            ClickUpResource::SpaceLists => "Fetch folderless lists in the specified space",
            ClickUpResource::List => "Fetch metadata for a specific list",
            ClickUpResource::ListTasks => "Fetch tasks/subtasks for a specific list",
            ClickUpResource::Task => "Fetch metadata for a specific task",
            ClickUpResource::Docs => "List docs in a workspace",
            ClickUpResource::Doc => "Fetch metadata for a specific document",
            ClickUpResource::DocPages => "Fetch pages of a specific document",
        }
    }

    /// Whether the URI has placeholders to fill.
    pub fn is_template(self) -> bool {
        self.uri_template().contains('{')
    }

    /// Build the request for this resource from the captured segments, in
    /// template order.
    fn request(self, args: &[&str]) -> ApiRequest {
        let arg = |i: usize| args.get(i).copied().unwrap_or_default();
        match self {
            ClickUpResource::User => ApiRequest::get("user"),
            ClickUpResource::Workspace => ApiRequest::get(format!("team/{}", arg(0))),
            ClickUpResource::Space => ApiRequest::get(format!("space/{}", arg(0))),
            ClickUpResource::SpaceFolders => ApiRequest::get(format!("space/{}/folder", arg(0))),
            ClickUpResource::Folder => ApiRequest::get(format!("folder/{}", arg(0))),
            ClickUpResource::FolderLists => ApiRequest::get(format!("folder/{}/list", arg(0))),
            ClickUpResource::SpaceLists => ApiRequest::get(format!("space/{}/list", arg(0))),
            ClickUpResource::List => ApiRequest::get(format!("list/{}", arg(0))),
            ClickUpResource::ListTasks => ApiRequest::get(format!("list/{}/task", arg(0))),
            ClickUpResource::Task => ApiRequest::get(format!("task/{}", arg(0))),
            ClickUpResource::Docs => ApiRequest::get(format!("/v3/workspaces/{}/docs", arg(0))),
            ClickUpResource::Doc => {
                ApiRequest::get(format!("/v3/workspaces/{}/docs/{}", arg(0), arg(1)))
            }
            ClickUpResource::DocPages => doc_pages_request(arg(0), arg(1), None, None),
        }
    }

    /// Capture the placeholder values if `uri` fits this resource's template.
    fn captures(self, uri: &str) -> Option<Vec<&str>> {
        let template: Vec<&str> = self.uri_template().split('/').collect();
        let given: Vec<&str> = uri.split('/').collect();
        if template.len() != given.len() {
            return None;
        }

        let mut captured = Vec::new();
        for (pattern, segment) in template.iter().zip(given) {
            if pattern.starts_with('{') && pattern.ends_with('}') {
                if segment.is_empty() {
                    return None;
                }
                captured.push(segment);
            } else if *pattern != segment {
                return None;
            }
        }
        Some(captured)
    }

    fn resource(self) -> Resource {
        let mut raw = RawResource::new(self.uri_template(), self.name());
        raw.description = Some(self.description().to_string());
        raw.mime_type = Some(MIME_JSON.to_string());
        raw.no_annotation()
    }

    fn template(self) -> ResourceTemplate {
        RawResourceTemplate {
            uri_template: self.uri_template().to_string(),
            name: self.name().to_string(),
            title: None,
            description: Some(self.description().to_string()),
            mime_type: Some(MIME_JSON.to_string()),
            icons: None,
        }
        .no_annotation()
    }
}

/// Resolve a requested URI to the resource it names and the request it needs.
pub fn resolve(uri: &str) -> Option<(ClickUpResource, ApiRequest)> {
    let bare = uri.split(['?', '#']).next().unwrap_or(uri);
    ClickUpResource::ALL.iter().find_map(|resource| {
        resource
            .captures(bare)
            .map(|args| (*resource, resource.request(&args)))
    })
}

/// `resources/list` result: the resources with a fixed URI.
pub fn list() -> ListResourcesResult {
    let resources = ClickUpResource::ALL
        .iter()
        .filter(|r| !r.is_template())
        .map(|r| r.resource())
        .collect();
    ListResourcesResult::with_all_items(resources)
}

/// `resources/templates/list` result.
pub fn templates() -> ListResourceTemplatesResult {
    let templates = ClickUpResource::ALL
        .iter()
        .filter(|r| r.is_template())
        .map(|r| r.template())
        .collect();
    ListResourceTemplatesResult::with_all_items(templates)
}

/// `resources/read` result with the URI echoed back.
pub fn contents(uri: &str, body: &Value) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(MIME_JSON.to_string()),
            text: body.to_string(),
            meta: None,
        }],
    }
}
