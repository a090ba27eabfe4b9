//! Tests for the ClickUp MCP server.
//!
//! Each test runs the server and an rmcp client over an in-memory pipe, so
//! calls go through real tool routing and schema validation.

use super::*;
use crate::client::ClickUpClient;
use rmcp::model::CallToolRequestParams;
use rmcp::service::RunningService;
use rmcp::{RoleClient, ServiceExt};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const TEST_KEY: &str = "pk_test";

type TestClient = RunningService<RoleClient, ()>;

/// Custom matcher for requests that carry no body.
struct NoBody;

impl Match for NoBody {
    fn matches(&self, request: &Request) -> bool {
        request.body.is_empty()
    }
}

async fn connect(server: ClickUpServer) -> TestClient {
    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    tokio::spawn(async move {
        if let Ok(running) = server.serve(server_io).await {
            let _ = running.waiting().await;
        }
    });
    ().serve(client_io).await.expect("client should connect")
}

async fn test_client(mock_uri: &str) -> TestClient {
    let client = ClickUpClient::new().unwrap().with_base_url(mock_uri);
    connect(ClickUpServer::with_client(
        client,
        KeyResolver::new(Some(TEST_KEY.to_string())),
    ))
    .await
}

async fn keyless_client(mock_uri: &str) -> TestClient {
    let client = ClickUpClient::new().unwrap().with_base_url(mock_uri);
    connect(ClickUpServer::with_client(client, KeyResolver::new(None))).await
}

fn tool_call(name: &str, arguments: Value) -> CallToolRequestParams {
    serde_json::from_value(json!({"name": name, "arguments": arguments})).unwrap()
}

async fn call_text(client: &TestClient, name: &str, arguments: Value) -> String {
    let result = client
        .call_tool(tool_call(name, arguments))
        .await
        .expect("tool call should succeed");
    result.content[0]
        .as_text()
        .expect("Expected text content")
        .text
        .clone()
}

async fn call_json(client: &TestClient, name: &str, arguments: Value) -> Value {
    let text = call_text(client, name, arguments).await;
    serde_json::from_str(&text).expect("tool text should be JSON")
}

async fn read_resource(client: &TestClient, uri: &str) -> Value {
    let result = client
        .read_resource(serde_json::from_value(json!({ "uri": uri })).unwrap())
        .await
        .expect("resource read should succeed");
    serde_json::to_value(&result).unwrap()
}

fn features() -> Value {
    let on = json!({"enabled": true});
    json!({
        "dueDates": on, "timeTracking": on, "tags": on, "timeEstimates": on,
        "checklists": on, "customFields": on, "remapDependencies": on,
        "dependencyWarning": on, "portfolios": on
    })
}

// ============================================================================
// Registry Tests
// ============================================================================

#[tokio::test]
async fn test_lists_every_tool() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri()).await;

    let tools = client.list_all_tools().await.unwrap();
    let mut names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
    names.sort();

    let mut expected = vec![
        "getAuthorizedUser",
        "getWorkspaces",
        "getSpaces",
        "createSpace",
        "getSpace",
        "updateSpace",
        "deleteSpace",
        "getFolders",
        "createFolder",
        "getFolder",
        "updateFolder",
        "deleteFolder",
        "getLists",
        "createList",
        "getFolderlessList",
        "getList",
        "updateList",
        "deleteList",
        "getTasks",
        "createTask",
        "getTask",
        "updateTask",
        "deleteTask",
        "getWeekTasks",
        "searchDocs",
        "createDoc",
        "getDoc",
        "getDocPages",
    ];
    expected.sort_unstable();

    assert_eq!(names, expected);
    assert_eq!(ClickUpServer::tools().len(), expected.len());
}

#[tokio::test]
async fn test_tool_schemas_keep_public_field_names() {
    let tools = ClickUpServer::tools();
    let schema_of = |name: &str| {
        let tool = tools.iter().find(|t| t.name == name).unwrap();
        Value::Object((*tool.input_schema).clone())
    };

    let spaces = schema_of("getSpaces");
    assert!(spaces["properties"].get("teamId").is_some());
    assert_eq!(spaces["required"], json!(["teamId"]));

    let update_list = schema_of("updateList");
    for field in ["listId", "dueDate", "dueDateTime", "unsetStatus"] {
        assert!(update_list["properties"].get(field).is_some(), "{}", field);
    }

    let docs = schema_of("searchDocs");
    for field in ["workspaceId", "parent_id", "next_cursor"] {
        assert!(docs["properties"].get(field).is_some(), "{}", field);
    }
}

#[tokio::test]
async fn test_server_info_advertises_capabilities() {
    let server = ClickUpServer::with_client(ClickUpClient::new().unwrap(), KeyResolver::default());
    let info = server.get_info();

    assert_eq!(info.server_info.name, "clickupmcp");
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
    assert!(info.capabilities.prompts.is_some());
}

// ============================================================================
// Key Guard Tests
// ============================================================================

#[tokio::test]
async fn test_missing_key_short_circuits_tools() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = keyless_client(&mock_server.uri()).await;

    assert_eq!(
        call_text(&client, "getAuthorizedUser", json!({})).await,
        "API key missing."
    );
    assert_eq!(
        call_text(&client, "getTasks", json!({"list_id": 1})).await,
        "API key missing."
    );
    let week_args = json!({
        "list_id": "1",
        "start_date": "5 May 2025",
        "end_date": "11 May 2025",
        "assignee_username": "a"
    });
    assert_eq!(
        call_text(&client, "getWeekTasks", week_args).await,
        "API key missing."
    );
}

#[tokio::test]
async fn test_missing_key_resource_payload() {
    let mock_server = MockServer::start().await;
    let client = keyless_client(&mock_server.uri()).await;

    let result = read_resource(&client, "clickup://space/5").await;
    let contents = &result["contents"][0];

    assert_eq!(contents["uri"], "clickup://space/5");
    assert_eq!(contents["mimeType"], "application/json");
    assert_eq!(
        serde_json::from_str::<Value>(contents["text"].as_str().unwrap()).unwrap(),
        json!({"error": "API key missing."})
    );
}

// ============================================================================
// Pass-through Tests
// ============================================================================

#[tokio::test]
async fn test_get_authorized_user_returns_body_verbatim() {
    let mock_server = MockServer::start().await;
    let body = json!({"user": {"id": 183, "username": "Ada", "color": "#7b68ee"}});

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(header("Authorization", TEST_KEY))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    assert_eq!(
        call_json(&client, "getAuthorizedUser", json!({})).await,
        body
    );
}

#[tokio::test]
async fn test_get_spaces_with_archived() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/team/42/space"))
        .and(query_param("archived", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spaces": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    let args = json!({"teamId": 42, "archived": true});
    let result = call_json(&client, "getSpaces", args).await;
    assert_eq!(result, json!({"spaces": []}));
}

#[tokio::test]
async fn test_remote_rejection_is_a_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/space/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"err": "x"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    let result = client
        .call_tool(tool_call("getSpace", json!({"spaceId": "missing"})))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    let text = &result.content[0].as_text().unwrap().text;
    assert_eq!(
        serde_json::from_str::<Value>(text).unwrap(),
        json!({"error": {"err": "x"}, "status": 404})
    );
}

#[tokio::test]
async fn test_create_space_sends_renamed_body() {
    let mock_server = MockServer::start().await;
    let on = json!({"enabled": true});

    Mock::given(method("POST"))
        .and(path("/v2/team/9001/space"))
        .and(body_json(json!({
            "name": "Engineering",
            "multiple_assignees": false,
            "features": {
                "due_dates": on, "time_tracking": on, "tags": on, "time_estimates": on,
                "checklists": on, "custom_fields": on, "remap_dependencies": on,
                "dependency_warning": on, "portfolios": on
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    let result = call_json(
        &client,
        "createSpace",
        json!({
            "workspaceId": "9001",
            "name": "Engineering",
            "multipleAssignees": false,
            "features": features()
        }),
    )
    .await;
    assert_eq!(result, json!({"id": "1"}));
}

#[tokio::test]
async fn test_update_list_sends_renamed_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/list/12"))
        .and(body_json(json!({"due_date": 1700000000000i64, "unset_status": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "12"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    call_json(
        &client,
        "updateList",
        json!({"listId": "12", "dueDate": 1700000000000i64, "unsetStatus": true}),
    )
    .await;
}

#[tokio::test]
async fn test_delete_task_sends_no_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/task/abc"))
        .and(NoBody)
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    assert_eq!(
        call_json(&client, "deleteTask", json!({"task_id": "abc"})).await,
        json!({})
    );
}

#[tokio::test]
async fn test_folder_and_list_paths() {
    let mock_server = MockServer::start().await;

    for (route, body) in [
        ("/v2/space/5/folder", json!({"folders": []})),
        ("/v2/folder/7/list", json!({"lists": []})),
        ("/v2/space/5/list", json!({"lists": ["folderless"]})),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = test_client(&mock_server.uri()).await;
    assert_eq!(
        call_json(&client, "getFolders", json!({"spaceId": "5"})).await,
        json!({"folders": []})
    );
    assert_eq!(
        call_json(&client, "getLists", json!({"folderId": "7"})).await,
        json!({"lists": []})
    );
    assert_eq!(
        call_json(&client, "getFolderlessList", json!({"spaceId": "5"})).await,
        json!({"lists": ["folderless"]})
    );
}

// ============================================================================
// Task Tests
// ============================================================================

#[tokio::test]
async fn test_get_task_adds_local_timestamps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/task/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc",
            "date_created": "1700000000000",
            "due_date": null
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    let task = call_json(&client, "getTask", json!({"task_id": "abc"})).await;

    assert_eq!(task["date_created_sgt"], "2023-11-15 06:13:20");
    assert!(task.get("due_date_sgt").is_none());
    assert_eq!(task["date_created"], "1700000000000");
}

#[tokio::test]
async fn test_get_task_failure_is_not_annotated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/task/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"err": "Task not found"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    assert_eq!(
        call_json(&client, "getTask", json!({"task_id": "gone"})).await,
        json!({"error": {"err": "Task not found"}, "status": 404})
    );
}

#[tokio::test]
async fn test_get_tasks_null_body_becomes_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/list/901/task"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    assert_eq!(
        call_text(&client, "getTasks", json!({"list_id": 901})).await,
        "[]"
    );
}

#[tokio::test]
async fn test_get_tasks_repeats_array_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/list/901/task"))
        .and(|request: &Request| {
            let statuses: Vec<_> = request
                .url
                .query_pairs()
                .filter(|(k, _)| k == "statuses")
                .map(|(_, v)| v.into_owned())
                .collect();
            statuses == ["open", "review"]
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tasks": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    call_json(
        &client,
        "getTasks",
        json!({"list_id": 901, "statuses": ["open", "review"]}),
    )
    .await;
}

#[tokio::test]
async fn test_week_tasks_reports_invalid_date() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri()).await;

    let args = json!({
        "list_id": "1",
        "start_date": "whenever",
        "end_date": "11 May 2025",
        "assignee_username": "a"
    });
    let text = call_text(&client, "getWeekTasks", args).await;
    assert_eq!(text, "Invalid date: whenever");
}

#[tokio::test]
async fn test_week_tasks_requires_every_argument() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri()).await;

    let result = client
        .call_tool(tool_call(
            "getWeekTasks",
            json!({"list_id": "1", "start_date": "5 May 2025"}),
        ))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_week_tasks_returns_reduced_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/list/900/task"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [{
                "id": "t1",
                "name": "Ship it",
                "date_closed": "1746426600000",
                "assignees": [{"username": "Grace Hopper"}],
                "status": {"status": "complete", "color": "#000"},
                "parent": "t0"
            }],
            "last_page": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    let args = json!({
        "list_id": "900",
        "start_date": "2025-05-05",
        "end_date": "2025-05-11",
        "assignee_username": "hopper"
    });
    let tasks = call_json(&client, "getWeekTasks", args).await;

    assert_eq!(
        tasks,
        json!([{
            "id": "t1",
            "name": "Ship it",
            "date_closed": "05/05/2025, 02:30:00 pm",
            "assignee": "Grace Hopper",
            "status": "complete",
            "parent_task_id": "t0"
        }])
    );
}

// ============================================================================
// Document Tests
// ============================================================================

#[tokio::test]
async fn test_search_docs_uses_v3_with_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/workspaces/77/docs"))
        .and(query_param("deleted", "false"))
        .and(query_param("archived", "false"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"docs": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    assert_eq!(
        call_json(&client, "searchDocs", json!({"workspaceId": 77})).await,
        json!({"docs": []})
    );
}

#[tokio::test]
async fn test_create_doc_stays_on_v2() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/team/77/doc"))
        .and(body_json(json!({"title": "Runbook"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "d1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    call_json(
        &client,
        "createDoc",
        json!({"workspaceId": "77", "title": "Runbook"}),
    )
    .await;
}

// ============================================================================
// Resource Tests
// ============================================================================

#[tokio::test]
async fn test_lists_resources_and_templates() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri()).await;

    let resources = client.list_all_resources().await.unwrap();
    assert_eq!(resources.len(), 1);

    let templates = client.list_all_resource_templates().await.unwrap();
    assert_eq!(templates.len(), 12);
}

#[tokio::test]
async fn test_read_resource_echoes_uri() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/workspaces/9/docs/d1/pages"))
        .and(query_param("max_page_depth", "-1"))
        .and(query_param("content_format", "text/md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "p1"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    let result = read_resource(&client, "clickup://workspace/9/doc/d1/pages").await;
    let contents = &result["contents"][0];

    assert_eq!(contents["uri"], "clickup://workspace/9/doc/d1/pages");
    assert_eq!(contents["mimeType"], "application/json");
    assert_eq!(contents["text"], r#"[{"id":"p1"}]"#);
}

#[tokio::test]
async fn test_read_task_resource_is_not_annotated() {
    let mock_server = MockServer::start().await;

    let task = json!({"id": "abc", "date_created": "1700000000000"});
    Mock::given(method("GET"))
        .and(path("/v2/task/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri()).await;
    let result = read_resource(&client, "clickup://task/abc").await;
    let text = result["contents"][0]["text"].as_str().unwrap();

    assert!(!text.contains("_sgt"));
}

#[tokio::test]
async fn test_read_unknown_resource_fails() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri()).await;

    let result = client
        .read_resource(serde_json::from_value(json!({"uri": "clickup://widget/1"})).unwrap())
        .await;
    assert!(result.is_err());
}

// ============================================================================
// Prompt Tests
// ============================================================================

#[tokio::test]
async fn test_get_tasks_prompt() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri()).await;

    let prompts = client.list_all_prompts().await.unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].name, "getTasks");

    let prompt = client
        .get_prompt(
            serde_json::from_value(json!({"name": "getTasks", "arguments": {"timezone": "UTC"}}))
                .unwrap(),
        )
        .await
        .unwrap();
    let prompt = serde_json::to_value(&prompt).unwrap();
    let text = prompt["messages"][0]["content"]["text"].as_str().unwrap();
    assert!(text.contains("in timezone UTC when calling getTasks"));
}

#[tokio::test]
async fn test_unknown_prompt_fails() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri()).await;

    let result = client
        .get_prompt(serde_json::from_value(json!({"name": "nope"})).unwrap())
        .await;
    assert!(result.is_err());
}
