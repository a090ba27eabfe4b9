//! Closed-task collection over a date range.
//!
//! Pages through a list's tasks in order and keeps those closed inside the
//! requested days whose first assignee matches a name fragment. Pagination
//! ends on the last page or on the first page with no matches, even if later
//! pages might still hold some.

use tracing::debug;

use crate::client::ClickUpClient;
use crate::request::ApiRequest;
use crate::time::{format_closed, parse_date, DayRange};
use crate::types::{ApiResponse, Task, TaskPage, WeekTask};
use crate::Error;

use super::params::GetWeekTasksParams;

/// Why the collection stopped without a result.
#[derive(Debug, thiserror::Error)]
pub enum WeekError {
    #[error(transparent)]
    Date(#[from] Error),

    #[error("Error fetching tasks: {0}")]
    Fetch(String),
}

fn page_request(list_id: &str, page: u32) -> ApiRequest {
    ApiRequest::get(format!("list/{}/task", list_id))
        .query("archived", false)
        .query("subtasks", true)
        .query("include_closed", true)
        .query("page", page)
}

/// Decode one page, or describe why it cannot be used.
fn read_page(response: ApiResponse) -> Result<TaskPage, WeekError> {
    let body = match response {
        ApiResponse::Success(body) => body,
        ApiResponse::Failure(failure) => return Err(WeekError::Fetch(failure.detail())),
    };

    if !body.get("tasks").is_some_and(|t| t.is_array()) {
        return Err(WeekError::Fetch(body.to_string()));
    }

    serde_json::from_value(body).map_err(|e| WeekError::Fetch(e.to_string()))
}

fn reduce(task: Task, closed_ms: i64) -> WeekTask {
    WeekTask {
        assignee: task.first_assignee().map(str::to_string),
        date_closed: format_closed(closed_ms).unwrap_or_default(),
        status: task.status.map(|s| s.status).unwrap_or_default(),
        parent_task_id: task.parent,
        id: task.id,
        name: task.name,
    }
}

/// Collect every matching task across pages, in page order.
///
/// Any failed page aborts the whole collection.
pub async fn collect_week_tasks(
    client: &ClickUpClient,
    api_key: &str,
    params: &GetWeekTasksParams,
) -> Result<Vec<WeekTask>, WeekError> {
    let start = parse_date(&params.start_date)?;
    let end = parse_date(&params.end_date)?;
    let range = DayRange::new(start, end);
    let needle = params.assignee_username.to_lowercase();

    let mut collected = Vec::new();
    let mut page = 0u32;

    loop {
        let response = client
            .invoke(&page_request(&params.list_id, page), api_key)
            .await;
        let task_page = read_page(response)?;
        let last = task_page.is_last();

        let before = collected.len();
        for task in task_page.tasks {
            let Some(closed_ms) = task.closed_at_ms().filter(|ms| range.contains(*ms)) else {
                continue;
            };
            let assignee = task.first_assignee().unwrap_or_default().to_lowercase();
            if assignee.contains(&needle) {
                collected.push(reduce(task, closed_ms));
            }
        }

        let matched = collected.len() - before;
        debug!(page, matched, last, "Scanned task page");

        if matched == 0 || last {
            break;
        }
        page += 1;
    }

    Ok(collected)
}
