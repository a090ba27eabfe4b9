//! Prompts offered to clients.

use rmcp::model::{
    GetPromptResult, ListPromptsResult, Prompt, PromptArgument, PromptMessage, PromptMessageRole,
};
use serde_json::{Map, Value};

use crate::time::REPORT_TIMEZONE_LABEL;

pub const GET_TASKS_PROMPT: &str = "getTasks";

const GET_TASKS_DESCRIPTION: &str = "When calling the getTasks tool, include any time-based \
filter parameters as 13-digit Unix timestamps (ms since epoch) in the user's timezone \
(default Asia/Singapore (SGT)). Only include date filters (including date_done_gt and \
date_done_lt) when explicitly requested by the user; do not infer or confuse date_done with \
date_closed. After the tool runs, include the full JSON result verbatim in your response; \
do not omit it.";

const TIMEZONE_DESCRIPTION: &str = "Timezone for date filters, e.g. Asia/Singapore (SGT)";

/// `prompts/list` result.
pub fn list() -> ListPromptsResult {
    let timezone = PromptArgument {
        name: "timezone".to_string(),
        title: None,
        description: Some(TIMEZONE_DESCRIPTION.to_string()),
        required: Some(false),
    };
    let prompt = Prompt::new(
        GET_TASKS_PROMPT,
        Some(GET_TASKS_DESCRIPTION),
        Some(vec![timezone]),
    );
    ListPromptsResult::with_all_items(vec![prompt])
}

/// `prompts/get` result, or `None` for an unknown prompt.
pub fn get(name: &str, arguments: Option<&Map<String, Value>>) -> Option<GetPromptResult> {
    if name != GET_TASKS_PROMPT {
        return None;
    }

    let timezone = arguments
        .and_then(|args| args.get("timezone"))
        .and_then(Value::as_str)
        .unwrap_or(REPORT_TIMEZONE_LABEL);

    let text = format!(
        "Convert all date/time filter parameters to 13-digit Unix timestamps (ms since epoch) \
         in timezone {} when calling getTasks. Only include date filters (including \
         date_done_gt and date_done_lt) when explicitly requested by the user; do not infer \
         or confuse date_done with date_closed.",
        timezone
    );

    Some(GetPromptResult {
        description: Some(GET_TASKS_DESCRIPTION.to_string()),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    })
}
