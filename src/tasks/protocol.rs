//! HTTP Protocol Definitions
//!
//! Endpoint paths and request shapes for the task database API. Replies are
//! either a JSON `Task`, a bare `success`, a plain-text id, or plain-text rows
//! for the listing.

use super::types::Task;
use serde::Deserialize;
use std::fmt::Write;

pub const ENDPOINT_GET_BY_ID: &str = "/getByID";
pub const ENDPOINT_NEW_TASK: &str = "/newTask";
pub const ENDPOINT_GET_NEW_TASK: &str = "/getNewTask";
pub const ENDPOINT_FINISH_TASK: &str = "/finishTask";
pub const ENDPOINT_SET_BY_ID: &str = "/setByID";
pub const ENDPOINT_LIST: &str = "/list";

pub const SUCCESS: &str = "success";
pub const ONLY_GET: &str = "Error: Only GET accepted";
pub const ONLY_POST: &str = "Error: Only POST accepted";

/// Query string for `/getByID` and `/finishTask`.
///
/// `id` is kept as text so a missing or non-numeric value can be reported
/// with our own error instead of the extractor's.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// Body of `/setByID`. `state` is range-checked after parsing.
#[derive(Debug, Deserialize)]
pub struct OverwriteRequest {
    pub id: usize,
    pub state: i64,
}

/// Renders tasks as `<index>: id:<id> state:<state>` lines.
pub fn format_listing(tasks: &[Task]) -> String {
    let mut out = String::new();
    for (index, task) in tasks.iter().enumerate() {
        let _ = writeln!(out, "{}: id:{} state:{}", index, task.id, task.state.code());
    }
    out
}
