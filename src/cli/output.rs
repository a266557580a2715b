use serde::Serialize;

use crate::model::task::Task;
use crate::ops::builder::ValidationError;
use crate::ops::history::Action;
use crate::ops::manager::{Direction, ListError, Outcome};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based position in the printed view
    pub index: usize,
    pub description: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        index,
        description: task.description.clone(),
        completed: task.completed,
        due_date: task.due_date_str(),
    }
}

/// Tasks as a pretty JSON array, numbered from 1
pub fn tasks_to_json(tasks: &[&Task]) -> serde_json::Result<String> {
    let items: Vec<TaskJson> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| task_to_json(i + 1, t))
        .collect();
    serde_json::to_string_pretty(&items)
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// The "View Tasks" listing: a header then one numbered line per task.
/// Nothing is printed for an empty selection.
pub fn format_task_list(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return String::new();
    }
    let mut out = String::from("\nTasks:\n");
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, task));
    }
    out
}

/// What happened to the task during an undo or redo
pub fn outcome_message(outcome: &Outcome) -> String {
    let d = &outcome.description;
    match (outcome.direction, outcome.action) {
        (Direction::Undo, Action::Add) => format!("'{}' removed", d),
        (Direction::Undo, Action::MarkCompleted) => format!("'{}' is marked as pending", d),
        (Direction::Undo, Action::Delete) => format!("'{}' is added back to list", d),
        (Direction::Redo, Action::Add) => format!("'{}' is added back to list", d),
        (Direction::Redo, Action::MarkCompleted) => format!("'{}' marked as complete", d),
        (Direction::Redo, Action::Delete) => format!("'{}' is removed from the list", d),
    }
}

/// Closing line after a successful undo or redo
pub fn outcome_footer(direction: Direction) -> &'static str {
    match direction {
        Direction::Undo => "Undo action performed.",
        Direction::Redo => "Redo action performed.",
    }
}

pub fn list_error_message(err: &ListError) -> String {
    match err {
        ListError::IndexOutOfRange { .. } => "Task index out of bounds".to_string(),
        ListError::EmptyList => "TO-DO list is empty. Please first add items to delete!".to_string(),
        ListError::NothingToUndo => "Nothing to undo.".to_string(),
        ListError::NothingToRedo => "Nothing to redo.".to_string(),
        ListError::NotFound(description) => {
            format!("Task '{}' is no longer in the list.", description)
        }
    }
}

/// Message for a failed undo or redo. An empty list here means the record
/// had nothing to act on, not a rejected delete.
pub fn history_error_message(err: &ListError) -> String {
    match err {
        ListError::EmptyList => "TO-DO list is empty. Nothing to undo.".to_string(),
        other => list_error_message(other),
    }
}

pub fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyDescription => "Task description cannot be empty.".to_string(),
        ValidationError::InvalidFormat(_) => {
            "Invalid date format. Please use YYYY-MM-DD.".to_string()
        }
        ValidationError::DateInPast { .. } => {
            "The date should be today or later. Date Not Added".to_string()
        }
    }
}
