use chrono::NaiveDate;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Format of a due date, for both parsing and display
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Identity of a task object.
///
/// Assigned by the owning `TodoList` when the task is added. Two tasks with
/// equal descriptions and state are still different objects if their ids
/// differ. `TaskId::UNASSIGNED` marks a task that was built but never added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl TaskId {
    pub const UNASSIGNED: TaskId = TaskId(0);
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single to-do item
#[derive(Debug, Clone)]
pub struct Task {
    /// Object identity (not part of the user-visible state)
    pub id: TaskId,
    /// What needs doing
    pub description: String,
    /// Whether the task has been marked completed
    pub completed: bool,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a pending task with no due date
    pub fn new(description: impl Into<String>) -> Self {
        Task {
            id: TaskId::UNASSIGNED,
            description: description.into(),
            completed: false,
            due_date: None,
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn mark_pending(&mut self) {
        self.completed = false;
    }

    /// Due date rendered as `YYYY-MM-DD`
    pub fn due_date_str(&self) -> Option<String> {
        self.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string())
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}

/// Value equality: identity is ignored
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.completed == other.completed
            && self.due_date == other.due_date
    }
}

impl Eq for Task {}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, ", self.description, self.status_label())?;
        match self.due_date_str() {
            Some(due) => write!(f, "Due: {})", due),
            None => write!(f, "No due date)"),
        }
    }
}

/// View selection over the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    /// Parse a filter name. Anything unrecognized selects everything.
    pub fn parse(s: &str) -> Filter {
        match s {
            "completed" => Filter::Completed,
            "pending" => Filter::Pending,
            _ => Filter::All,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
        }
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Filter::parse(s))
    }
}
