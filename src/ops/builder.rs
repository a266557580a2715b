use chrono::{Duration, Local, NaiveDate};
use tracing::debug;

use crate::model::task::{DUE_DATE_FORMAT, Task};

/// Error type for building a task
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("task description is empty")]
    EmptyDescription,
    #[error("invalid date format '{0}', expected YYYY-MM-DD")]
    InvalidFormat(String),
    #[error("due date {date} is before {floor}")]
    DateInPast { date: NaiveDate, floor: NaiveDate },
}

/// Builds a single task, validating the optional due date on the way.
///
/// A failed `attach_due_date` leaves the task exactly as it was.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    /// Start a pending task with no due date
    pub fn create(description: impl Into<String>) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(TaskBuilder {
            task: Task::new(description),
        })
    }

    /// Validate `date` against the local clock and attach it
    pub fn attach_due_date(&mut self, date: &str) -> Result<NaiveDate, ValidationError> {
        self.attach_due_date_on(date, Local::now().date_naive())
    }

    /// Validate `date` as if today were `today` and attach it
    pub fn attach_due_date_on(
        &mut self,
        date: &str,
        today: NaiveDate,
    ) -> Result<NaiveDate, ValidationError> {
        let due = validate_due_date(date, today)?;
        self.task.due_date = Some(due);
        debug!(description = %self.task.description, due = %due, "due date attached");
        Ok(due)
    }

    /// The task built so far. Does not consume or change the builder.
    pub fn finalize(&self) -> Task {
        self.task.clone()
    }
}

/// Earliest due date accepted on `today`.
///
/// The floor is yesterday, so today and yesterday are both accepted.
pub fn due_date_floor(today: NaiveDate) -> NaiveDate {
    today - Duration::days(1)
}

/// Parse a `YYYY-MM-DD` string and reject dates before the floor.
///
/// chrono skips whitespace before numeric fields and allows a sign on `%Y`,
/// so those are rejected up front.
pub fn validate_due_date(date: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidFormat(date.to_string());
    let strict = date.starts_with(|c: char| c.is_ascii_digit())
        && !date.contains(|c: char| c.is_whitespace() || c == '+');
    if !strict {
        return Err(invalid());
    }
    let parsed = NaiveDate::parse_from_str(date, DUE_DATE_FORMAT).map_err(|_| invalid())?;
    let floor = due_date_floor(today);
    if parsed < floor {
        return Err(ValidationError::DateInPast {
            date: parsed,
            floor,
        });
    }
    Ok(parsed)
}
