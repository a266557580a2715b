use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::model::config::{HistoryConfig, LookupMode};
use crate::model::task::{Filter, Task, TaskId};
use crate::ops::builder::{TaskBuilder, ValidationError};
use crate::ops::history::{Action, History, Memento};

/// Error type for list operations.
///
/// Every operation that returns one of these leaves the task list and both
/// history stacks untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("task index {index} out of bounds (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("the to-do list is empty")]
    EmptyList,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("task not found: {0}")]
    NotFound(String),
}

/// Which way a history record was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

/// What a successful undo or redo did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub direction: Direction,
    /// The recorded action (not its inverse)
    pub action: Action,
    /// Description of the task that was affected
    pub description: String,
}

/// The task list manager: an ordered list of tasks plus its history.
#[derive(Debug, Default)]
pub struct TodoList {
    tasks: Vec<Task>,
    history: History,
    lookup: LookupMode,
    last_id: u64,
}

impl TodoList {
    pub fn new() -> Self {
        TodoList::default()
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        TodoList {
            tasks: Vec::new(),
            history: History::with_config(config),
            lookup: config.lookup,
            last_id: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn lookup_mode(&self) -> LookupMode {
        self.lookup
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Build a task from a description and optional `YYYY-MM-DD` due date,
    /// then add it. Nothing is added if validation fails.
    pub fn add(
        &mut self,
        description: &str,
        due_date: Option<&str>,
    ) -> Result<&Task, ValidationError> {
        self.add_on(description, due_date, Local::now().date_naive())
    }

    /// Like `add`, validating the due date as if today were `today`
    pub fn add_on(
        &mut self,
        description: &str,
        due_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<&Task, ValidationError> {
        let mut builder = TaskBuilder::create(description)?;
        if let Some(date) = due_date {
            builder.attach_due_date_on(date, today)?;
        }
        Ok(self.add_task(builder.finalize()))
    }

    /// Append a task and record it. The task gets a fresh id.
    pub fn add_task(&mut self, mut task: Task) -> &Task {
        task.id = self.next_id();
        let index = self.tasks.len();
        self.history
            .record(Memento::new(Action::Add, task.clone(), index));
        debug!(id = %task.id, index, description = %task.description, "task added");
        self.tasks.push(task);
        &self.tasks[index]
    }

    /// Mark the task at `index` completed. Returns its description.
    pub fn mark_completed(&mut self, index: usize) -> Result<String, ListError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        task.mark_completed();
        let snapshot = task.clone();
        let description = snapshot.description.clone();
        self.history
            .record(Memento::new(Action::MarkCompleted, snapshot, index));
        debug!(index, description = %description, "task marked completed");
        Ok(description)
    }

    /// Remove the task at `index`. Later tasks shift down. Returns its
    /// description.
    pub fn delete_task(&mut self, index: usize) -> Result<String, ListError> {
        if self.tasks.is_empty() {
            return Err(ListError::EmptyList);
        }
        let len = self.tasks.len();
        if index >= len {
            return Err(ListError::IndexOutOfRange { index, len });
        }
        let task = self.tasks.remove(index);
        let description = task.description.clone();
        self.history.record(Memento::new(Action::Delete, task, index));
        debug!(index, description = %description, "task deleted");
        Ok(description)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Tasks matching `filter`, in list order.
    ///
    /// `EmptyList` is reported when the whole list is empty, whatever the
    /// filter. A non-empty list with no matching task gives `Ok(vec![])`.
    pub fn view_tasks(&self, filter: Filter) -> Result<Vec<&Task>, ListError> {
        if self.tasks.is_empty() {
            return Err(ListError::EmptyList);
        }
        Ok(self.tasks.iter().filter(|t| filter.matches(t)).collect())
    }

    // -----------------------------------------------------------------------
    // Undo / redo
    // -----------------------------------------------------------------------

    /// Reverse the most recent recorded action and move it to the redo stack.
    ///
    /// A record that cannot be applied stays on top of the undo stack, so
    /// older records stay out of reach until its task is back in the list.
    pub fn undo(&mut self) -> Result<Outcome, ListError> {
        let mut memento = self.history.pop_undo().ok_or(ListError::NothingToUndo)?;
        match self.apply_inverse(&mut memento) {
            Ok(description) => {
                debug!(action = %memento.action, description = %description, "undo");
                let outcome = Outcome {
                    direction: Direction::Undo,
                    action: memento.action,
                    description,
                };
                self.history.push_redo(memento);
                Ok(outcome)
            }
            Err(e) => {
                self.history.push_undo(memento);
                Err(e)
            }
        }
    }

    /// Re-apply the most recently undone action and move it back to the
    /// undo stack. A failing record stays on top of the redo stack, as with
    /// `undo`.
    pub fn redo(&mut self) -> Result<Outcome, ListError> {
        let mut memento = self.history.pop_redo().ok_or(ListError::NothingToRedo)?;
        match self.apply_forward(&mut memento) {
            Ok(description) => {
                debug!(action = %memento.action, description = %description, "redo");
                let outcome = Outcome {
                    direction: Direction::Redo,
                    action: memento.action,
                    description,
                };
                self.history.push_undo(memento);
                Ok(outcome)
            }
            Err(e) => {
                self.history.push_redo(memento);
                Err(e)
            }
        }
    }

    /// Apply the inverse of a record (for undo). Returns the description of
    /// the affected task. Must not mutate anything when it fails.
    fn apply_inverse(&mut self, memento: &mut Memento) -> Result<String, ListError> {
        match (memento.action, self.lookup) {
            // add -> remove the last task, whichever it is
            (Action::Add, LookupMode::Description) => {
                let task = self.tasks.pop().ok_or(ListError::EmptyList)?;
                Ok(task.description)
            }
            (Action::Add, LookupMode::Id) => {
                let pos = self.require_position(&memento.snapshot)?;
                Ok(self.tasks.remove(pos).description)
            }
            // mark_completed -> the last task with the same description goes
            // back to pending
            (Action::MarkCompleted, LookupMode::Description) => {
                let description = &memento.snapshot.description;
                let pos = self
                    .tasks
                    .iter()
                    .rposition(|t| &t.description == description)
                    .ok_or_else(|| ListError::NotFound(description.clone()))?;
                self.tasks[pos].mark_pending();
                Ok(self.tasks[pos].description.clone())
            }
            (Action::MarkCompleted, LookupMode::Id) => {
                let pos = self.require_position(&memento.snapshot)?;
                self.tasks[pos].mark_pending();
                Ok(self.tasks[pos].description.clone())
            }
            // delete -> put the snapshot back
            (Action::Delete, LookupMode::Description) => {
                let end = self.tasks.len();
                self.restore(end, &mut memento.snapshot);
                Ok(memento.snapshot.description.clone())
            }
            (Action::Delete, LookupMode::Id) => {
                let at = memento.index.min(self.tasks.len());
                self.restore(at, &mut memento.snapshot);
                Ok(memento.snapshot.description.clone())
            }
        }
    }

    /// Apply a record forward again (for redo). Same contract as
    /// `apply_inverse`.
    fn apply_forward(&mut self, memento: &mut Memento) -> Result<String, ListError> {
        match memento.action {
            Action::Add => {
                let at = match self.lookup {
                    LookupMode::Description => self.tasks.len(),
                    LookupMode::Id => memento.index.min(self.tasks.len()),
                };
                self.restore(at, &mut memento.snapshot);
                memento.index = at;
                Ok(memento.snapshot.description.clone())
            }
            // Targets the snapshot's own task object, not a description match.
            // In description mode a task that is no longer live only updates
            // the snapshot.
            Action::MarkCompleted => {
                match self.position_of(memento.snapshot.id) {
                    Some(pos) => self.tasks[pos].mark_completed(),
                    None if self.lookup == LookupMode::Id => {
                        return Err(ListError::NotFound(memento.snapshot.description.clone()));
                    }
                    None => {}
                }
                memento.snapshot.mark_completed();
                Ok(memento.snapshot.description.clone())
            }
            Action::Delete => {
                let pos = self.require_position(&memento.snapshot)?;
                memento.snapshot = self.tasks.remove(pos);
                memento.index = pos;
                Ok(memento.snapshot.description.clone())
            }
        }
    }

    /// Insert a snapshot back into the list at `at`.
    ///
    /// If its object is still live the copy becomes a new object, and the
    /// snapshot takes the new id so later records follow the copy.
    fn restore(&mut self, at: usize, snapshot: &mut Task) {
        if self.position_of(snapshot.id).is_some() {
            snapshot.id = self.next_id();
        }
        self.tasks.insert(at, snapshot.clone());
    }

    fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn require_position(&self, snapshot: &Task) -> Result<usize, ListError> {
        self.position_of(snapshot.id)
            .ok_or_else(|| ListError::NotFound(snapshot.description.clone()))
    }

    fn next_id(&mut self) -> TaskId {
        self.last_id += 1;
        TaskId(self.last_id)
    }
}
