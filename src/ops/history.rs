use std::fmt;

use crate::model::config::HistoryConfig;
use crate::model::task::Task;

/// Kind of mutation a history record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    MarkCompleted,
    Delete,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::MarkCompleted => "mark_completed",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded action together with a copy of the task it touched.
///
/// The snapshot reflects the task right after the action was applied and
/// keeps the task's id, so it still names the same object once the live
/// task is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memento {
    pub action: Action,
    pub snapshot: Task,
    /// List position of the task when the action was applied
    pub index: usize,
}

impl Memento {
    pub fn new(action: Action, snapshot: Task, index: usize) -> Self {
        Memento {
            action,
            snapshot,
            index,
        }
    }
}

/// The undo and redo stacks, most recent record last.
///
/// Only moves records around. Applying a record to the task list is the
/// job of `TodoList`.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Memento>,
    redo: Vec<Memento>,
    /// Maximum undo depth, 0 = unbounded
    limit: usize,
    clear_redo_on_record: bool,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        History {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: config.limit,
            clear_redo_on_record: config.clear_redo_on_action,
        }
    }

    /// Record a new mutation. The redo stack survives unless configured
    /// otherwise.
    pub fn record(&mut self, memento: Memento) {
        self.push_undo(memento);
        if self.clear_redo_on_record {
            self.redo.clear();
        }
    }

    /// Push onto the undo stack without touching the redo stack
    pub fn push_undo(&mut self, memento: Memento) {
        self.undo.push(memento);
        if self.limit > 0 && self.undo.len() > self.limit {
            self.undo.drain(..self.undo.len() - self.limit);
        }
    }

    pub fn push_redo(&mut self, memento: Memento) {
        self.redo.push(memento);
    }

    pub fn pop_undo(&mut self) -> Option<Memento> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<Memento> {
        self.redo.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn peek_undo(&self) -> Option<&Memento> {
        self.undo.last()
    }

    pub fn peek_redo(&self) -> Option<&Memento> {
        self.redo.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskId;

    fn memento(action: Action, description: &str, id: u64) -> Memento {
        let mut task = Task::new(description);
        task.id = TaskId(id);
        Memento::new(action, task, 0)
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.peek_undo().is_none());
        assert!(history.peek_redo().is_none());
    }

    #[test]
    fn record_pushes_onto_undo() {
        let mut history = History::new();
        history.record(memento(Action::Add, "A", 1));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.peek_undo().unwrap().snapshot.description, "A");
    }

    #[test]
    fn pops_are_last_in_first_out() {
        let mut history = History::new();
        history.record(memento(Action::Add, "A", 1));
        history.record(memento(Action::Delete, "B", 2));
        assert_eq!(history.pop_undo().unwrap().action, Action::Delete);
        assert_eq!(history.pop_undo().unwrap().action, Action::Add);
        assert!(history.pop_undo().is_none());
    }

    #[test]
    fn record_keeps_redo_by_default() {
        let mut history = History::new();
        history.push_redo(memento(Action::Add, "A", 1));
        history.record(memento(Action::Add, "B", 2));
        assert!(history.can_redo());
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn record_clears_redo_when_configured() {
        let mut history = History::with_config(&HistoryConfig {
            clear_redo_on_action: true,
            ..HistoryConfig::default()
        });
        history.push_redo(memento(Action::Add, "A", 1));
        history.record(memento(Action::Add, "B", 2));
        assert!(!history.can_redo());
    }

    #[test]
    fn push_undo_never_clears_redo() {
        let mut history = History::with_config(&HistoryConfig {
            clear_redo_on_action: true,
            ..HistoryConfig::default()
        });
        history.push_redo(memento(Action::Add, "A", 1));
        history.push_undo(memento(Action::Add, "B", 2));
        assert!(history.can_redo());
    }

    #[test]
    fn limit_drops_oldest_records() {
        let mut history = History::with_config(&HistoryConfig {
            limit: 3,
            ..HistoryConfig::default()
        });
        for i in 1..=5 {
            history.record(memento(Action::Add, &format!("T{}", i), i));
        }
        assert_eq!(history.undo_len(), 3);
        let order: Vec<String> = std::iter::from_fn(|| history.pop_undo())
            .map(|m| m.snapshot.description)
            .collect();
        assert_eq!(order, vec!["T5", "T4", "T3"]);
    }

    #[test]
    fn zero_limit_is_unbounded() {
        let mut history = History::new();
        for i in 0..1000 {
            history.record(memento(Action::MarkCompleted, "T", i));
        }
        assert_eq!(history.undo_len(), 1000);
    }

    #[test]
    fn action_names() {
        assert_eq!(Action::Add.to_string(), "add");
        assert_eq!(Action::MarkCompleted.to_string(), "mark_completed");
        assert_eq!(Action::Delete.to_string(), "delete");
    }
}
