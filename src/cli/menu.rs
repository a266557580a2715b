//! Numbered text menu over a `TodoList`.
//!
//! Reads one answer per line from any `BufRead` and writes prompts and
//! confirmations to any `Write`, so a session can be scripted. End of input
//! ends the session like choosing Quit.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::cli::output::{
    format_task_list, history_error_message, list_error_message, outcome_footer, outcome_message,
    tasks_to_json, validation_message,
};
use crate::model::task::Filter;
use crate::ops::manager::{ListError, Outcome, TodoList};

const MENU_TEXT: &str = "\nTo-Do List Manager Menu:
1. Add Task
2. Mark Task as Completed
3. Delete Task
4. View Tasks
5. Undo
6. Redo
7. Quit
";

const INVALID_INDEX: &str = "Invalid input. Please enter a valid integer index.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive menu session
pub struct Menu<R, W> {
    input: R,
    output: W,
    list: TodoList,
    json: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, list: TodoList) -> Self {
        Menu {
            input,
            output,
            list,
            json: false,
        }
    }

    /// Print "View Tasks" results as JSON
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn into_parts(self) -> (TodoList, W) {
        (self.list, self.output)
    }

    /// Loop until Quit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.output.write_all(MENU_TEXT.as_bytes())?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            if self.handle_choice(choice.as_str())? == Flow::Quit {
                break;
            }
        }
        self.output.flush()
    }

    fn handle_choice(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "1" => self.add_task()?,
            "2" => self.mark_completed()?,
            "3" => self.delete_task()?,
            "4" => self.view_tasks()?,
            "5" => {
                let result = self.list.undo();
                self.report_history(result)?;
            }
            "6" => {
                let result = self.list.redo();
                self.report_history(result)?;
            }
            "7" => {
                writeln!(self.output, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
            _ => writeln!(self.output, "Invalid choice. Please enter a valid option.")?,
        }
        Ok(Flow::Continue)
    }

    fn add_task(&mut self) -> io::Result<()> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(());
        };
        let Some(due) = self.prompt("Enter due date (optional, format: YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let due = (!due.is_empty()).then_some(due.as_str());
        let message = match self.list.add(&description, due) {
            Ok(task) => format!("Task '{}' added.", task.description),
            Err(e) => {
                debug!(error = %e, "add rejected");
                validation_message(&e)
            }
        };
        writeln!(self.output, "{}", message)
    }

    fn mark_completed(&mut self) -> io::Result<()> {
        let Some(index) =
            self.prompt_index("Enter the index (starting from 0) of the task to mark as completed: ")?
        else {
            return Ok(());
        };
        match self.list.mark_completed(index) {
            Ok(description) => {
                writeln!(self.output, "Task '{}' marked as completed.", description)
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn delete_task(&mut self) -> io::Result<()> {
        let Some(index) = self.prompt_index("Enter the index of the task to delete: ")? else {
            return Ok(());
        };
        match self.list.delete_task(index) {
            Ok(description) => writeln!(self.output, "Task '{}' deleted successfully", description),
            Err(e) => self.report_error(&e),
        }
    }

    fn view_tasks(&mut self) -> io::Result<()> {
        let Some(status) = self.prompt("Enter status (all/completed/pending): ")? else {
            return Ok(());
        };
        let tasks = match self.list.view_tasks(Filter::parse(&status)) {
            Ok(tasks) => tasks,
            Err(_) => return writeln!(self.output, "No tasks in list"),
        };
        if self.json {
            let json = tasks_to_json(&tasks).map_err(io::Error::other)?;
            writeln!(self.output, "{}", json)
        } else {
            self.output.write_all(format_task_list(&tasks).as_bytes())
        }
    }

    fn report_history(&mut self, result: Result<Outcome, ListError>) -> io::Result<()> {
        match result {
            Ok(outcome) => {
                writeln!(self.output, "{}", outcome_message(&outcome))?;
                writeln!(self.output, "{}", outcome_footer(outcome.direction))
            }
            Err(e) => {
                debug!(error = %e, "history step rejected");
                writeln!(self.output, "{}", history_error_message(&e))
            }
        }
    }

    fn report_error(&mut self, err: &ListError) -> io::Result<()> {
        debug!(error = %err, "operation rejected");
        writeln!(self.output, "{}", list_error_message(err))
    }

    /// Ask for a task index. `Ok(None)` on end of input or after reporting
    /// a non-integer answer. Negative numbers map to an index that is never
    /// in range.
    fn prompt_index(&mut self, text: &str) -> io::Result<Option<usize>> {
        let Some(answer) = self.prompt(text)? else {
            return Ok(None);
        };
        match answer.trim().parse::<i64>() {
            Ok(n) => Ok(Some(usize::try_from(n).unwrap_or(usize::MAX))),
            Err(_) => {
                writeln!(self.output, "{}", INVALID_INDEX)?;
                Ok(None)
            }
        }
    }

    /// Print `text` and read one line without its line ending.
    /// `Ok(None)` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
