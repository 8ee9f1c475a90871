//! Interactive menu loop.
//!
//! Reads choices and field values line by line from any `BufRead`, so the
//! loop can be driven from a terminal or from a test buffer. Operation
//! errors are reported and the loop carries on with the previous task list;
//! only I/O failures on the terminal itself end the session early.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::output::{write_failure, write_missing_file, write_success, write_view, Palette};
use crate::repository::{find_by_id, TaskRepository};
use crate::task::Task;

const MENU_ITEMS: [&str; 6] = [
    "1. Add Task",
    "2. View Tasks",
    "3. Edit Task",
    "4. Delete Task",
    "5. Mark Task as completed",
    "6. Exit",
];

enum Flow {
    Continue,
    Quit,
}

/// Run the menu until the user exits or input ends.
pub fn run(
    repo: &TaskRepository,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    palette: Palette,
) -> Result<()> {
    let loaded = repo.load()?;
    if loaded.missing {
        write_missing_file(output, repo.store().path(), palette)?;
    }

    let mut session = Session {
        repo,
        tasks: loaded.tasks,
        input,
        output,
        palette,
    };
    session.run()
}

struct Session<'a> {
    repo: &'a TaskRepository,
    tasks: Vec<Task>,
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    palette: Palette,
}

impl Session<'_> {
    fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.ask("Enter your choice: ")? else {
                return self.goodbye();
            };

            let flow = match choice.trim() {
                "1" => self.add()?,
                "2" => self.view()?,
                "3" => self.edit()?,
                "4" => self.delete()?,
                "5" => self.complete()?,
                "6" => Flow::Quit,
                _ => {
                    let message = self.palette.error("❌ Invalid choice. Please try again.");
                    writeln!(self.output, "{message}")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                return self.goodbye();
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        let banner = self.palette.banner("📝 Welcome to To-Do List Manager! ✅");
        writeln!(self.output, "{banner}")?;
        for item in MENU_ITEMS {
            writeln!(self.output, "{}", self.palette.menu(item))?;
        }
        Ok(())
    }

    fn goodbye(&mut self) -> Result<()> {
        let message = self.palette.ok("Exiting To-Do List Manager. Goodbye! 👋");
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Prompt and read one line; `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", self.palette.prompt(prompt))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Prompt for a task id. A non-numeric answer is reported and yields `Ok(Some(None))`.
    fn ask_id(&mut self, prompt: &str) -> Result<Option<Option<u32>>> {
        let Some(text) = self.ask(prompt)? else {
            return Ok(None);
        };
        match text.trim().parse::<u32>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                let err = Error::InvalidInput(format!("'{}' is not a task id", text.trim()));
                write_failure(self.output, &err, self.palette)?;
                Ok(Some(None))
            }
        }
    }

    /// Apply an operation result: adopt the reloaded list or report the error.
    fn settle(&mut self, result: Result<Vec<Task>>, done: &str) -> Result<()> {
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                let saved = format!(
                    "Tasks saved successfully to: {}",
                    self.repo.store().path().display()
                );
                write_success(self.output, &saved, self.palette)?;
                write_success(self.output, done, self.palette)?;
            }
            Err(err) => {
                tracing::debug!(error = %err, "operation rejected");
                write_failure(self.output, &err, self.palette)?;
            }
        }
        Ok(())
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(description) = self.ask("📑 Enter task description: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(deadline) = self.ask("📆 Enter deadline (YYYY-MM-DD): ")? else {
            return Ok(Flow::Quit);
        };

        let result = self.repo.add(&self.tasks, &description, &deadline);
        self.settle(result, "Task added successfully!")?;
        Ok(Flow::Continue)
    }

    fn view(&mut self) -> Result<Flow> {
        let view = self.repo.list_view(&self.tasks);
        write_view(self.output, &view, self.palette)?;
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> Result<Flow> {
        self.view()?;
        let Some(id) = self.ask_id("Enter task id to edit: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(id) = id else {
            return Ok(Flow::Continue);
        };

        if find_by_id(&self.tasks, id).is_none() {
            write_failure(self.output, &Error::TaskNotFound(id), self.palette)?;
            return Ok(Flow::Continue);
        }

        let Some(description) = self.ask("🆕 Enter new description: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(deadline) = self.ask("🆕 Enter new task deadline (YYYY-MM-DD): ")? else {
            return Ok(Flow::Quit);
        };

        let result = self.repo.edit(&self.tasks, id, &description, &deadline);
        self.settle(result, "Task updated successfully")?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        self.view()?;
        let Some(id) = self.ask_id("Enter task id to delete: ")? else {
            return Ok(Flow::Quit);
        };
        if let Some(id) = id {
            let result = self.repo.delete(&self.tasks, id);
            self.settle(result, "Task deleted successfully")?;
        }
        Ok(Flow::Continue)
    }

    fn complete(&mut self) -> Result<Flow> {
        self.view()?;
        let Some(id) = self.ask_id("Enter task id to mark as completed: ")? else {
            return Ok(Flow::Quit);
        };
        if let Some(id) = id {
            let result = self.repo.mark_completed(&self.tasks, id);
            self.settle(result, "Task marked as completed!")?;
        }
        Ok(Flow::Continue)
    }
}
