//! Shared output formatting for todo commands.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use serde::Serialize;

use crate::error::{Error, JsonError, Result};
use crate::task::{Task, DEADLINE_FORMAT};
use crate::view::TaskView;

pub const SCHEMA_VERSION: &str = "todo.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub color: bool,
}

/// Applies terminal colors when enabled, passes text through otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, fg: Color) -> String {
        if self.color {
            text.with(fg).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn banner(&self, text: &str) -> String {
        if self.color {
            text.on(Color::Magenta).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn menu(&self, text: &str) -> String {
        self.paint(text, Color::Magenta)
    }

    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, Color::Blue)
    }

    pub fn ok(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Color::DarkYellow)
    }

    pub fn pending(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    pub fn completed(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }
}

fn task_line(task: &Task) -> String {
    format!(
        "{}. {} - Deadline: {}",
        task.id,
        task.description,
        task.deadline.format(DEADLINE_FORMAT)
    )
}

/// Write the pending/completed listing.
pub fn write_view(out: &mut dyn Write, view: &TaskView, palette: Palette) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", palette.banner("📝 To-Do List:"))?;

    writeln!(out, "{}", palette.banner("[Pending]"))?;
    if view.pending.is_empty() {
        writeln!(out, "{}", palette.error("❌ No pending tasks."))?;
    }
    for task in &view.pending {
        writeln!(out, "{}", palette.pending(&task_line(task)))?;
    }

    writeln!(out)?;
    writeln!(out, "{}", palette.banner("[Completed]"))?;
    if view.completed.is_empty() {
        writeln!(out, "{}", palette.error("❌ No completed tasks."))?;
    }
    for task in &view.completed {
        writeln!(out, "{}", palette.completed(&task_line(task)))?;
    }
    writeln!(out)
}

pub fn write_success(out: &mut dyn Write, message: &str, palette: Palette) -> io::Result<()> {
    writeln!(out, "{}", palette.ok(&format!("✅ {message}")))
}

/// Write a recoverable error as a one-line message.
pub fn write_failure(out: &mut dyn Write, err: &Error, palette: Palette) -> io::Result<()> {
    writeln!(out, "{}", palette.error(&format!("❌ {err}")))
}

pub fn write_missing_file(
    out: &mut dyn Write,
    path: &std::path::Path,
    palette: Palette,
) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        palette.warning(&format!(
            "⚠ Tasks file not found: {} (it will be created on first save)",
            path.display()
        ))
    )
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: &str,
) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!("{human}");
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let body = JsonError::from(err);
    if json {
        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: JsonError,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: body,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {}", body.message);
    if let Some(hint) = body.hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn infer_command_name_from_args() -> String {
    std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with('-'))
        .filter(|arg| matches!(arg.as_str(), "add" | "list" | "edit" | "delete" | "done"))
        .unwrap_or_else(|| "todo".to_string())
}
