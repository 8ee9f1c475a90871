//! Command-line interface for todo
//!
//! With no subcommand the interactive menu runs; the subcommands expose the
//! same operations for one-shot use.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{self, Config, CONFIG_FILE};
use crate::error::Result;
use crate::output::{OutputOptions, Palette};
use crate::repository::TaskRepository;
use crate::storage::TaskStore;

mod commands;
pub mod menu;

/// todo - To-Do List Manager
///
/// Keeps a personal task list in a plain text file next to the program.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Tasks file (defaults to tasks.txt next to the executable)
    #[arg(long, global = true, env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Config file (defaults to todo.toml next to the executable)
    #[arg(long, global = true, env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new pending task
    Add {
        /// Task description (no commas)
        description: String,

        /// Deadline in YYYY-MM-DD form, today or later
        deadline: String,
    },

    /// Show pending and completed tasks sorted by deadline
    List,

    /// Change a task's description and deadline
    Edit {
        /// Task id
        id: u32,

        /// New description (no commas)
        description: String,

        /// New deadline in YYYY-MM-DD form
        deadline: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: u32,
    },

    /// Mark a task as completed
    Done {
        /// Task id
        id: u32,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let install_dir = config::install_dir()?;
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(&install_dir.join(CONFIG_FILE))?,
        };

        let tasks_file = config.tasks_file(self.file.as_deref(), &install_dir);
        tracing::debug!(path = %tasks_file.display(), "using tasks file");

        let repo = TaskRepository::new(TaskStore::new(tasks_file));
        let options = OutputOptions {
            json: self.json,
            color: config.display.color && !self.no_color,
        };

        match self.command {
            None => {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                menu::run(
                    &repo,
                    &mut stdin.lock(),
                    &mut stdout.lock(),
                    Palette::new(options.color),
                )
            }
            Some(Commands::Add {
                description,
                deadline,
            }) => commands::run_add(&repo, options, &description, &deadline),
            Some(Commands::List) => commands::run_list(&repo, options),
            Some(Commands::Edit {
                id,
                description,
                deadline,
            }) => commands::run_edit(&repo, options, id, &description, &deadline),
            Some(Commands::Delete { id }) => commands::run_delete(&repo, options, id),
            Some(Commands::Done { id }) => commands::run_done(&repo, options, id),
        }
    }
}
