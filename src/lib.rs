//! todo - To-Do List Manager Library
//!
//! A single-user task list persisted to a flat text file, one task per line.
//!
//! # Core Concepts
//!
//! - **Task**: id, description, deadline, and a Pending/Completed status
//! - **Tasks file**: the canonical copy of every task, rewritten whole on each change
//! - **Repository**: add, edit, delete, and complete operations that save and
//!   then reload, so the in-memory list always matches the file
//! - **View**: pending and completed tasks, each sorted by deadline
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface and interactive menu
//! - `config`: Configuration loading from `todo.toml`
//! - `error`: Error types and result aliases
//! - `output`: Terminal and JSON rendering
//! - `repository`: CRUD operations over a loaded task list
//! - `storage`: Tasks file reading and atomic writing
//! - `task`: Task record, status, and field validation
//! - `view`: Deadline-sorted pending/completed projection

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod repository;
pub mod storage;
pub mod task;
pub mod view;

pub use error::{Error, Result};
