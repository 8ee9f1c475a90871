//! Error types for todo
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad date, unknown task id, bad input, bad config)
//! - 4: Operation failed (corrupt tasks file, I/O failure)

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

/// Exit codes for the todo CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for todo operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid date format '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Date cannot be in the past: {0}")]
    PastDeadline(NaiveDate),

    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task not found: {0}")]
    TaskNotFound(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // Operation failures (exit code 4)
    #[error("Malformed task on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Duplicate task id {0} in tasks file")]
    DuplicateId(u32),

    #[error("Task ids exhausted: {0} is the largest id")]
    IdsExhausted(u32),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Tasks file is not valid UTF-8: {0}")]
    InvalidEncoding(PathBuf),

    #[error("File path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidDate(_)
            | Error::PastDeadline(_)
            | Error::InvalidDescription(_)
            | Error::InvalidInput(_)
            | Error::TaskNotFound(_)
            | Error::InvalidConfig(_)
            | Error::TomlParse(_) => exit_codes::USER_ERROR,

            Error::MalformedLine { .. }
            | Error::DuplicateId(_)
            | Error::IdsExhausted(_)
            | Error::PermissionDenied(_)
            | Error::InvalidEncoding(_)
            | Error::PathNotFound(_)
            | Error::Io(_)
            | Error::Json(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// True for errors raised by deadline/description validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidDate(_) | Error::PastDeadline(_) | Error::InvalidDescription(_)
        )
    }

    /// Short machine-readable category
    pub fn kind(&self) -> &'static str {
        if self.is_validation() {
            return "validation";
        }
        match self {
            Error::TaskNotFound(_) => "not_found",
            Error::MalformedLine { .. }
            | Error::DuplicateId(_)
            | Error::IdsExhausted(_)
            | Error::InvalidEncoding(_) => "corrupt_file",
            _ if self.exit_code() == exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        }
    }

    /// Suggested next step, if there is an obvious one
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::TaskNotFound(_) => Some("todo list".to_string()),
            Error::InvalidDate(_) | Error::PastDeadline(_) => {
                Some("use a YYYY-MM-DD date from today onwards".to_string())
            }
            Error::MalformedLine { .. }
            | Error::DuplicateId(_)
            | Error::IdsExhausted(_)
            | Error::InvalidEncoding(_) => {
                Some("fix the tasks file by hand, or point --file elsewhere".to_string())
            }
            Error::InvalidConfig(_) | Error::TomlParse(_) => {
                Some("fix todo.toml then retry".to_string())
            }
            Error::PermissionDenied(path) => {
                Some(format!("check the permissions of {}", path.display()))
            }
            Error::PathNotFound(path) => Some(format!(
                "check that {} exists",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string())
            )),
            _ => None,
        }
    }

    /// Map an I/O error from writing `path` onto the save error categories
    pub(crate) fn from_write(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Error::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Error::PathNotFound(path.to_path_buf()),
            _ => Error::Io(err),
        }
    }

    /// Map an I/O error from reading `path`; a missing file is handled by the caller
    pub(crate) fn from_read(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Error::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::InvalidData => Error::InvalidEncoding(path.to_path_buf()),
            _ => Error::Io(err),
        }
    }
}

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error body of the JSON output envelope
#[derive(serde::Serialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            hint: err.hint(),
        }
    }
}
