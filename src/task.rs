//! Task records for todo.
//!
//! A task is one line of the tasks file:
//!
//! ```text
//! <id>,<description>,<deadline YYYY-MM-DD>,<Pending|Completed>
//! ```
//!
//! The format has no quoting, so descriptions may not contain commas or
//! line breaks.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used for deadlines, both on disk and at the prompt
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

const FIELD_DELIM: char = ',';
const FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(TaskStatus::Pending),
            "Completed" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub description: String,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
}

impl Task {
    /// Build a new pending task, validating description and deadline against `today`.
    pub fn new(id: u32, description: &str, deadline: &str, today: NaiveDate) -> Result<Self> {
        validate_description(description)?;
        let deadline = validate_deadline(deadline, today)?;
        Ok(Self {
            id,
            description: description.to_string(),
            deadline,
            status: TaskStatus::Pending,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Render the task as a tasks-file line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{}{FIELD_DELIM}{}{FIELD_DELIM}{}{FIELD_DELIM}{}",
            self.id,
            self.description,
            self.deadline.format(DEADLINE_FORMAT),
            self.status
        )
    }

    /// Parse one trimmed, non-empty tasks-file line.
    ///
    /// The line is split on the first three commas only. The deadline is
    /// parsed but not checked against the current date.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedLine {
            line: line_no,
            reason,
        };

        let fields: Vec<&str> = line.splitn(FIELD_COUNT, FIELD_DELIM).collect();
        if fields.len() != FIELD_COUNT {
            return Err(malformed(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        let id = fields[0]
            .parse::<u32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| malformed(format!("invalid task id '{}'", fields[0])))?;
        let deadline = parse_deadline(fields[2])
            .map_err(|_| malformed(format!("invalid deadline '{}'", fields[2])))?;
        let status = fields[3].parse::<TaskStatus>().map_err(malformed)?;

        Ok(Self {
            id,
            description: fields[1].to_string(),
            deadline,
            status,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_deadline(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DEADLINE_FORMAT)
        .map_err(|_| Error::InvalidDate(text.to_string()))
}

/// Parse a deadline and reject dates before `today`.
pub fn validate_deadline(text: &str, today: NaiveDate) -> Result<NaiveDate> {
    let deadline = parse_deadline(text)?;
    if deadline < today {
        return Err(Error::PastDeadline(deadline));
    }
    Ok(deadline)
}

/// Reject descriptions that would break the line format.
pub fn validate_description(description: &str) -> Result<()> {
    if description.contains(FIELD_DELIM) {
        return Err(Error::InvalidDescription(
            "description cannot contain ','".to_string(),
        ));
    }
    if description.contains(['\n', '\r']) {
        return Err(Error::InvalidDescription(
            "description cannot contain line breaks".to_string(),
        ));
    }
    Ok(())
}
