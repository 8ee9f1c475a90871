//! Configuration loading and management
//!
//! Handles parsing of `todo.toml` and resolving where the tasks file lives.
//! By default both files sit next to the executable, so one installation
//! always uses the same task list whatever the working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::TASKS_FILE;

/// Default config file name, looked up next to the executable
pub const CONFIG_FILE: &str = "todo.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tasks file location; relative paths resolve against the config file's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<PathBuf>,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Terminal display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

impl Config {
    /// Load configuration from a `todo.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            Error::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate()?;

        if let Some(tasks_file) = config.tasks_file.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.tasks_file = Some(if tasks_file.is_relative() {
                base.join(tasks_file)
            } else {
                tasks_file
            });
        }
        Ok(config)
    }

    /// Load configuration from `path` if it exists, or return defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Pick the tasks file: explicit override, then config, then `tasks.txt` in `install_dir`
    pub fn tasks_file(&self, explicit: Option<&Path>, install_dir: &Path) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        self.tasks_file
            .clone()
            .unwrap_or_else(|| install_dir.join(TASKS_FILE))
    }

    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.tasks_file {
            if path.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "tasks_file cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Directory containing the running executable
pub fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::InvalidConfig(format!("executable has no parent directory: {}", exe.display()))
    })
}
