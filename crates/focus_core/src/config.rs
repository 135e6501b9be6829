//! Runtime configuration shared by every shell.
//!
//! # Invariants
//! - `data_dir` is absolute; database and logs live underneath it.
//! - `tasks_key` is never empty.

use crate::logging::default_log_level;
use crate::service::task_store::DEFAULT_TASKS_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "focus.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeDataDir(PathBuf),
    EmptyTasksKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeDataDir(path) => {
                write!(f, "data_dir must be absolute, got `{}`", path.display())
            }
            Self::EmptyTasksKey => write!(f, "tasks_key cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub tasks_key: String,
}

impl CoreConfig {
    /// Defaults rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data_dir.is_absolute() {
            return Err(ConfigError::RelativeDataDir(self.data_dir.clone()));
        }
        if self.tasks_key.trim().is_empty() {
            return Err(ConfigError::EmptyTasksKey);
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}
