//! Class-linked assignment records fetched from the hosted backend.
//!
//! # Invariants
//! - Status is one of exactly three states; anything else fails to decode.
//! - Records are read-through: core never stores them, it only renders them
//!   and forwards status updates by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Board column an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Todo,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 3] = [Self::Todo, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Checkbox semantics: completed goes back to todo, anything else completes.
    pub fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::Todo,
            Self::Todo | Self::InProgress => Self::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentPriority {
    High,
    Medium,
    Low,
}

impl AssignmentPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Class a record belongs to, as joined by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRef {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ClassRef {
    /// Short badge text: the course code, else the class name.
    pub fn badge(&self) -> &str {
        self.code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(self.name.as_str())
    }
}

/// One class todo row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAssignment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: AssignmentStatus,
    pub priority: AssignmentPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, rename = "classes")]
    pub class: Option<ClassRef>,
}
