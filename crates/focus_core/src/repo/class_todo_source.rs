//! Class todo feed contract.
//!
//! # Responsibility
//! - Describe the two calls the board makes against the hosted backend:
//!   a per-user fetch and an update-by-id.
//! - Ship an in-memory implementation for offline use and tests.
//!
//! # Invariants
//! - `fetch_class_todos` returns only the given user's rows, ordered by
//!   `due_date` ascending with undated rows last.

use crate::model::assignment::{AssignmentStatus, ExternalAssignment};
use crate::model::session::UserId;
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    Unavailable(String),
    NotFound(String),
    NotExternal(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "class todo source unavailable: {message}"),
            Self::NotFound(id) => write!(f, "class todo not found: {id}"),
            Self::NotExternal(id) => write!(f, "item {id} is not a class todo"),
        }
    }
}

impl Error for SourceError {}

/// Hosted class todo table.
pub trait ClassTodoSource {
    fn fetch_class_todos(&self, user_id: &UserId) -> Result<Vec<ExternalAssignment>, SourceError>;
    fn update_status(&self, id: &str, status: AssignmentStatus) -> Result<(), SourceError>;
}

/// Rows held in process, keyed by owning user.
#[derive(Debug, Default)]
pub struct InMemoryClassTodoSource {
    rows: RefCell<Vec<(UserId, ExternalAssignment)>>,
    offline: Cell<bool>,
}

impl InMemoryClassTodoSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, owner: UserId, record: ExternalAssignment) {
        self.rows.borrow_mut().push((owner, record));
    }

    /// Makes every call fail with `Unavailable` while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn status_of(&self, id: &str) -> Option<AssignmentStatus> {
        self.rows
            .borrow()
            .iter()
            .find(|(_, record)| record.id == id)
            .map(|(_, record)| record.status)
    }

    fn ensure_online(&self) -> Result<(), SourceError> {
        if self.offline.get() {
            return Err(SourceError::Unavailable("network offline".to_string()));
        }
        Ok(())
    }
}

impl ClassTodoSource for InMemoryClassTodoSource {
    fn fetch_class_todos(&self, user_id: &UserId) -> Result<Vec<ExternalAssignment>, SourceError> {
        self.ensure_online()?;
        let mut records: Vec<ExternalAssignment> = self
            .rows
            .borrow()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, record)| record.clone())
            .collect();
        records.sort_by_key(|record| (record.due_date.is_none(), record.due_date));
        Ok(records)
    }

    fn update_status(&self, id: &str, status: AssignmentStatus) -> Result<(), SourceError> {
        self.ensure_online()?;
        let mut rows = self.rows.borrow_mut();
        let (_, record) = rows
            .iter_mut()
            .find(|(_, record)| record.id == id)
            .ok_or_else(|| SourceError::NotFound(id.to_string()))?;
        record.status = status;
        Ok(())
    }
}
