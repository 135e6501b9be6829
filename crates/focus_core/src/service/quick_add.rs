//! Single-line task entry.
//!
//! # Contract
//! - Whitespace-only input is rejected before the store is touched.
//! - A `today`/`tomorrow` keyword becomes the due date and leaves the label.
//! - New tasks start open with priority `p4`.

use crate::clock::Clock;
use crate::model::task::{NewTask, Priority, TaskId};
use crate::parse::date_intent::parse_date_intent;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::task_store::TaskStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAddError {
    EmptyInput,
}

impl Display for QuickAddError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "task text cannot be empty"),
        }
    }
}

impl Error for QuickAddError {}

/// Builds the [`NewTask`] that `raw` describes.
pub fn compose_task(raw: &str, clock: &dyn Clock) -> Result<NewTask, QuickAddError> {
    if raw.trim().is_empty() {
        return Err(QuickAddError::EmptyInput);
    }

    let intent = parse_date_intent(raw, clock);
    Ok(NewTask {
        text: intent.display_text(raw),
        completed: false,
        due_date: intent.due_date,
        priority: Some(Priority::P4),
        source: None,
    })
}

/// Parses `raw` and adds the resulting task to `store`.
pub fn quick_add<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    raw: &str,
    clock: &dyn Clock,
) -> Result<TaskId, QuickAddError> {
    let new = compose_task(raw, clock)?;
    Ok(store.add_task(new))
}
