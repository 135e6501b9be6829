//! Authoritative task collection with a persisted mirror.
//!
//! # Responsibility
//! - Own the in-memory task list for one logical list.
//! - Write a full snapshot to the injected [`KeyValueStore`] after every
//!   state change.
//!
//! # Invariants
//! - Ids are unique among live tasks.
//! - Unknown ids are a silent no-op and cause no write.
//! - A failed write never rolls back the in-memory change. The failure is
//!   logged and kept until the next successful write or [`TaskStore::flush`].
//! - Absent or unreadable persisted state opens as an empty list. Invalid
//!   tasks inside a readable record are dropped one by one.

use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use crate::service::snapshot::{decode_tasks, encode_tasks};
use crate::view::grouping::TaskCounts;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record name used when callers do not pick one.
pub const DEFAULT_TASKS_KEY: &str = "todoist-tasks-storage";

#[derive(Debug)]
pub enum StoreError {
    Persist(RepoError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "failed to persist tasks: {err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
    persist_error: Option<StoreError>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the list stored under `key`.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = load_tasks(&storage, &key);
        info!(
            "event=store_open module=store status=ok task_count={}",
            tasks.len()
        );
        Self {
            storage,
            key,
            tasks,
            persist_error: None,
        }
    }

    /// Loads the list stored under [`DEFAULT_TASKS_KEY`].
    pub fn open_default(storage: S) -> Self {
        Self::open(storage, DEFAULT_TASKS_KEY)
    }

    /// Appends a task built from `new` and returns its fresh id.
    ///
    /// The store does not validate `new.text`; input validation belongs to
    /// callers such as [`crate::quick_add`].
    pub fn add_task(&mut self, new: NewTask) -> TaskId {
        let id = self.fresh_id(TaskId::generate);
        self.tasks.push(Task::from_new(id.clone(), new));
        debug!(
            "event=task_add module=store status=ok task_count={}",
            self.tasks.len()
        );
        self.persist();
        id
    }

    /// Flips `completed` on the matching task. Returns `false` when no task
    /// has `id`.
    pub fn toggle_task(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("event=task_toggle module=store status=miss");
            return false;
        };
        task.toggle();
        debug!(
            "event=task_toggle module=store status=ok completed={}",
            task.completed
        );
        self.persist();
        true
    }

    /// Removes the matching task permanently. Returns `false` on a miss.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_delete module=store status=miss");
            return false;
        }
        debug!(
            "event=task_delete module=store status=ok task_count={}",
            self.tasks.len()
        );
        self.persist();
        true
    }

    /// Drops every completed task and returns how many went away.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            debug!(
                "event=task_clear_completed module=store status=ok removed={}",
                removed
            );
            self.persist();
        }
        removed
    }

    /// Deletes the persisted record, then empties the list.
    ///
    /// A failed delete leaves memory untouched so both sides still agree.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        if let Err(err) = self.storage.remove(&self.key) {
            error!("event=store_reset module=store status=error error={}", err);
            return Err(err.into());
        }
        self.tasks.clear();
        self.persist_error = None;
        info!("event=store_reset module=store status=ok");
        Ok(())
    }

    /// Retries the snapshot write and reports the outcome.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let result = self.write_snapshot();
        match result {
            Ok(()) => {
                self.persist_error = None;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_flush module=store status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.tasks)
    }

    /// Most recent write failure not yet superseded by a successful write.
    pub fn persist_error(&self) -> Option<&StoreError> {
        self.persist_error.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    fn fresh_id(&self, mut generate: impl FnMut() -> TaskId) -> TaskId {
        loop {
            let id = generate();
            if self.get(&id).is_none() {
                return id;
            }
            warn!("event=task_add module=store status=retry reason=id_collision");
        }
    }

    fn persist(&mut self) {
        match self.write_snapshot() {
            Ok(()) => self.persist_error = None,
            Err(err) => {
                error!(
                    "event=store_persist module=store status=error task_count={} error={}",
                    self.tasks.len(),
                    err
                );
                self.persist_error = Some(err);
            }
        }
    }

    fn write_snapshot(&self) -> Result<(), StoreError> {
        let encoded = encode_tasks(&self.tasks)?;
        self.storage.set(&self.key, &encoded)?;
        Ok(())
    }
}

fn load_tasks(storage: &impl KeyValueStore, key: &str) -> Vec<Task> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded reason=read_failed error={}",
                err
            );
            return Vec::new();
        }
    };

    match decode_tasks(&raw) {
        Ok(decoded) => {
            if !decoded.is_lossless() {
                warn!(
                    "event=store_load module=store status=degraded reason=invalid_tasks dropped_tasks={} dropped_fields={}",
                    decoded.dropped_tasks, decoded.dropped_fields
                );
            }
            dedupe_ids(decoded.tasks)
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded reason=malformed error={}",
                err
            );
            Vec::new()
        }
    }
}

// A hand-edited or merged record can repeat an id; the first occurrence wins.
fn dedupe_ids(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = std::collections::HashSet::new();
    let before = tasks.len();
    let unique: Vec<Task> = tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect();
    if unique.len() != before {
        warn!(
            "event=store_load module=store status=degraded reason=duplicate_ids dropped={}",
            before - unique.len()
        );
    }
    unique
}
