//! Core domain logic for Focus.
//! This crate is the single source of truth for task invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod parse;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock, ZonedClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::assignment::{AssignmentPriority, AssignmentStatus, ClassRef, ExternalAssignment};
pub use model::session::{UserId, UserSession};
pub use model::task::{NewTask, Priority, Task, TaskId};
pub use parse::date_intent::{parse_date_intent, DateIntent};
pub use repo::class_todo_source::{ClassTodoSource, InMemoryClassTodoSource, SourceError};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::board_service::AssignmentBoardService;
pub use service::preferences::{load_home_page, save_home_page, HomePage};
pub use service::quick_add::{compose_task, quick_add, QuickAddError};
pub use service::task_store::{StoreError, TaskStore, DEFAULT_TASKS_KEY};
pub use view::board::{BoardCard, BoardColumn, BoardItem, CardOrigin, StatusBoard};
pub use view::due::{DueInfo, DueUrgency};
pub use view::grouping::{
    bucket_key, bucket_label, due_badge, group_tasks, BucketKey, LabelledGroup, TaskCounts,
    TaskGroup, TaskListView,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
