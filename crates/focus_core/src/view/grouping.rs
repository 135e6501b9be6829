//! Date-bucketed presentation of a task list.
//!
//! # Invariants
//! - Completed tasks always land in `Completed`, whatever their due date.
//! - Buckets order as: dated (ascending), `NoDate`, `Completed`.
//! - Tasks keep insertion order within a bucket; empty buckets are never
//!   emitted.

use crate::clock::Clock;
use crate::model::task::Task;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Bucket a task is displayed under.
///
/// Variant order is the display order, so the derived `Ord` sorts buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    Date(NaiveDate),
    NoDate,
    Completed,
}

impl BucketKey {
    /// `YYYY-MM-DD`, `no-date` or `completed`.
    pub fn as_key(&self) -> String {
        match self {
            Self::Date(day) => day.format(DATE_KEY_FORMAT).to_string(),
            Self::NoDate => "no-date".to_string(),
            Self::Completed => "completed".to_string(),
        }
    }

    /// Inverse of [`BucketKey::as_key`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "no-date" => Some(Self::NoDate),
            "completed" => Some(Self::Completed),
            other => NaiveDate::parse_from_str(other, DATE_KEY_FORMAT)
                .ok()
                .map(Self::Date),
        }
    }
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_key())
    }
}

/// Bucket for one task; the viewer's clock picks the day.
pub fn bucket_key(task: &Task, clock: &dyn Clock) -> BucketKey {
    if task.completed {
        return BucketKey::Completed;
    }
    match task.due_date {
        Some(due) => BucketKey::Date(clock.local_day(due)),
        None => BucketKey::NoDate,
    }
}

/// One non-empty bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup<'a> {
    pub key: BucketKey,
    pub tasks: Vec<&'a Task>,
}

/// Buckets `tasks` and returns the groups in display order.
pub fn group_tasks<'a>(tasks: &'a [Task], clock: &dyn Clock) -> Vec<TaskGroup<'a>> {
    let mut buckets: BTreeMap<BucketKey, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        buckets
            .entry(bucket_key(task, clock))
            .or_default()
            .push(task);
    }
    buckets
        .into_iter()
        .map(|(key, tasks)| TaskGroup { key, tasks })
        .collect()
}

/// Section heading for a bucket relative to `today`.
pub fn bucket_label(key: &BucketKey, today: NaiveDate) -> String {
    match key {
        BucketKey::Completed => "Completed".to_string(),
        BucketKey::NoDate => "No date".to_string(),
        BucketKey::Date(day) => {
            if *day == today {
                "Today".to_string()
            } else if Some(*day) == today.checked_add_days(Days::new(1)) {
                "Tomorrow".to_string()
            } else if Some(*day) == today.checked_sub_days(Days::new(1)) {
                "Yesterday".to_string()
            } else {
                day.format("%A, %b %-d").to_string()
            }
        }
    }
}

/// Short due marker shown next to an open task: `Today`, `Tomorrow` or
/// `Oct 21`.
pub fn due_badge(due: DateTime<Utc>, clock: &dyn Clock) -> String {
    let today = clock.today();
    let day = clock.local_day(due);
    if day == today {
        "Today".to_string()
    } else if Some(day) == today.checked_add_days(Days::new(1)) {
        "Tomorrow".to_string()
    } else {
        day.format("%b %-d").to_string()
    }
}

/// Active/completed tallies, recomputed on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            active: tasks.len() - completed,
            completed,
        }
    }

    pub fn total(&self) -> usize {
        self.active + self.completed
    }
}

/// Render-ready group: heading plus rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledGroup<'a> {
    pub key: BucketKey,
    pub label: String,
    pub tasks: Vec<&'a Task>,
}

/// Everything the quick task list draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView<'a> {
    pub groups: Vec<LabelledGroup<'a>>,
    pub counts: TaskCounts,
}

impl<'a> TaskListView<'a> {
    pub fn build(tasks: &'a [Task], clock: &dyn Clock) -> Self {
        let today = clock.today();
        let groups = group_tasks(tasks, clock)
            .into_iter()
            .map(|group| LabelledGroup {
                label: bucket_label(&group.key, today),
                key: group.key,
                tasks: group.tasks,
            })
            .collect();
        Self {
            groups,
            counts: TaskCounts::from_tasks(tasks),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
