//! Three-column status board over local tasks and class todos.
//!
//! # Responsibility
//! - Normalize [`BoardItem`] variants into one [`BoardCard`] shape at the
//!   boundary, so columns never branch on record origin.
//!
//! # Invariants
//! - Columns are exactly To Do, In Progress, Completed, in that order.
//! - Within a column, class todos come first in fetched order, then local
//!   tasks in insertion order.

use crate::model::assignment::{AssignmentStatus, ExternalAssignment};
use crate::model::task::Task;
use crate::view::due::DueInfo;
use chrono::{DateTime, Utc};

/// A record the board can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardItem {
    Local(Task),
    External(ExternalAssignment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOrigin {
    Local,
    External,
}

/// Display shape shared by every board item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCard {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: AssignmentStatus,
    pub priority_label: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub class_label: Option<String>,
    pub class_color: Option<String>,
    pub origin: CardOrigin,
}

impl BoardCard {
    pub fn due_info(&self, now: DateTime<Utc>) -> Option<DueInfo> {
        self.due_date.map(|due| DueInfo::new(due, now))
    }

    pub fn is_external(&self) -> bool {
        self.origin == CardOrigin::External
    }
}

impl From<BoardItem> for BoardCard {
    fn from(item: BoardItem) -> Self {
        match item {
            BoardItem::Local(task) => Self {
                id: task.id.to_string(),
                status: if task.completed {
                    AssignmentStatus::Completed
                } else {
                    AssignmentStatus::Todo
                },
                title: task.text,
                description: None,
                priority_label: task.priority.map(|p| p.as_str().to_string()),
                due_date: task.due_date,
                class_label: task.source,
                class_color: None,
                origin: CardOrigin::Local,
            },
            BoardItem::External(record) => Self {
                class_label: record.class.as_ref().map(|class| class.badge().to_string()),
                class_color: record.class.and_then(|class| class.color),
                id: record.id,
                title: record.title,
                description: record.description,
                status: record.status,
                priority_label: Some(record.priority.as_str().to_string()),
                due_date: record.due_date,
                origin: CardOrigin::External,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: AssignmentStatus,
    pub cards: Vec<BoardCard>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBoard {
    columns: Vec<BoardColumn>,
}

impl StatusBoard {
    pub fn build(items: impl IntoIterator<Item = BoardItem>) -> Self {
        let mut external: Vec<BoardCard> = Vec::new();
        let mut local: Vec<BoardCard> = Vec::new();
        for item in items {
            let card = BoardCard::from(item);
            match card.origin {
                CardOrigin::External => external.push(card),
                CardOrigin::Local => local.push(card),
            }
        }

        let mut columns: Vec<BoardColumn> = AssignmentStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                cards: Vec::new(),
            })
            .collect();
        for card in external.into_iter().chain(local) {
            if let Some(column) = columns.iter_mut().find(|c| c.status == card.status) {
                column.cards.push(card);
            }
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    pub fn column(&self, status: AssignmentStatus) -> &[BoardCard] {
        self.columns
            .iter()
            .find(|column| column.status == status)
            .map(|column| column.cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn card(&self, id: &str) -> Option<&BoardCard> {
        self.columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .find(|card| card.id == id)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }
}
