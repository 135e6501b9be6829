//! Assignment board use-cases.
//!
//! # Responsibility
//! - Merge the signed-in user's class todos with local tasks into a
//!   [`StatusBoard`].
//! - Forward class todo status changes to the hosted source.
//!
//! # Invariants
//! - A failed or unauthenticated fetch yields an empty external list; the
//!   local half of the board still renders.
//! - Local tasks are never written through this service.

use crate::model::assignment::AssignmentStatus;
use crate::model::session::UserSession;
use crate::model::task::Task;
use crate::repo::class_todo_source::{ClassTodoSource, SourceError};
use crate::view::board::{BoardCard, BoardItem, StatusBoard};
use log::{info, warn};

pub struct AssignmentBoardService<S: ClassTodoSource> {
    source: S,
}

impl<S: ClassTodoSource> AssignmentBoardService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Builds the board for `session` on top of `local_tasks`.
    pub fn load(&self, session: Option<&UserSession>, local_tasks: &[Task]) -> StatusBoard {
        let external = match session {
            Some(session) => match self.source.fetch_class_todos(&session.user_id) {
                Ok(records) => {
                    info!(
                        "event=board_fetch module=board status=ok record_count={}",
                        records.len()
                    );
                    records
                }
                Err(err) => {
                    warn!(
                        "event=board_fetch module=board status=degraded error={}",
                        err
                    );
                    Vec::new()
                }
            },
            None => {
                info!("event=board_fetch module=board status=skipped reason=signed_out");
                Vec::new()
            }
        };

        let items = external
            .into_iter()
            .map(BoardItem::External)
            .chain(local_tasks.iter().cloned().map(BoardItem::Local));
        StatusBoard::build(items)
    }

    /// Sends the checkbox-toggled status of `card` to the source and returns
    /// it.
    ///
    /// # Errors
    /// - `NotExternal` for local cards; toggle those through the task store.
    /// - Source errors pass through unchanged.
    pub fn toggle_external(&self, card: &BoardCard) -> Result<AssignmentStatus, SourceError> {
        if !card.is_external() {
            return Err(SourceError::NotExternal(card.id.clone()));
        }
        self.set_status(&card.id, card.status.toggled())?;
        Ok(card.status.toggled())
    }

    /// Writes `status` for the class todo `id`.
    pub fn set_status(&self, id: &str, status: AssignmentStatus) -> Result<(), SourceError> {
        match self.source.update_status(id, status) {
            Ok(()) => {
                info!(
                    "event=board_update module=board status=ok new_status={}",
                    status.as_str()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=board_update module=board status=error error={}", err);
                Err(err)
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
