//! Single-writer store: the only path that mutates board state.
//!
//! Every accepted mutation goes through [`Store::commit`], which describes
//! the change against the pre-mutation tree, applies it, and appends exactly
//! one log entry when the change took effect.

use crate::activity_log::{ActivityLog, LogEntry};
use crate::config::StoreConfig;
use crate::error::KanbanError;
use crate::kanban_board::{Action, BoardCollection};
use crate::reorder::SortPayload;
use crate::seed;
use crate::selection;
use crate::task::{Board, BoardId, ListId, TaskId};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One end of a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableLocation {
    pub droppable_id: ListId,
    pub index: usize,
}

/// What the presentation layer reports when a drag ends. `destination` is
/// absent when the task was dropped outside every list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult {
    pub draggable_id: TaskId,
    pub source: DraggableLocation,
    pub destination: Option<DraggableLocation>,
}

#[derive(Debug)]
pub struct Store<C: Clock = DefaultClock> {
    collection: BoardCollection,
    log: ActivityLog,
    active_board_id: BoardId,
    config: StoreConfig,
    clock: C,
}

impl Store<DefaultClock> {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_clock(config, DefaultClock)
    }
}

impl Default for Store<DefaultClock> {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl<C: Clock> Store<C> {
    /// Starts from the seed state with the seeded board active.
    pub fn with_clock(config: StoreConfig, clock: C) -> Self {
        Self {
            collection: seed::initial_collection(),
            log: ActivityLog::new(),
            active_board_id: seed::default_board_id(),
            config,
            clock,
        }
    }

    pub fn collection(&self) -> &BoardCollection {
        &self.collection
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn active_board_id(&self) -> &BoardId {
        &self.active_board_id
    }

    pub fn active_board(&self) -> Option<&Board> {
        selection::active_board(&self.collection, &self.active_board_id)
    }

    pub fn modal_active(&self) -> bool {
        self.collection.modal_active
    }

    /// Applies `action`, returning the log entry it produced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::LastBoard`] when a board deletion would leave
    /// the collection empty.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<&LogEntry>, KanbanError> {
        match action {
            Action::DeleteBoard { board_id } => self.delete_board(&board_id),
            action => Ok(self.commit(action)),
        }
    }

    /// Deletes a board, keeping at least one and moving the active board off
    /// the deleted one: to the next board when the first is deleted,
    /// otherwise to the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::LastBoard`] when only one board exists,
    /// whatever `board_id` is.
    pub fn delete_board(&mut self, board_id: &BoardId) -> Result<Option<&LogEntry>, KanbanError> {
        if self.collection.len() <= 1 {
            warn!(%board_id, "refusing to delete the last board");
            return Err(KanbanError::LastBoard);
        }
        let Some(index) = self.collection.boards.get_index_of(board_id) else {
            debug!(%board_id, "delete skipped, board not found");
            return Ok(None);
        };

        if &self.active_board_id == board_id {
            let next = if index == 0 { 1 } else { index - 1 };
            if let Some(board) = self.collection.board_at(next) {
                debug!(from = %board_id, to = %board.board_id, "switching active board");
                self.active_board_id = board.board_id.clone();
            }
        }

        Ok(self.commit(Action::DeleteBoard {
            board_id: board_id.clone(),
        }))
    }

    /// Turns a finished drag into a sort on the active board. Drops without
    /// a destination are ignored.
    pub fn handle_drag_end(&mut self, drop: DropResult) -> Option<&LogEntry> {
        let Some(destination) = drop.destination else {
            debug!(draggable_id = %drop.draggable_id, "drop outside any list ignored");
            return None;
        };
        let board_index = selection::active_board_index(&self.collection, &self.active_board_id)?;

        self.commit(Action::Sort(SortPayload {
            board_index,
            source_list_id: drop.source.droppable_id,
            dest_list_id: destination.droppable_id,
            source_index: drop.source.index,
            dest_index: destination.index,
            draggable_id: drop.draggable_id,
        }))
    }

    /// Makes `board_id` the active board. Unknown ids leave the selection
    /// unchanged.
    pub fn select_board(&mut self, board_id: &BoardId) -> bool {
        if self.collection.board(board_id).is_none() {
            debug!(%board_id, "select skipped, board not found");
            return false;
        }
        self.active_board_id = board_id.clone();
        true
    }

    fn commit(&mut self, action: Action) -> Option<&LogEntry> {
        let message = describe(&self.collection, &action);
        if !self.collection.apply(action, self.config.sort_policy) {
            return None;
        }
        self.log
            .append(LogEntry::new(message?, self.config.log_author.as_str(), &self.clock));
        self.log.last()
    }
}

/// Human-readable description of `action`, read from the tree before it is
/// applied. `None` for cosmetic actions and for actions whose target does
/// not exist.
fn describe(collection: &BoardCollection, action: &Action) -> Option<String> {
    match action {
        Action::AddBoard { board } => Some(format!("Board \"{}\" created", board.board_name)),
        Action::DeleteBoard { board_id } => {
            let board = collection.board(board_id)?;
            Some(format!("Board \"{}\" deleted", board.board_name))
        }
        Action::UpdateBoardName {
            board_id,
            board_name,
        } => {
            let board = collection.board(board_id)?;
            Some(format!(
                "Board \"{}\" renamed to \"{board_name}\"",
                board.board_name
            ))
        }
        Action::AddList { board_id, list } => {
            let board = collection.board(board_id)?;
            Some(format!(
                "List \"{}\" added to board \"{}\"",
                list.list_name, board.board_name
            ))
        }
        Action::DeleteList { board_id, list_id } => {
            let board = collection.board(board_id)?;
            let list = board.list(list_id)?;
            Some(format!(
                "List \"{}\" deleted from board \"{}\"",
                list.list_name, board.board_name
            ))
        }
        Action::UpdateListName {
            board_id,
            list_id,
            list_name,
        } => {
            let list = collection.list(board_id, list_id)?;
            Some(format!(
                "List \"{}\" renamed to \"{list_name}\"",
                list.list_name
            ))
        }
        Action::AddTask {
            board_id,
            list_id,
            task,
        } => {
            let list = collection.list(board_id, list_id)?;
            Some(format!(
                "Task \"{}\" added to list \"{}\"",
                task.task_name, list.list_name
            ))
        }
        Action::UpdateTask {
            board_id,
            list_id,
            task,
        } => {
            let list = collection.list(board_id, list_id)?;
            list.task(&task.task_id)?;
            Some(format!(
                "Task \"{}\" updated in list \"{}\"",
                task.task_name, list.list_name
            ))
        }
        Action::DeleteTask {
            board_id,
            list_id,
            task_id,
        } => {
            let list = collection.list(board_id, list_id)?;
            let task = list.task(task_id)?;
            Some(format!(
                "Task \"{}\" deleted from list \"{}\"",
                task.task_name, list.list_name
            ))
        }
        Action::SetModalActive(_) => None,
        Action::Sort(payload) => {
            let board = collection.board_at(payload.board_index)?;
            let source = board.list(&payload.source_list_id)?;
            let dest = board.list(&payload.dest_list_id)?;
            let task = source.tasks.get(payload.source_index)?;
            if payload.is_same_list() {
                Some(format!(
                    "Task \"{}\" moved within list \"{}\"",
                    task.task_name, source.list_name
                ))
            } else {
                Some(format!(
                    "Task \"{}\" moved from list \"{}\" to list \"{}\"",
                    task.task_name, source.list_name, dest.list_name
                ))
            }
        }
    }
}
