use crate::reorder::{SortPayload, SortPolicy};
use crate::task::{ordered, Board, BoardId, ListId, Task, TaskId, TaskList};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Process-wide board state.
///
/// Boards are keyed by id in display order. Every mutation method returns
/// `true` when its target resolved and the change was applied; a lookup miss
/// returns `false` and leaves the collection untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCollection {
    pub modal_active: bool,
    #[serde(rename = "boardArray", with = "ordered")]
    pub boards: IndexMap<BoardId, Board>,
}

impl PartialEq for BoardCollection {
    fn eq(&self, other: &Self) -> bool {
        self.modal_active == other.modal_active && self.boards.iter().eq(other.boards.iter())
    }
}

impl Eq for BoardCollection {}

/// One mutation intent, shaped like the payloads the presentation layer sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    AddBoard {
        board: Board,
    },
    DeleteBoard {
        board_id: BoardId,
    },
    UpdateBoardName {
        board_id: BoardId,
        board_name: String,
    },
    AddList {
        board_id: BoardId,
        list: TaskList,
    },
    DeleteList {
        board_id: BoardId,
        list_id: ListId,
    },
    UpdateListName {
        board_id: BoardId,
        list_id: ListId,
        list_name: String,
    },
    AddTask {
        board_id: BoardId,
        list_id: ListId,
        task: Task,
    },
    UpdateTask {
        board_id: BoardId,
        list_id: ListId,
        task: Task,
    },
    DeleteTask {
        board_id: BoardId,
        list_id: ListId,
        task_id: TaskId,
    },
    SetModalActive(bool),
    Sort(SortPayload),
}

impl BoardCollection {
    pub fn new(boards: impl IntoIterator<Item = Board>) -> Self {
        let mut collection = Self::default();
        for board in boards {
            collection.add_board(board);
        }
        collection
    }

    pub fn board(&self, board_id: &BoardId) -> Option<&Board> {
        self.boards.get(board_id)
    }

    pub fn board_at(&self, index: usize) -> Option<&Board> {
        self.boards.get_index(index).map(|(_, board)| board)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn list(&self, board_id: &BoardId, list_id: &ListId) -> Option<&TaskList> {
        self.boards.get(board_id)?.lists.get(list_id)
    }

    fn list_mut(&mut self, board_id: &BoardId, list_id: &ListId) -> Option<&mut TaskList> {
        self.boards.get_mut(board_id)?.lists.get_mut(list_id)
    }

    /// Applies an action in place.
    pub fn apply(&mut self, action: Action, policy: SortPolicy) -> bool {
        match action {
            Action::AddBoard { board } => self.add_board(board),
            Action::DeleteBoard { board_id } => self.delete_board(&board_id),
            Action::UpdateBoardName {
                board_id,
                board_name,
            } => self.update_board_name(&board_id, board_name),
            Action::AddList { board_id, list } => self.add_list(&board_id, list),
            Action::DeleteList { board_id, list_id } => self.delete_list(&board_id, &list_id),
            Action::UpdateListName {
                board_id,
                list_id,
                list_name,
            } => self.update_list_name(&board_id, &list_id, list_name),
            Action::AddTask {
                board_id,
                list_id,
                task,
            } => self.add_task(&board_id, &list_id, task),
            Action::UpdateTask {
                board_id,
                list_id,
                task,
            } => self.update_task(&board_id, &list_id, task),
            Action::DeleteTask {
                board_id,
                list_id,
                task_id,
            } => self.delete_task(&board_id, &list_id, &task_id),
            Action::SetModalActive(flag) => {
                self.set_modal_active(flag);
                true
            }
            Action::Sort(payload) => self.sort(&payload, policy),
        }
    }

    /// Reducer form of [`BoardCollection::apply`]: consumes the old state and
    /// returns the next one.
    #[must_use]
    pub fn reduce(mut self, action: Action, policy: SortPolicy) -> Self {
        self.apply(action, policy);
        self
    }

    /// Appends a board. A board whose id is already present is refused and
    /// the existing entry is left as it was.
    pub fn add_board(&mut self, board: Board) -> bool {
        if self.boards.contains_key(&board.board_id) {
            debug!(board_id = %board.board_id, "add board skipped, id already present");
            return false;
        }
        debug!(board_id = %board.board_id, "adding board");
        self.boards.insert(board.board_id.clone(), board);
        true
    }

    /// Removes a board. The one-board floor is enforced by the caller.
    pub fn delete_board(&mut self, board_id: &BoardId) -> bool {
        let removed = self.boards.shift_remove(board_id).is_some();
        debug!(%board_id, removed, "delete board");
        removed
    }

    pub fn update_board_name(&mut self, board_id: &BoardId, name: String) -> bool {
        match self.boards.get_mut(board_id) {
            Some(board) => {
                board.board_name = name;
                true
            }
            None => {
                debug!(%board_id, "rename skipped, board not found");
                false
            }
        }
    }

    pub fn add_list(&mut self, board_id: &BoardId, list: TaskList) -> bool {
        let Some(board) = self.boards.get_mut(board_id) else {
            debug!(%board_id, "add list skipped, board not found");
            return false;
        };
        if board.lists.contains_key(&list.list_id) {
            debug!(%board_id, list_id = %list.list_id, "add list skipped, id already present");
            return false;
        }
        debug!(%board_id, list_id = %list.list_id, "adding list");
        board.lists.insert(list.list_id.clone(), list);
        true
    }

    pub fn delete_list(&mut self, board_id: &BoardId, list_id: &ListId) -> bool {
        let removed = self
            .boards
            .get_mut(board_id)
            .and_then(|board| board.lists.shift_remove(list_id))
            .is_some();
        debug!(%board_id, %list_id, removed, "delete list");
        removed
    }

    pub fn update_list_name(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        name: String,
    ) -> bool {
        match self.list_mut(board_id, list_id) {
            Some(list) => {
                list.list_name = name;
                true
            }
            None => {
                debug!(%board_id, %list_id, "rename skipped, list not found");
                false
            }
        }
    }

    pub fn add_task(&mut self, board_id: &BoardId, list_id: &ListId, task: Task) -> bool {
        let Some(list) = self.list_mut(board_id, list_id) else {
            debug!(%board_id, %list_id, "add task skipped, list not found");
            return false;
        };
        debug!(%list_id, task_id = %task.task_id, "adding task");
        list.tasks.push(task);
        true
    }

    /// Replaces the task carrying the same id wholesale.
    pub fn update_task(&mut self, board_id: &BoardId, list_id: &ListId, task: Task) -> bool {
        let Some(slot) = self
            .list_mut(board_id, list_id)
            .and_then(|list| list.tasks.iter_mut().find(|t| t.task_id == task.task_id))
        else {
            debug!(
                %board_id,
                %list_id,
                task_id = %task.task_id,
                "update skipped, task not found"
            );
            return false;
        };
        *slot = task;
        true
    }

    pub fn delete_task(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> bool {
        let Some(list) = self.list_mut(board_id, list_id) else {
            debug!(%board_id, %list_id, "delete task skipped, list not found");
            return false;
        };
        let before = list.tasks.len();
        list.tasks.retain(|t| &t.task_id != task_id);
        let removed = list.tasks.len() != before;
        debug!(%list_id, %task_id, removed, "delete task");
        removed
    }

    pub fn set_modal_active(&mut self, flag: bool) {
        self.modal_active = flag;
    }
}
