//! Read-only views derived from a [`BoardCollection`].

use crate::kanban_board::BoardCollection;
use crate::task::{Board, BoardId, ListId, TaskId};
use serde::Serialize;

/// The board currently displayed. `None` means the active id is stale,
/// which the store never lets happen.
pub fn active_board<'a>(collection: &'a BoardCollection, active_id: &BoardId) -> Option<&'a Board> {
    collection.boards.get(active_id)
}

pub fn active_board_index(collection: &BoardCollection, active_id: &BoardId) -> Option<usize> {
    collection.boards.get_index_of(active_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub board_id: BoardId,
    pub board_name: String,
    pub list_count: usize,
    pub task_count: usize,
}

/// One summary per board, in display order.
pub fn board_summaries(collection: &BoardCollection) -> Vec<BoardSummary> {
    collection
        .boards
        .values()
        .map(|board| BoardSummary {
            board_id: board.board_id.clone(),
            board_name: board.board_name.clone(),
            list_count: board.lists.len(),
            task_count: board.task_count(),
        })
        .collect()
}

/// Locates the first task with `task_id` on `board` as a (list, index) pair.
pub fn find_task<'a>(board: &'a Board, task_id: &TaskId) -> Option<(&'a ListId, usize)> {
    board.lists.iter().find_map(|(list_id, list)| {
        list.tasks
            .iter()
            .position(|t| &t.task_id == task_id)
            .map(|index| (list_id, index))
    })
}
