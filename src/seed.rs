//! Initial state every store starts from.

use crate::kanban_board::BoardCollection;
use crate::task::{Board, BoardId, Task, TaskList};

pub const DEFAULT_BOARD_ID: &str = "board-0";

const OWNER: &str = "jini";
const DESCRIPTION: &str = "Description";

/// One board, two lists, three tasks.
pub fn initial_collection() -> BoardCollection {
    BoardCollection::new([Board::with_id(DEFAULT_BOARD_ID, "First board").with_lists([
        TaskList::with_id("list-0", "List 1").with_tasks([
            Task::with_id("task-0", "Task 1", DESCRIPTION, OWNER),
            Task::with_id("task-1", "Task 2", DESCRIPTION, OWNER),
        ]),
        TaskList::with_id("list-1", "List 2")
            .with_tasks([Task::with_id("task-2", "Task 3", DESCRIPTION, OWNER)]),
    ])])
}

pub fn default_board_id() -> BoardId {
    BoardId::from(DEFAULT_BOARD_ID)
}
