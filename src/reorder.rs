//! Drag-and-drop reordering of tasks within and across lists.
//!
//! Moves use splice semantics: the task is removed from its source position
//! first and then inserted at the destination index of the (possibly now
//! shorter) destination sequence. Destination indices past the end clamp to
//! the end.

use crate::kanban_board::BoardCollection;
use crate::task::{ListId, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How much the engine trusts the positional part of a drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Move whatever sits at `source_index`; `draggable_id` is informational.
    #[default]
    TrustIndex,
    /// Refuse the move unless the task at `source_index` is `draggable_id`.
    VerifyDraggable,
}

/// A single drop, already resolved against the board's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortPayload {
    pub board_index: usize,
    pub source_list_id: ListId,
    pub dest_list_id: ListId,
    pub source_index: usize,
    pub dest_index: usize,
    pub draggable_id: TaskId,
}

impl SortPayload {
    pub fn is_same_list(&self) -> bool {
        self.source_list_id == self.dest_list_id
    }
}

impl BoardCollection {
    /// Moves one task according to `payload`. Returns `false`, leaving every
    /// list untouched, when the board, either list or the source task cannot
    /// be resolved.
    pub fn sort(&mut self, payload: &SortPayload, policy: SortPolicy) -> bool {
        let Some((_, board)) = self.boards.get_index_mut(payload.board_index) else {
            debug!(board_index = payload.board_index, "sort skipped, no board at index");
            return false;
        };

        // Both ends must resolve before anything is removed, otherwise a task
        // could leave its source without arriving anywhere.
        let (Some(source), Some(dest)) = (
            board.lists.get_index_of(&payload.source_list_id),
            board.lists.get_index_of(&payload.dest_list_id),
        ) else {
            debug!(
                source = %payload.source_list_id,
                dest = %payload.dest_list_id,
                "sort skipped, list not found"
            );
            return false;
        };

        let source_tasks = &board.lists[source].tasks;
        let Some(moving) = source_tasks.get(payload.source_index) else {
            debug!(
                source_index = payload.source_index,
                len = source_tasks.len(),
                "sort skipped, nothing at source index"
            );
            return false;
        };
        if policy == SortPolicy::VerifyDraggable && moving.task_id != payload.draggable_id {
            debug!(
                expected = %payload.draggable_id,
                found = %moving.task_id,
                "sort refused, draggable id does not match source index"
            );
            return false;
        }

        let task = board.lists[source].tasks.remove(payload.source_index);
        debug!(
            task_id = %task.task_id,
            from = %payload.source_list_id,
            to = %payload.dest_list_id,
            source_index = payload.source_index,
            dest_index = payload.dest_index,
            "moving task"
        );
        insert_clamped(&mut board.lists[dest].tasks, payload.dest_index, task);
        true
    }
}

fn insert_clamped(tasks: &mut Vec<Task>, index: usize, task: Task) {
    let index = index.min(tasks.len());
    tasks.insert(index, task);
}
