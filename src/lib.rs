//! In-memory kanban board state.
//!
//! Boards hold ordered lists and lists hold ordered tasks. A presentation
//! layer drives the [`Store`] with [`Action`]s and drag-end reports, then
//! reads the collection, the active board and the activity log back out.

pub mod activity_log;
pub mod config;
pub mod error;
pub mod kanban_board;
pub mod reorder;
pub mod seed;
pub mod selection;
pub mod store;
pub mod task;

pub use activity_log::{ActivityLog, LogEntry};
pub use config::StoreConfig;
pub use error::{ConfigError, KanbanError};
pub use kanban_board::{Action, BoardCollection};
pub use reorder::{SortPayload, SortPolicy};
pub use store::{DraggableLocation, DropResult, Store};
pub use task::{Board, BoardId, ListId, LogId, Task, TaskId, TaskList};
