//! Entity model: boards hold ordered lists, lists hold ordered tasks.
//!
//! Identifiers are assigned by the caller before insertion. Nothing here
//! checks them for uniqueness; two entities sharing an id in the same
//! container make lookups pick whichever one the container resolves first.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Creates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a board, unique across the whole collection.
    BoardId
);
string_id!(
    /// Identifier of a list, unique within its board.
    ListId
);
string_id!(
    /// Identifier of a task, unique within its list.
    TaskId
);
string_id!(
    /// Identifier of an activity log entry.
    LogId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: TaskId,
    pub task_name: String,
    pub task_description: String,
    pub task_owner: String,
}

impl Task {
    /// Creates a task with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self::with_id(TaskId::generate(), name, description, owner)
    }

    pub fn with_id(
        task_id: impl Into<TaskId>,
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: name.into(),
            task_description: description.into(),
            task_owner: owner.into(),
        }
    }
}

/// An ordered column of tasks. Task order is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub list_id: ListId,
    pub list_name: String,
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ListId::generate(), name)
    }

    pub fn with_id(list_id: impl Into<ListId>, name: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            list_name: name.into(),
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.task_id == task_id)
    }

    pub fn task_ids(&self) -> Vec<&TaskId> {
        self.tasks.iter().map(|t| &t.task_id).collect()
    }
}

/// A board and its lists, keyed by list id in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub board_id: BoardId,
    pub board_name: String,
    #[serde(with = "ordered")]
    pub lists: IndexMap<ListId, TaskList>,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(BoardId::generate(), name)
    }

    pub fn with_id(board_id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            board_name: name.into(),
            lists: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_lists(mut self, lists: impl IntoIterator<Item = TaskList>) -> Self {
        for list in lists {
            self.lists.entry(list.list_id.clone()).or_insert(list);
        }
        self
    }

    pub fn list(&self, list_id: &ListId) -> Option<&TaskList> {
        self.lists.get(list_id)
    }

    pub fn task_count(&self) -> usize {
        self.lists.values().map(|l| l.tasks.len()).sum()
    }
}

/// List order is part of a board's identity.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.board_id == other.board_id
            && self.board_name == other.board_name
            && self.lists.iter().eq(other.lists.iter())
    }
}

impl Eq for Board {}

/// Entities that carry their own map key.
pub(crate) trait Keyed {
    type Key: std::hash::Hash + Eq + Clone;

    fn key(&self) -> &Self::Key;
}

impl Keyed for TaskList {
    type Key = ListId;

    fn key(&self) -> &ListId {
        &self.list_id
    }
}

impl Keyed for Board {
    type Key = BoardId;

    fn key(&self) -> &BoardId {
        &self.board_id
    }
}

/// Serializes an id-keyed `IndexMap` as a plain array of its values.
pub(crate) mod ordered {
    use super::Keyed;
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S, V>(
        map: &IndexMap<V::Key, V>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Keyed + Serialize,
    {
        serializer.collect_seq(map.values())
    }

    pub(crate) fn deserialize<'de, D, V>(
        deserializer: D,
    ) -> Result<IndexMap<V::Key, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Keyed + Deserialize<'de>,
    {
        let items = Vec::<V>::deserialize(deserializer)?;
        let mut map = IndexMap::with_capacity(items.len());
        for item in items {
            map.entry(item.key().clone()).or_insert(item);
        }
        Ok(map)
    }
}
