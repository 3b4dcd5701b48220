//! Store-level behavior: deletion floor, active board policy, log pairing
//! and the drag-end boundary.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use taskers::{
    Action, Board, BoardId, DraggableLocation, DropResult, KanbanError, SortPolicy, Store,
    StoreConfig, Task, TaskList,
};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn store() -> Store {
    Store::default()
}

/// Seed board plus `b1` and `b2`, so the collection reads `[board-0, b1, b2]`.
#[fixture]
fn three_boards() -> Store {
    let mut store = Store::default();
    for (id, name) in [("b1", "Second"), ("b2", "Third")] {
        store
            .dispatch(Action::AddBoard {
                board: Board::with_id(id, name),
            })
            .unwrap();
    }
    store
}

fn board_ids(store: &Store) -> Vec<String> {
    store
        .collection()
        .boards
        .keys()
        .map(ToString::to_string)
        .collect()
}

fn task_ids(store: &Store, list: &str) -> Vec<String> {
    store
        .active_board()
        .unwrap()
        .list(&list.into())
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.task_id.to_string())
        .collect()
}

fn drop_result(task: &str, from: (&str, usize), to: Option<(&str, usize)>) -> DropResult {
    DropResult {
        draggable_id: task.into(),
        source: DraggableLocation {
            droppable_id: from.0.into(),
            index: from.1,
        },
        destination: to.map(|(list, index)| DraggableLocation {
            droppable_id: list.into(),
            index,
        }),
    }
}

#[rstest]
#[case("board-0")]
#[case("unknown")]
#[case("")]
fn last_board_cannot_be_deleted(mut store: Store, #[case] board_id: &str) {
    let before = store.collection().clone();
    let err = store.delete_board(&board_id.into()).unwrap_err();
    assert_eq!(err, KanbanError::LastBoard);
    assert_eq!(err.to_string(), "at least one board must remain");
    assert_eq!(store.collection(), &before);
    assert!(store.log().is_empty());
}

#[rstest]
fn dispatching_delete_goes_through_the_floor(mut store: Store) {
    let result = store.dispatch(Action::DeleteBoard {
        board_id: "board-0".into(),
    });
    assert_eq!(result.unwrap_err(), KanbanError::LastBoard);
    assert!(store.active_board().is_some());
}

#[rstest]
fn deleting_first_board_activates_the_next(mut three_boards: Store) {
    let store = &mut three_boards;
    assert_eq!(store.active_board_id().as_str(), "board-0");
    let entry = store.delete_board(&"board-0".into()).unwrap().cloned();

    assert_eq!(board_ids(store), ["b1", "b2"]);
    assert_eq!(store.active_board_id().as_str(), "b1");
    assert_eq!(store.active_board().unwrap().board_name, "Second");
    assert_eq!(entry.unwrap().log_message, "Board \"First board\" deleted");
}

#[rstest]
fn deleting_a_later_board_activates_the_previous(mut three_boards: Store) {
    let store = &mut three_boards;
    assert!(store.select_board(&"b1".into()));
    store.delete_board(&"b1".into()).unwrap();

    assert_eq!(board_ids(store), ["board-0", "b2"]);
    assert_eq!(store.active_board_id().as_str(), "board-0");
}

#[rstest]
fn deleting_an_inactive_board_keeps_the_selection(mut three_boards: Store) {
    let store = &mut three_boards;
    assert!(store.select_board(&"b2".into()));
    store.delete_board(&"b1".into()).unwrap();
    assert_eq!(store.active_board_id().as_str(), "b2");
}

#[rstest]
fn deleting_an_unknown_board_changes_nothing(mut three_boards: Store) {
    let store = &mut three_boards;
    let logged = store.log().len();
    assert!(store.delete_board(&"nope".into()).unwrap().is_none());
    assert_eq!(board_ids(store), ["board-0", "b1", "b2"]);
    assert_eq!(store.log().len(), logged);
}

#[rstest]
fn active_board_survives_repeated_deletes(mut three_boards: Store) {
    let store = &mut three_boards;
    while store.collection().len() > 1 {
        let active = store.active_board_id().clone();
        store.delete_board(&active).unwrap();
        assert!(store.active_board().is_some());
    }
    let active = store.active_board_id().clone();
    assert!(store.delete_board(&active).is_err());
}

#[rstest]
fn cross_list_drop_moves_and_logs_once(mut store: Store) {
    let entry = store
        .handle_drag_end(drop_result("task-0", ("list-0", 0), Some(("list-1", 1))))
        .cloned()
        .unwrap();

    assert_eq!(task_ids(&store, "list-0"), ["task-1"]);
    assert_eq!(task_ids(&store, "list-1"), ["task-2", "task-0"]);
    assert_eq!(
        entry.log_message,
        "Task \"Task 1\" moved from list \"List 1\" to list \"List 2\""
    );
    assert_eq!(entry.log_author, "user");
    assert_eq!(store.log().entries(), [entry]);
}

#[rstest]
fn same_list_drop_reorders(mut store: Store) {
    store.handle_drag_end(drop_result("task-0", ("list-0", 0), Some(("list-0", 1))));
    assert_eq!(task_ids(&store, "list-0"), ["task-1", "task-0"]);
    assert_eq!(store.log().len(), 1);
}

#[rstest]
fn drop_outside_any_list_is_ignored(mut store: Store) {
    let before = store.collection().clone();
    assert!(store
        .handle_drag_end(drop_result("task-0", ("list-0", 0), None))
        .is_none());
    assert_eq!(store.collection(), &before);
    assert!(store.log().is_empty());
}

#[rstest]
fn drops_apply_to_the_active_board(mut three_boards: Store) {
    let store = &mut three_boards;
    store
        .dispatch(Action::AddList {
            board_id: "b2".into(),
            list: TaskList::with_id("todo", "Todo").with_tasks([
                Task::with_id("p", "P", "", "jini"),
                Task::with_id("q", "Q", "", "jini"),
            ]),
        })
        .unwrap();
    assert!(store.select_board(&"b2".into()));

    store.handle_drag_end(drop_result("p", ("todo", 0), Some(("todo", 1))));
    assert_eq!(task_ids(store, "todo"), ["q", "p"]);
}

#[rstest]
fn unresolvable_drop_is_not_logged(mut store: Store) {
    let before = store.collection().clone();
    assert!(store
        .handle_drag_end(drop_result("task-0", ("list-0", 7), Some(("list-1", 0))))
        .is_none());
    assert_eq!(store.collection(), &before);
    assert!(store.log().is_empty());
}

#[test]
fn verify_policy_rejects_stale_drops() {
    let config = StoreConfig {
        sort_policy: SortPolicy::VerifyDraggable,
        ..StoreConfig::default()
    };
    let mut store = Store::new(config);
    assert!(store
        .handle_drag_end(drop_result("task-1", ("list-0", 0), Some(("list-1", 0))))
        .is_none());
    assert_eq!(task_ids(&store, "list-0"), ["task-0", "task-1"]);
    assert!(store.log().is_empty());

    assert!(store
        .handle_drag_end(drop_result("task-1", ("list-0", 1), Some(("list-1", 0))))
        .is_some());
    assert_eq!(task_ids(&store, "list-1"), ["task-1", "task-2"]);
}

#[rstest]
fn every_accepted_mutation_appends_exactly_one_entry(mut three_boards: Store) {
    let store = &mut three_boards;
    let mut expected = store.log().len();

    let actions = [
        Action::AddList {
            board_id: "board-0".into(),
            list: TaskList::with_id("list-2", "List 3"),
        },
        Action::AddTask {
            board_id: "board-0".into(),
            list_id: "list-2".into(),
            task: Task::with_id("task-9", "Task 9", "", "jini"),
        },
        Action::UpdateTask {
            board_id: "board-0".into(),
            list_id: "list-2".into(),
            task: Task::with_id("task-9", "Task 9 edited", "", "jini"),
        },
        Action::DeleteTask {
            board_id: "board-0".into(),
            list_id: "list-0".into(),
            task_id: "task-1".into(),
        },
        Action::DeleteList {
            board_id: "board-0".into(),
            list_id: "list-2".into(),
        },
        Action::UpdateBoardName {
            board_id: "b2".into(),
            board_name: "Archive".into(),
        },
        Action::DeleteBoard {
            board_id: "b1".into(),
        },
    ];
    for action in actions {
        assert!(store.dispatch(action).unwrap().is_some());
        expected += 1;
        assert_eq!(store.log().len(), expected);
    }
}

#[rstest]
#[case::unknown_board(Action::AddTask {
    board_id: "nope".into(),
    list_id: "list-0".into(),
    task: Task::new("x", "", ""),
})]
#[case::unknown_list(Action::UpdateTask {
    board_id: "board-0".into(),
    list_id: "nope".into(),
    task: Task::with_id("task-0", "x", "", ""),
})]
#[case::unknown_task(Action::DeleteTask {
    board_id: "board-0".into(),
    list_id: "list-0".into(),
    task_id: "nope".into(),
})]
#[case::list_on_unknown_board(Action::DeleteList {
    board_id: "nope".into(),
    list_id: "list-0".into(),
})]
fn misses_leave_state_and_log_alone(mut store: Store, #[case] action: Action) {
    let before = serde_json::to_value(store.collection()).unwrap();
    assert!(store.dispatch(action).unwrap().is_none());
    assert_eq!(serde_json::to_value(store.collection()).unwrap(), before);
    assert!(store.log().is_empty());
}

#[rstest]
fn active_board_reads_are_stable(store: Store) {
    let first = store.active_board().cloned();
    let second = store.active_board().cloned();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn entries_use_configured_author_and_clock() {
    let at = Utc.timestamp_millis_opt(1_650_000_000_000).unwrap();
    let config = StoreConfig {
        log_author: "jini".into(),
        ..StoreConfig::default()
    };
    let mut store = Store::with_clock(config, FixedClock(at));
    store
        .dispatch(Action::AddBoard {
            board: Board::with_id(BoardId::generate(), "Roadmap"),
        })
        .unwrap();

    let entry = store.log().last().unwrap();
    assert_eq!(entry.log_message, "Board \"Roadmap\" created");
    assert_eq!(entry.log_author, "jini");
    assert_eq!(entry.log_timestamp, "1650000000000");
}

#[test]
fn log_is_newest_first_for_display() {
    let mut store = Store::default();
    store.handle_drag_end(drop_result("task-0", ("list-0", 0), Some(("list-0", 1))));
    store
        .dispatch(Action::AddBoard {
            board: Board::with_id("b1", "Second"),
        })
        .unwrap();
    let messages: Vec<_> = store
        .log()
        .iter_newest_first()
        .map(|e| e.log_message.as_str())
        .collect();
    assert_eq!(
        messages,
        [
            "Board \"Second\" created",
            "Task \"Task 1\" moved within list \"List 1\""
        ]
    );
}

#[rstest]
fn duplicate_ids_are_refused_without_logging(mut store: Store) {
    let before = store.collection().clone();

    let list = store
        .dispatch(Action::AddList {
            board_id: "board-0".into(),
            list: TaskList::with_id("list-0", "Fresh"),
        })
        .unwrap();
    assert!(list.is_none());

    let board = store
        .dispatch(Action::AddBoard {
            board: Board::with_id("board-0", "Dup"),
        })
        .unwrap();
    assert!(board.is_none());

    assert_eq!(store.collection(), &before);
    assert_eq!(task_ids(&store, "list-0"), ["task-0", "task-1"]);
    assert_eq!(store.active_board().unwrap().board_name, "First board");
    assert!(store.log().is_empty());
}

#[test]
fn store_keeps_the_config_it_was_built_with() {
    let config = StoreConfig {
        log_author: "jini".into(),
        sort_policy: SortPolicy::VerifyDraggable,
    };
    let store = Store::new(config.clone());
    assert_eq!(store.config(), &config);
}
