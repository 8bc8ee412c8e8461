//! Saving and loading value tables through both repositories

use std::path::Path;

use dotsbox::{
    Action, BoardSaver, Edge, Error, GameState,
    adapters::{InMemoryRepository, MsgPackRepository},
    ports::TableRepository,
    q_learning::TableMetadata,
};
use tempfile::TempDir;

fn trained_table() -> BoardSaver {
    let mut table = BoardSaver::new(2);
    let empty = GameState::default();
    table
        .define(&empty, Action::between((0, 0), (0, 1)), 0.5)
        .unwrap();
    table
        .define(&empty, Action::between((1, 0), (1, 1)), -0.25)
        .unwrap();

    let later = GameState::new(
        vec![Edge::new((0, 0), (0, 1)), Edge::new((1, 1), (2, 1))],
        1,
    );
    table
        .define(&later, Action::between((2, 1), (2, 2)), 3.0)
        .unwrap();
    table
}

fn assert_same_values(a: &BoardSaver, b: &BoardSaver) {
    assert_eq!(a.size(), b.size());
    assert_eq!(a.len(), b.len());
    assert_eq!(a.num_states(), b.num_states());

    let empty = GameState::default();
    for action in [
        Action::between((0, 0), (0, 1)),
        Action::between((1, 0), (1, 1)),
    ] {
        assert_eq!(a.get(&empty, action).unwrap(), b.get(&empty, action).unwrap());
    }
}

#[test]
fn test_msgpack_round_trip_preserves_lookups() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("q_value_function_2x2.msgpack");
    let repo = MsgPackRepository::new();
    let table = trained_table();

    repo.save(&table, &path).unwrap();
    let loaded = repo.load(&path).unwrap();

    assert_same_values(&table, &loaded);
    // A rotated query still hits the restored entry.
    let rotated = GameState::new(
        vec![Edge::new((1, 0), (2, 0)), Edge::new((1, 1), (1, 2))],
        1,
    );
    assert_eq!(
        loaded
            .get(&rotated, Action::between((0, 2), (1, 2)))
            .unwrap(),
        3.0
    );
}

#[test]
fn test_msgpack_keeps_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table.msgpack");
    let repo = MsgPackRepository::new();
    let metadata = TableMetadata {
        episodes: Some(500),
        opponent: Some("greedy".to_string()),
        seed: Some(9),
    };

    repo.save_with_metadata(&trained_table(), &metadata, &path)
        .unwrap();
    let (loaded, restored) = repo.load_with_metadata(&path).unwrap();

    assert_eq!(restored, metadata);
    assert_eq!(loaded.len(), 3);
}

#[test]
fn test_loaded_table_keeps_learning() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table.msgpack");
    let repo = MsgPackRepository::new();
    repo.save(&trained_table(), &path).unwrap();

    let mut loaded = repo.load(&path).unwrap();
    let state = GameState::new(vec![Edge::new((2, 0), (2, 1))], 0);
    loaded
        .define(&state, Action::between((0, 0), (1, 0)), 7.0)
        .unwrap();
    repo.save(&loaded, &path).unwrap();

    let reloaded = repo.load(&path).unwrap();
    assert_eq!(
        reloaded
            .get(&state, Action::between((0, 0), (1, 0)))
            .unwrap(),
        7.0
    );
    assert_eq!(reloaded.len(), 4);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = MsgPackRepository::new()
        .load(&dir.path().join("absent.msgpack"))
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_in_memory_repository_shares_storage_between_clones() {
    let repo = InMemoryRepository::new();
    let other = repo.clone();
    let path = Path::new("memory/table.msgpack");

    repo.save(&trained_table(), path).unwrap();
    assert!(other.contains(path));
    assert_eq!(other.count(), 1);

    let loaded = other.load(path).unwrap();
    assert_same_values(&trained_table(), &loaded);

    repo.clear();
    assert!(other.load(path).is_err());
}
