//! Integration tests for loading maps from description files.

use spire::{
    GenerationConfig, Map, MapDescription, MapLayout, MapSource, NodeId, NodeKind, NodeState,
    Run, RunCompletion, SpireError,
};
use std::io::Write;
use tempfile::NamedTempFile;

const DIAMOND: &str = r#"{
    "map_id": "diamond",
    "current_level": 0,
    "rows": 4,
    "columns": 3,
    "nodes": [
        {"id": "start", "type": "Normal", "position": {"row": 0, "column": 1},
         "connections": ["camp", "market"], "state": "Selectable"},
        {"id": "camp", "type": "rest", "position": {"row": 1, "column": 0},
         "connections": ["elite"], "state": "locked"},
        {"id": "market", "type": "SHOP", "position": {"row": 1, "column": 2},
         "connections": ["elite"], "state": "locked"},
        {"id": "elite", "type": "elite", "position": {"row": 2, "column": 1},
         "connections": ["boss"], "state": "locked"},
        {"id": "boss", "type": "boss", "position": {"row": 3, "column": 1},
         "connections": [], "state": "locked"}
    ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn load_error(json: &str) -> SpireError {
    Map::from_json(json).expect_err("Map should be rejected")
}

#[test]
fn test_load_description_file() {
    let file = write_temp(DIAMOND);
    let map = MapSource::DescribedFile(file.path().to_path_buf())
        .build()
        .expect("Failed to load map");

    assert_eq!(map.id, "diamond");
    assert_eq!(map.len(), 5);
    assert_eq!(map.selectable_nodes(), &[NodeId::from("start")]);

    let market = map.get_node(&NodeId::from("market")).expect("market exists");
    assert_eq!(market.kind, NodeKind::Shop);
    assert_eq!(market.state, NodeState::Locked);
}

#[test]
fn test_description_round_trips_through_file() {
    let original = Map::from_json(DIAMOND).expect("Failed to parse map");
    let file = write_temp(
        &original
            .to_description()
            .to_json()
            .expect("Failed to serialize"),
    );

    let reloaded = MapDescription::from_path(file.path()).expect("Failed to read description");
    let map = Map::load(&reloaded).expect("Failed to load description");
    assert_eq!(map.edges(), original.edges());
    assert_eq!(
        reloaded.connection_set(),
        MapDescription::from_json(DIAMOND)
            .expect("Failed to parse")
            .connection_set()
    );
}

#[test]
fn test_description_wins_over_generation() {
    let file = write_temp(DIAMOND);
    let source = MapSource::choose(Some(file.path()), GenerationConfig::new(99));
    let run = Run::new(&source, MapLayout::new(), 720.0).expect("Failed to start run");
    assert_eq!(run.map().id, "diamond");
}

#[test]
fn test_rejects_unknown_connection() {
    let json = DIAMOND.replace(r#"["boss"]"#, r#"["ghost"]"#);
    match load_error(&json) {
        SpireError::MalformedMap(message) => assert!(message.contains("ghost"), "{}", message),
        other => panic!("expected MalformedMap, got {:?}", other),
    }
}

#[test]
fn test_rejects_row_skipping_connection() {
    let json = DIAMOND.replace(
        r#""connections": ["camp", "market"]"#,
        r#""connections": ["camp", "market", "elite"]"#,
    );
    assert!(matches!(load_error(&json), SpireError::MalformedMap(_)));
}

#[test]
fn test_rejects_orphan_node() {
    let json = DIAMOND.replace(
        r#""connections": ["camp", "market"]"#,
        r#""connections": ["camp"]"#,
    );
    match load_error(&json) {
        SpireError::MalformedMap(message) => assert!(message.contains("market"), "{}", message),
        other => panic!("expected MalformedMap, got {:?}", other),
    }
}

#[test]
fn test_rejects_unknown_kind_and_missing_fields() {
    let json = DIAMOND.replace(r#""type": "elite""#, r#""type": "treasure""#);
    assert!(matches!(load_error(&json), SpireError::MalformedMap(_)));

    let json = DIAMOND.replace(r#""state": "locked"}"#, "}");
    assert!(matches!(load_error(&json), SpireError::MalformedMap(_)));

    assert!(matches!(load_error("not json"), SpireError::MalformedMap(_)));
}

#[test]
fn test_walking_a_loaded_map() {
    let map = Map::from_json(DIAMOND).expect("Failed to parse map");
    let mut run = Run::from_map(map, MapLayout::for_testing(), 720.0, 0);

    // Selecting ahead of the frontier changes nothing
    assert!(run.select_node(&NodeId::from("elite")).is_empty());
    assert_eq!(run.map().current_level, 0);

    run.select_node(&NodeId::from("start"));
    assert_eq!(
        run.map().selectable_nodes(),
        &[NodeId::from("camp"), NodeId::from("market")]
    );

    run.select_node(&NodeId::from("market"));
    let camp = run.map().get_node(&NodeId::from("camp")).expect("camp exists");
    assert_eq!(camp.state, NodeState::Locked);

    while run.auto_step().is_some() {}
    assert_eq!(run.completion(), RunCompletion::BossDefeated);
    assert_eq!(run.map().current_level, 4);
    assert_eq!(run.statistics().nodes_completed, 4);
    assert_eq!(run.statistics().completed(NodeKind::Rest), 0);
}
