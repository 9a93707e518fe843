mod common;

use common::{pack_20, write_json};
use packforge::graph::CellRecord;
use packforge::loader;
use packforge::partition::Partition;
use packforge::scorer::{ScoreDetails, Scorer};
use packforge::config::ScoringWeights;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_cells_load_into_same_graph() {
    let pack = pack_20();
    let dir = tempdir().unwrap();
    let path = write_json(dir.path(), "cells.json", &pack.cells);

    let loaded = loader::load_cells(&path).unwrap();
    assert_eq!(loaded, pack.cells);

    let graph = loader::load_graph(&path).unwrap();
    assert_eq!(graph.ids(), pack.graph.ids());
    assert_eq!(graph.edge_count(), pack.graph.edge_count());
}

#[test]
fn test_slot_keys_are_text() {
    let cell = CellRecord::new(4, 1.0, 2.0).with_neighbor(5, 9);
    let json = serde_json::to_value(&cell).unwrap();
    assert_eq!(json["5"], 9);
    assert!(json.get("0").is_none());
}

#[test]
fn test_assignment_accepts_numbers_and_strings() {
    let a = loader::parse_assignment(r#"{"1": "2", "2": 1}"#).unwrap();
    assert_eq!(a["1"], "2");
    assert_eq!(a["2"], "1");

    assert!(loader::parse_assignment(r#"{"1": [2]}"#).is_err());
    assert!(loader::parse_assignment("not json").is_err());
}

#[test]
fn test_save_and_reload_assignment() {
    let pack = pack_20();
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("best.json");

    let assignment = pack.seed.to_assignment(&pack.graph);
    loader::save_assignment(&path, &assignment).unwrap();

    let reloaded = loader::load_assignment(&path).unwrap();
    assert_eq!(reloaded, assignment);
    let partition = Partition::from_assignment(&reloaded, &pack.graph, 2).unwrap();
    assert_eq!(partition, pack.seed);
}

#[test]
fn test_details_sidecar() {
    let pack = pack_20();
    let dir = tempdir().unwrap();
    let best = dir.path().join("best.json");
    let sidecar = loader::details_path(&best);
    assert_eq!(sidecar, dir.path().join("best.score.json"));

    let scorer = Scorer::new(pack.graph.clone(), 2, ScoringWeights::default());
    let details = scorer.score_details(&pack.seed).unwrap();
    loader::save_details(&sidecar, &details).unwrap();

    let text = fs::read_to_string(&sidecar).unwrap();
    assert!(text.contains("\"totalSurfaceArea\": 19"));
    let back: ScoreDetails = serde_json::from_str(&text).unwrap();
    assert_eq!(back.total_surface_area, details.total_surface_area);
    assert_eq!(back.surface_areas, details.surface_areas);
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let err = loader::load_cells(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}
