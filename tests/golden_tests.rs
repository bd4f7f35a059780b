//! Golden file tests for response shapes.
//!
//! Verifies that serialized output matches the golden files consumed by
//! existing clients:
//! - Detailed movie records
//! - Movie-centered node-link graphs
//! - Person-centered node-link graphs

// Golden tests use expect/unwrap/panic for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use moviegraph::services::FixedColor;
use moviegraph::storage::RecordedExecutor;
use moviegraph::{MovieService, OutputMode, PeopleService, PresentationOptions, RgbColor};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

const TEAL: RgbColor = RgbColor::new(0, 128, 128);

/// Get the path to the golden files directory.
fn golden_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("golden")
}

/// Load a golden JSON file as a Value.
fn load_golden_json(filename: &str) -> Value {
    let path = golden_dir().join(filename);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read golden file {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse golden JSON {filename}: {e}"))
}

fn executor() -> RecordedExecutor {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/movies.json");
    RecordedExecutor::from_file(&path).unwrap()
}

fn movies() -> MovieService {
    MovieService::new(&PresentationOptions::default()).with_colors(Arc::new(FixedColor(TEAL)))
}

#[tokio::test]
async fn test_movie_details_golden() {
    let rendered = movies()
        .by_id(&executor(), 603, OutputMode::Default)
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&rendered).unwrap(),
        load_golden_json("movie_603.json")
    );
}

#[tokio::test]
async fn test_movie_graph_golden() {
    let rendered = movies().by_id(&executor(), 603, OutputMode::D3).await.unwrap();
    assert_eq!(
        serde_json::to_value(&rendered).unwrap(),
        load_golden_json("movie_603_d3.json")
    );
}

#[tokio::test]
async fn test_person_graph_golden() {
    let rendered = PeopleService::new(&PresentationOptions::default())
        .with_colors(Arc::new(FixedColor(TEAL)))
        .by_id(&executor(), 6384, OutputMode::D3)
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&rendered).unwrap(),
        load_golden_json("person_6384_d3.json")
    );
}

#[test]
fn test_golden_graphs_are_well_formed() {
    for file in ["movie_603_d3.json", "person_6384_d3.json"] {
        let golden = load_golden_json(file);
        let nodes = golden["nodes"].as_array().unwrap();
        let links = golden["links"].as_array().unwrap();

        let ids: Vec<&Value> = nodes.iter().map(|n| &n["id"]).collect();
        for link in links {
            assert!(ids.contains(&&link["source"]), "{file}: dangling source");
            assert!(ids.contains(&&link["target"]), "{file}: dangling target");
        }
        for node in nodes {
            assert!(node.get("version").is_none(), "{file}: version leaked");
        }
    }
}
