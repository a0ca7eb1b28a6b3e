//! Shared fixture helpers for the integration tests.

use std::path::PathBuf;

use waymark_lib::{load_graph_from_text, Graph, IngestReport};

/// Path to the fixtures directory shared by the library and CLI tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the small street network used throughout the tests.
pub fn fixture_map_path() -> PathBuf {
    fixtures_dir().join("mini_map.csv")
}

#[allow(dead_code)]
pub fn fixture_report() -> IngestReport {
    load_graph_from_text(&fixture_map_path()).expect("fixture map loads")
}

#[allow(dead_code)]
pub fn fixture_graph() -> Graph {
    fixture_report().graph
}
