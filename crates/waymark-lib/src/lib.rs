//! Waymark library entry points.
//!
//! This crate parses a pipe-delimited street-network description into an
//! adjacency-list graph, persists that graph in a compact binary layout for
//! fast reloads, and answers shortest-path queries between node ids with A*.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod codec;
pub mod error;
pub mod frontier;
pub mod geo;
pub mod graph;
pub mod ingest;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;

pub use codec::{
    decode_graph, encode_graph, encoded_len, graph_path_for, load_graph, save_graph, write_graph,
};
pub use error::{Error, Result};
pub use frontier::Frontier;
pub use geo::{haversine_m, Position, EARTH_RADIUS_KM};
pub use graph::{Graph, GraphSummary, HubNode, Node, NodeId, NodeIndex, MAX_SUCCESSORS};
pub use ingest::{
    build_graph_from_reader, build_graph_from_str, load_graph_from_text, GraphBuilder,
    IngestReport, IngestStats,
};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{reconstruct_path, Path, PathStep};
pub use routing::{plan_route, RoutePlan, RouteRequest};
pub use search::{CostModel, NodeState, PathFinder, SearchOutcome, SearchState};
