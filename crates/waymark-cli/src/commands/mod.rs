// Subcommand handlers.
//
// main.rs parses arguments and dispatches; each module owns one subcommand.

pub mod build;
pub mod inspect;
pub mod route;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use waymark_lib::{load_graph, load_graph_from_text, Graph, IngestStats};

/// Where a subcommand reads its graph from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct GraphSource {
    /// Binary graph produced by `waymark build`.
    #[arg(long, value_name = "PATH")]
    pub graph: Option<PathBuf>,
    /// Pipe-delimited text map, ingested on the fly.
    #[arg(long, value_name = "PATH")]
    pub map: Option<PathBuf>,
}

/// Graph loaded from a [`GraphSource`].
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    /// Present when the graph was ingested from a text map.
    pub stats: Option<IngestStats>,
}

impl GraphSource {
    pub fn load(&self) -> Result<LoadedGraph> {
        let start = Instant::now();

        let loaded = match (&self.graph, &self.map) {
            (Some(path), _) => LoadedGraph {
                graph: load_graph(path)
                    .with_context(|| format!("failed to load graph from {}", path.display()))?,
                stats: None,
            },
            (None, Some(path)) => {
                let report = load_graph_from_text(path)
                    .with_context(|| format!("failed to read map from {}", path.display()))?;
                LoadedGraph {
                    graph: report.graph,
                    stats: Some(report.stats),
                }
            }
            (None, None) => anyhow::bail!("either --graph or --map is required"),
        };

        info!(
            nodes = loaded.graph.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "graph ready"
        );
        Ok(loaded)
    }
}
