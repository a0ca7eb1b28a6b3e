//! Build command handler: text map to binary graph.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use waymark_lib::{
    encoded_len, graph_path_for, load_graph_from_text, save_graph, Graph, IngestStats,
};

/// Arguments for the build command.
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Text map to ingest.
    pub map: PathBuf,
    /// Destination of the binary graph; defaults to the map path plus `.bin`.
    pub output: Option<PathBuf>,
}

impl BuildArgs {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| graph_path_for(&self.map))
    }
}

/// Handle the build subcommand.
pub fn handle_build(args: &BuildArgs) -> Result<()> {
    let output = args.output_path();
    let start = Instant::now();

    let report = load_graph_from_text(&args.map)
        .with_context(|| format!("failed to read map from {}", args.map.display()))?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "map ingested"
    );

    let write_start = Instant::now();
    save_graph(&report.graph, &output)
        .with_context(|| format!("failed to write graph to {}", output.display()))?;
    info!(
        elapsed_ms = write_start.elapsed().as_millis() as u64,
        "graph written"
    );

    print_build_summary(&output, &report.graph, &report.stats);
    Ok(())
}

fn print_build_summary(output: &Path, graph: &Graph, stats: &IngestStats) {
    println!("Binary graph written to {}", output.display());
    println!("  Nodes: {}", graph.len());
    println!("  Edges: {}", graph.edge_count());
    println!("  Skipped records: {}", stats.skipped_records);
    println!("  File size: {} bytes", encoded_len(graph));
}
