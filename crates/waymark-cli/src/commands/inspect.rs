//! Inspect command handler: structural summary of a graph.

use anyhow::Result;

use waymark_lib::{GraphSummary, IngestStats};

use super::GraphSource;

/// Arguments for the inspect command.
#[derive(Debug, Clone)]
pub struct InspectArgs {
    pub source: GraphSource,
    /// Output in JSON format instead of human-readable text.
    pub json: bool,
}

/// Handle the inspect subcommand.
pub fn handle_inspect(args: &InspectArgs) -> Result<()> {
    let loaded = args.source.load()?;
    let summary = loaded.graph.summary();

    if args.json {
        let value = serde_json::json!({
            "summary": summary,
            "ingest": loaded.stats,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_summary(&summary);
        if let Some(stats) = &loaded.stats {
            print_ingest_stats(stats);
        }
    }
    Ok(())
}

fn print_summary(summary: &GraphSummary) {
    println!("Nodes: {}", summary.node_count);
    println!("Edges: {}", summary.edge_count);
    println!("Max out-degree: {}", summary.max_out_degree);
    if let (Some(first), Some(last)) = (summary.first_node, summary.last_node) {
        println!("Id range: {} .. {}", first, last);
    }

    match &summary.hub {
        Some(hub) => {
            let neighbours: Vec<String> = hub.neighbours.iter().map(u64::to_string).collect();
            if hub.name.is_empty() {
                println!("Hub node: {} (index {})", hub.id, hub.index);
            } else {
                println!("Hub node: {} {} (index {})", hub.id, hub.name, hub.index);
            }
            println!("  Neighbours: {}", neighbours.join(", "));
        }
        None => println!("Hub node: none"),
    }
}

fn print_ingest_stats(stats: &IngestStats) {
    println!("Ingest:");
    println!("  Node records: {}", stats.node_records);
    println!("  Way records: {}", stats.way_records);
    println!("  Skipped records: {}", stats.skipped_records);
    println!("  Duplicate nodes: {}", stats.duplicate_nodes);
    println!("  Missing references: {}", stats.missing_references);
    println!("  Duplicate edges: {}", stats.duplicate_edges);
    if stats.capped_edges > 0 {
        println!("  Capped edges: {}", stats.capped_edges);
    }
}
