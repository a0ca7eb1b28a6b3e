//! Route command handler for computing paths between node ids.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use waymark_lib::{plan_route, NodeId, RouteRequest, RouteSummary};

use super::GraphSource;
use waymark_cli::output::{write_report, CostArg, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub source: GraphSource,
    /// Origin node id.
    pub from: NodeId,
    /// Destination node id.
    pub to: NodeId,
    /// Report destination, or `-` for stdout.
    pub output: PathBuf,
    pub format: OutputFormat,
    pub cost: CostArg,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from, self.to).with_cost(self.cost.into())
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(args: &RouteCommandArgs) -> Result<()> {
    let loaded = args.source.load()?;

    let start = Instant::now();
    let plan = plan_route(&loaded.graph, &args.to_request())
        .with_context(|| format!("failed to plan a route from {} to {}", args.from, args.to))?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search complete"
    );

    let summary = RouteSummary::from_plan(&loaded.graph, &plan)?;
    let report = summary.render(args.format.into())?;

    if write_report(&args.output, &report)? {
        println!(
            "Route of {} hops ({:.1} m) written to {}",
            plan.hop_count(),
            plan.total_distance_m(),
            args.output.display()
        );
    }
    Ok(())
}
