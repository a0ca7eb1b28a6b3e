mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::build::{handle_build, BuildArgs};
use commands::inspect::{handle_inspect, InspectArgs};
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::GraphSource;
use waymark_cli::output::{CostArg, OutputFormat};
use waymark_lib::NodeId;

#[derive(Parser, Debug)]
#[command(author, version, about = "Street-network graph builder and route planner")]
struct Cli {
    /// Only log warnings and errors unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest a text map and write its binary graph.
    Build {
        /// Text map to ingest.
        #[arg(default_value = "andorra.csv")]
        map: PathBuf,
        /// Binary graph destination (defaults to MAP with `.bin` appended).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Compute a route between two node ids.
    Route {
        #[command(flatten)]
        source: GraphSource,
        /// Origin node id.
        #[arg(long = "from")]
        from: NodeId,
        /// Destination node id.
        #[arg(long = "to")]
        to: NodeId,
        /// Report destination; `-` writes to stdout.
        #[arg(long, short, default_value = "finalpath.txt")]
        output: PathBuf,
        /// Report format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Cost model used by the search.
        #[arg(long, value_enum, default_value_t = CostArg::Hops)]
        cost: CostArg,
    },
    /// Print a structural summary of a graph.
    Inspect {
        #[command(flatten)]
        source: GraphSource,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match cli.command {
        Command::Build { map, output } => handle_build(&BuildArgs { map, output }),
        Command::Route {
            source,
            from,
            to,
            output,
            format,
            cost,
        } => handle_route_command(&RouteCommandArgs {
            source,
            from,
            to,
            output,
            format,
            cost,
        }),
        Command::Inspect { source, json } => handle_inspect(&InspectArgs { source, json }),
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
