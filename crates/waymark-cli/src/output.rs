//! Output formats and report destinations for the route command.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use waymark_lib::{CostModel, RouteRenderMode};

/// Destination value that sends the report to stdout instead of a file.
pub const STDOUT_MARKER: &str = "-";

/// Report format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Distance header followed by one `Id = ...` line per node.
    #[default]
    Text,
    /// Pretty-printed JSON route summary.
    Json,
    /// GeoJSON LineString feature.
    #[value(name = "geojson")]
    GeoJson,
}

impl From<OutputFormat> for RouteRenderMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => RouteRenderMode::Text,
            OutputFormat::Json => RouteRenderMode::Json,
            OutputFormat::GeoJson => RouteRenderMode::GeoJson,
        }
    }
}

/// Cost model selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CostArg {
    /// Fewest edges, with a planar heuristic.
    #[default]
    Hops,
    /// Shortest great-circle length.
    Distance,
}

impl From<CostArg> for CostModel {
    fn from(cost: CostArg) -> Self {
        match cost {
            CostArg::Hops => CostModel::Hops,
            CostArg::Distance => CostModel::Distance,
        }
    }
}

/// Write a rendered report to `destination`, or to stdout when it is `-`.
///
/// Returns `true` when the report went to a file.
pub fn write_report(destination: &Path, report: &str) -> Result<bool> {
    if destination.as_os_str() == STDOUT_MARKER {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(report.as_bytes())
            .context("failed to write report to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
        return Ok(false);
    }

    fs::write(destination, report)
        .with_context(|| format!("failed to write report to {}", destination.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_maps_to_render_mode() {
        assert_eq!(
            RouteRenderMode::from(OutputFormat::GeoJson),
            RouteRenderMode::GeoJson
        );
        assert_eq!(
            RouteRenderMode::from(OutputFormat::default()),
            RouteRenderMode::Text
        );
    }

    #[test]
    fn cost_arg_maps_to_cost_model() {
        assert_eq!(CostModel::from(CostArg::Distance), CostModel::Distance);
        assert_eq!(CostModel::from(CostArg::default()), CostModel::Hops);
    }

    #[test]
    fn geojson_value_name_is_lowercase() {
        let parsed = OutputFormat::from_str("geojson", false).expect("known format");
        assert_eq!(parsed, OutputFormat::GeoJson);
    }

    #[test]
    fn report_is_written_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("finalpath.txt");

        let wrote_file = write_report(&path, "# report\n").expect("report written");
        assert!(wrote_file);
        assert_eq!(fs::read_to_string(&path).expect("read back"), "# report\n");
    }
}
