use std::fmt::Write;

use serde::Serialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::routing::RoutePlan;
use crate::search::CostModel;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteRenderMode {
    /// Line-oriented report: a distance header followed by one line per node.
    #[default]
    Text,
    Json,
    /// GeoJSON `Feature` with a `LineString` geometry, ready for map viewers.
    GeoJson,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub cumulative_m: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub origin: RouteEndpoint,
    pub target: RouteEndpoint,
    pub cost_model: CostModel,
    pub hops: usize,
    pub total_distance_m: f64,
    pub steps: Vec<RouteStep>,
}

fn label(graph: &Graph, id: NodeId) -> Option<String> {
    graph
        .node_by_id(id)
        .map(|node| node.name.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with resolved node names.
    pub fn from_plan(graph: &Graph, plan: &RoutePlan) -> Result<Self> {
        if plan.path.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let steps = plan
            .path
            .steps
            .iter()
            .map(|step| RouteStep {
                index: step.index,
                id: step.id,
                name: label(graph, step.id),
                lat: step.position.lat,
                lon: step.position.lon,
                cumulative_m: step.cumulative_m,
            })
            .collect();

        Ok(Self {
            origin: RouteEndpoint {
                id: plan.origin,
                name: label(graph, plan.origin),
            },
            target: RouteEndpoint {
                id: plan.target,
                name: label(graph, plan.target),
            },
            cost_model: plan.cost_model,
            hops: plan.hop_count(),
            total_distance_m: plan.total_distance_m(),
            steps,
        })
    }

    /// Render the summary using the requested mode.
    pub fn render(&self, mode: RouteRenderMode) -> Result<String> {
        match mode {
            RouteRenderMode::Text => Ok(self.render_text()),
            RouteRenderMode::Json => Ok(serde_json::to_string_pretty(self)? + "\n"),
            RouteRenderMode::GeoJson => self.render_geojson(),
        }
    }

    fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "# Distance from {} to {}: {:.6} meters.",
            self.origin.id, self.target.id, self.total_distance_m
        );
        let _ = writeln!(buffer, "# Optimal path:");
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "Id = {} | {:.6} | {:.6} | Dist = {:.6}",
                step.id, step.lat, step.lon, step.cumulative_m
            );
        }
        buffer
    }

    fn render_geojson(&self) -> Result<String> {
        let coordinates: Vec<[f64; 2]> = self
            .steps
            .iter()
            .map(|step| [step.lon, step.lat])
            .collect();
        let node_ids: Vec<NodeId> = self.steps.iter().map(|step| step.id).collect();

        let feature = json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {
                "origin": self.origin.id,
                "target": self.target.id,
                "hops": self.hops,
                "total_distance_m": self.total_distance_m,
                "node_ids": node_ids,
            },
        });
        Ok(serde_json::to_string_pretty(&feature)? + "\n")
    }
}
