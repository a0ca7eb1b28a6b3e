use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::path::{reconstruct_path, Path};
use crate::search::{CostModel, PathFinder};

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: NodeId,
    pub target: NodeId,
    pub cost: CostModel,
}

impl RouteRequest {
    /// Request using the default hop-count cost model.
    pub fn new(origin: NodeId, target: NodeId) -> Self {
        Self {
            origin,
            target,
            cost: CostModel::default(),
        }
    }

    pub fn with_cost(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub origin: NodeId,
    pub target: NodeId,
    pub cost_model: CostModel,
    /// Search cost of the path (hops or metres, per `cost_model`).
    pub cost: f64,
    /// Nodes expanded by the search.
    pub expanded: usize,
    pub path: Path,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.hop_count()
    }

    /// Great-circle length of the route in metres.
    pub fn total_distance_m(&self) -> f64 {
        self.path.total_m
    }
}

/// Resolve both endpoints, run the search, and reconstruct the path.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let origin = graph
        .index_of(request.origin)
        .ok_or(Error::UnknownNode { id: request.origin })?;
    let target = graph
        .index_of(request.target)
        .ok_or(Error::UnknownNode { id: request.target })?;

    let not_found = || Error::RouteNotFound {
        origin: request.origin,
        target: request.target,
    };

    let mut finder = PathFinder::new(graph).with_cost_model(request.cost);
    let outcome = finder.find(origin, target).ok_or_else(not_found)?;
    let path = reconstruct_path(graph, finder.state(), target).ok_or_else(not_found)?;

    info!(
        origin = request.origin,
        target = request.target,
        hops = outcome.hops,
        distance_m = path.total_m,
        expanded = outcome.expanded,
        "route planned"
    );

    Ok(RoutePlan {
        origin: request.origin,
        target: request.target,
        cost_model: request.cost,
        cost: outcome.cost,
        expanded: outcome.expanded,
        path,
    })
}
