//! Turn the parent links left by a search into an ordered path with
//! great-circle distance accounting.

use serde::Serialize;

use crate::geo::{haversine_m, Position};
use crate::graph::{Graph, NodeId, NodeIndex};
use crate::search::SearchState;

/// One node along a reconstructed path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathStep {
    /// Zero-based position along the path.
    pub index: usize,
    #[serde(skip)]
    pub node: NodeIndex,
    pub id: NodeId,
    #[serde(flatten)]
    pub position: Position,
    /// Distance from the previous step in metres (zero for the origin).
    pub leg_m: f64,
    /// Distance from the origin in metres.
    pub cumulative_m: f64,
}

/// Ordered path from origin to target.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Path {
    pub steps: Vec<PathStep>,
    pub total_m: f64,
}

impl Path {
    /// Build a path over `nodes`, computing leg and cumulative distances.
    pub fn from_nodes(graph: &Graph, nodes: &[NodeIndex]) -> Self {
        let mut steps = Vec::with_capacity(nodes.len());
        let mut cumulative_m = 0.0;
        let mut previous: Option<Position> = None;

        for (index, &node) in nodes.iter().enumerate() {
            let record = &graph.nodes()[node];
            let leg_m = previous
                .map(|from| haversine_m(from, record.position))
                .unwrap_or(0.0);
            cumulative_m += leg_m;
            previous = Some(record.position);

            steps.push(PathStep {
                index,
                node,
                id: record.id,
                position: record.position,
                leg_m,
                cumulative_m,
            });
        }

        Self {
            steps,
            total_m: cumulative_m,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.steps.iter().map(|step| step.id).collect()
    }
}

/// Follow parent links backwards from `target` and return the path from the
/// search origin to `target`.
///
/// Returns `None` when `target` was never reached by the search that filled
/// `state`.
pub fn reconstruct_path(graph: &Graph, state: &SearchState, target: NodeIndex) -> Option<Path> {
    let target_state = state.get(target)?;
    let hops = target_state.g? as usize;

    let mut chain = Vec::with_capacity(hops + 1);
    let mut current = Some(target);
    while let Some(node) = current {
        // A well-formed parent chain is acyclic and visits each node once.
        if chain.len() > graph.len() {
            return None;
        }
        chain.push(node);
        current = state.get(node).and_then(|node_state| node_state.parent);
    }
    chain.reverse();

    Some(Path::from_nodes(graph, &chain))
}
