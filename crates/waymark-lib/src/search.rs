//! A* search over a [`Graph`].
//!
//! Per-query bookkeeping lives in a [`SearchState`] side table keyed by node
//! index rather than on the nodes themselves, so one graph can answer any
//! number of queries. [`PathFinder`] resets that table before every run.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::frontier::Frontier;
use crate::geo::Position;
use crate::graph::{Graph, NodeIndex};

/// How path cost is accumulated during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// `g` counts hops and `h` is the planar distance in degrees to the
    /// target. A node is never reopened once discovered, which is optimal for
    /// hop count because every edge costs one.
    #[default]
    Hops,
    /// `g` accumulates great-circle metres and `h` is the great-circle
    /// distance to the target. Nodes are relaxed whenever a cheaper path is
    /// found.
    Distance,
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CostModel::Hops => "hops",
            CostModel::Distance => "distance",
        };
        f.write_str(value)
    }
}

/// Search bookkeeping for one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeState {
    /// Hop count from the origin; `None` while the node is unvisited.
    pub g: Option<u32>,
    /// Accumulated cost under the active [`CostModel`].
    pub cost: f64,
    /// Heuristic estimate to the target.
    pub h: f64,
    /// `cost + h`.
    pub f: f64,
    /// Predecessor on the best known path.
    pub parent: Option<NodeIndex>,
}

impl NodeState {
    pub fn is_visited(&self) -> bool {
        self.g.is_some()
    }
}

/// Side table of [`NodeState`] indexed like [`Graph::nodes`].
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    nodes: Vec<NodeState>,
}

impl SearchState {
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![NodeState::default(); len],
        }
    }

    /// Mark every node unvisited, resizing to `len` entries.
    pub fn reset(&mut self, len: usize) {
        self.nodes.clear();
        self.nodes.resize(len, NodeState::default());
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: NodeIndex) -> Option<&NodeState> {
        self.nodes.get(index)
    }

    /// Number of visited nodes.
    pub fn visited(&self) -> usize {
        self.nodes.iter().filter(|state| state.is_visited()).count()
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub target: NodeIndex,
    /// Hop count of the found path.
    pub hops: u32,
    /// Cost of the found path under the active [`CostModel`].
    pub cost: f64,
    /// Nodes removed from the frontier before the target.
    pub expanded: usize,
}

/// Runs A* queries against one graph, reusing its buffers between queries.
#[derive(Debug)]
pub struct PathFinder<'g> {
    graph: &'g Graph,
    cost_model: CostModel,
    state: SearchState,
    frontier: Frontier,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            cost_model: CostModel::default(),
            state: SearchState::new(graph.len()),
            frontier: Frontier::new(),
        }
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Search state left behind by the most recent query.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Search from `origin` to `target`; `None` when the target is unreachable
    /// or either index is outside the graph.
    pub fn find(&mut self, origin: NodeIndex, target: NodeIndex) -> Option<SearchOutcome> {
        self.state.reset(self.graph.len());
        self.frontier.clear();

        if origin >= self.graph.len() || target >= self.graph.len() {
            return None;
        }

        let outcome = match self.cost_model {
            CostModel::Hops => self.run_hops(origin, target),
            CostModel::Distance => self.run_distance(origin, target),
        };

        debug!(
            origin,
            target,
            cost_model = %self.cost_model,
            found = outcome.is_some(),
            visited = self.state.visited(),
            "search finished"
        );
        outcome
    }

    fn position(&self, index: NodeIndex) -> Position {
        self.graph.nodes()[index].position
    }

    fn run_hops(&mut self, origin: NodeIndex, target: NodeIndex) -> Option<SearchOutcome> {
        let graph = self.graph;
        let goal = self.position(target);
        let h = self.position(origin).planar_distance_to(&goal);
        self.state.nodes[origin] = NodeState {
            g: Some(0),
            cost: 0.0,
            h,
            f: h,
            parent: None,
        };
        self.frontier.push(origin, h);

        let mut expanded = 0;
        while let Some(current) = self.frontier.pop() {
            expanded += 1;
            let current_state = self.state.nodes[current];
            let Some(current_g) = current_state.g else {
                continue;
            };

            if current == target {
                return Some(SearchOutcome {
                    target,
                    hops: current_g,
                    cost: current_state.cost,
                    expanded,
                });
            }

            for &next in graph.successors(current) {
                if self.state.nodes[next].is_visited() {
                    continue;
                }
                let g = current_g + 1;
                let h = self.position(next).planar_distance_to(&goal);
                let f = g as f64 + h;
                self.state.nodes[next] = NodeState {
                    g: Some(g),
                    cost: g as f64,
                    h,
                    f,
                    parent: Some(current),
                };
                self.frontier.push(next, f);
            }
        }

        None
    }

    fn run_distance(&mut self, origin: NodeIndex, target: NodeIndex) -> Option<SearchOutcome> {
        let graph = self.graph;
        let goal = self.position(target);
        let h = self.position(origin).haversine_to(&goal);
        self.state.nodes[origin] = NodeState {
            g: Some(0),
            cost: 0.0,
            h,
            f: h,
            parent: None,
        };
        self.frontier.push(origin, h);

        let mut expanded = 0;
        while let Some((current, f)) = self.frontier.pop_entry() {
            let current_state = self.state.nodes[current];
            let Some(current_g) = current_state.g else {
                continue;
            };
            // A cheaper path was found after this entry was queued.
            if f > current_state.f {
                continue;
            }
            expanded += 1;

            if current == target {
                return Some(SearchOutcome {
                    target,
                    hops: current_g,
                    cost: current_state.cost,
                    expanded,
                });
            }

            let here = self.position(current);
            for &next in graph.successors(current) {
                let there = self.position(next);
                let tentative = current_state.cost + here.haversine_to(&there);
                let known = self.state.nodes[next];
                if known.is_visited() && tentative >= known.cost {
                    continue;
                }
                let h = there.haversine_to(&goal);
                let f = tentative + h;
                self.state.nodes[next] = NodeState {
                    g: Some(current_g + 1),
                    cost: tentative,
                    h,
                    f,
                    parent: Some(current),
                };
                self.frontier.push(next, f);
            }
        }

        None
    }
}
