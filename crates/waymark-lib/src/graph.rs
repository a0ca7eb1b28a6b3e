use serde::Serialize;

use crate::geo::Position;

/// External identifier of a network node.
pub type NodeId = u64;

/// Position of a node inside [`Graph::nodes`].
pub type NodeIndex = usize;

/// Successor lists are bounded by the 16-bit count stored in the binary layout.
pub const MAX_SUCCESSORS: usize = u16::MAX as usize;

/// Out-degree above which a node is reported as a hub by [`Graph::summary`].
const HUB_DEGREE_THRESHOLD: usize = 4;

/// One vertex of the street network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub position: Position,
    successors: Vec<NodeIndex>,
}

/// Result of offering a new edge to a node's successor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    Added,
    Duplicate,
    Capped,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            successors: Vec::new(),
        }
    }

    pub(crate) fn with_successors(mut self, successors: Vec<NodeIndex>) -> Self {
        self.successors = successors;
        self
    }

    /// Outgoing edges in first-discovery order.
    pub fn successors(&self) -> &[NodeIndex] {
        &self.successors
    }

    /// Append `target` unless it is already a successor.
    ///
    /// Membership is a linear scan; street-graph degrees are tiny.
    pub(crate) fn add_successor(&mut self, target: NodeIndex) -> EdgeInsert {
        if self.successors.contains(&target) {
            return EdgeInsert::Duplicate;
        }
        if self.successors.len() >= MAX_SUCCESSORS {
            return EdgeInsert::Capped;
        }
        self.successors.push(target);
        EdgeInsert::Added
    }
}

/// Adjacency-list graph whose nodes are kept sorted ascending by id.
///
/// Successors are indices into the same node array, so the ordering
/// invariant is established once at construction and never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Wrap a node array that is already sorted by id with resolved successors.
    pub(crate) fn from_sorted(nodes: Vec<Node>) -> Self {
        debug_assert!(nodes.windows(2).all(|pair| pair[0].id < pair[1].id));
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Binary search for the index of `id`.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.nodes.binary_search_by_key(&id, |node| node.id).ok()
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    /// Return the successors of the node at `index`.
    pub fn successors(&self, index: NodeIndex) -> &[NodeIndex] {
        self.nodes
            .get(index)
            .map(Node::successors)
            .unwrap_or(&[])
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.successors.len()).sum()
    }

    /// Summarise the graph for diagnostics.
    pub fn summary(&self) -> GraphSummary {
        let hub = self
            .nodes
            .iter()
            .enumerate()
            .find(|(_, node)| node.successors.len() > HUB_DEGREE_THRESHOLD)
            .map(|(index, node)| HubNode {
                index,
                id: node.id,
                name: node.name.clone(),
                neighbours: node
                    .successors
                    .iter()
                    .map(|&succ| self.nodes[succ].id)
                    .collect(),
            });

        GraphSummary {
            node_count: self.nodes.len(),
            edge_count: self.edge_count(),
            max_out_degree: self
                .nodes
                .iter()
                .map(|node| node.successors.len())
                .max()
                .unwrap_or(0),
            first_node: self.nodes.first().map(|node| node.id),
            last_node: self.nodes.last().map(|node| node.id),
            hub,
        }
    }
}

/// First node with more than four successors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubNode {
    pub index: NodeIndex,
    pub id: NodeId,
    pub name: String,
    pub neighbours: Vec<NodeId>,
}

/// Structural overview of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub max_out_degree: usize,
    pub first_node: Option<NodeId>,
    pub last_node: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub: Option<HubNode>,
}
