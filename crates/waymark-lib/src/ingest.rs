//! Build a [`Graph`] from the pipe-delimited street-network text format.
//!
//! ```text
//! # comment lines start with '#'
//! node|<id>|<name>|f3|f4|f5|f6|f7|f8|<lat>|<lon>|...
//! way|f1|f2|f3|f4|f5|f6|<oneway flag>|f8|<id0>|<id1>|<id2>|...
//! ```
//!
//! The oneway flag is either empty (edges in both directions) or the literal
//! `oneway`; any other value discards the whole way. Node records are
//! collected first and sorted by id, and only then are way chains resolved
//! into successor indices, so ways may reference nodes that appear later in
//! the input. Malformed records are counted in [`IngestStats`] and skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geo::Position;
use crate::graph::{EdgeInsert, Graph, Node, NodeId, NodeIndex};

const NODE_TAG: &str = "node";
const WAY_TAG: &str = "way";
const COMMENT_PREFIX: char = '#';
const ONEWAY_FLAG: &str = "oneway";

const NODE_ID_FIELD: usize = 1;
const NODE_NAME_FIELD: usize = 2;
const NODE_LAT_FIELD: usize = 9;
const NODE_LON_FIELD: usize = 10;
const WAY_ONEWAY_FIELD: usize = 7;
const WAY_FIRST_ID_FIELD: usize = 9;

/// Counters collected while ingesting a text map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub node_records: usize,
    pub way_records: usize,
    pub comments: usize,
    /// Lines that are neither nodes, ways, nor comments.
    pub other_records: usize,
    /// Node or way records that did not match the grammar.
    pub skipped_records: usize,
    pub duplicate_nodes: usize,
    /// Consecutive way pairs skipped because an id did not resolve.
    pub missing_references: usize,
    pub self_loops: usize,
    pub duplicate_edges: usize,
    pub capped_edges: usize,
    pub edges: usize,
}

/// Graph produced by ingestion together with its counters.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub graph: Graph,
    pub stats: IngestStats,
}

/// One parsed text line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Record {
    Blank,
    Comment,
    Node {
        id: NodeId,
        name: String,
        position: Position,
    },
    Way {
        oneway: bool,
        chain: Vec<Option<NodeId>>,
    },
    Other,
    Malformed,
}

pub(crate) fn parse_record(line: &str) -> Record {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.is_empty() {
        return Record::Blank;
    }
    if line.starts_with(COMMENT_PREFIX) {
        return Record::Comment;
    }

    let fields: Vec<&str> = line.split('|').collect();
    match fields[0] {
        NODE_TAG => parse_node(&fields).unwrap_or(Record::Malformed),
        WAY_TAG => parse_way(&fields).unwrap_or(Record::Malformed),
        _ => Record::Other,
    }
}

fn parse_node(fields: &[&str]) -> Option<Record> {
    let id = parse_id(fields.get(NODE_ID_FIELD)?)?;
    let name = fields.get(NODE_NAME_FIELD)?.to_string();
    let lat = parse_coordinate(fields.get(NODE_LAT_FIELD)?)?;
    let lon = parse_coordinate(fields.get(NODE_LON_FIELD)?)?;

    Some(Record::Node {
        id,
        name,
        position: Position::new(lat, lon),
    })
}

fn parse_way(fields: &[&str]) -> Option<Record> {
    let oneway = match *fields.get(WAY_ONEWAY_FIELD)? {
        "" => false,
        ONEWAY_FLAG => true,
        _ => return None,
    };

    let ids = fields.get(WAY_FIRST_ID_FIELD..)?;
    if ids.is_empty() {
        return None;
    }

    Some(Record::Way {
        oneway,
        chain: ids.iter().map(|field| parse_id(field)).collect(),
    })
}

fn parse_id(field: &str) -> Option<NodeId> {
    field.trim().parse().ok()
}

fn parse_coordinate(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Debug, Clone)]
struct PendingWay {
    oneway: bool,
    chain: Vec<Option<NodeId>>,
}

/// Accumulates nodes and ways, then resolves edges in [`GraphBuilder::finish`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    ways: Vec<PendingWay>,
    stats: IngestStats,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. Later records with an id already seen are dropped.
    pub fn add_node(&mut self, id: NodeId, name: impl Into<String>, position: Position) {
        self.stats.node_records += 1;
        self.nodes.push(Node::new(id, name, position));
    }

    /// Register an ordered chain of node ids forming one way.
    pub fn add_way(&mut self, chain: impl IntoIterator<Item = NodeId>, oneway: bool) {
        self.stats.way_records += 1;
        self.ways.push(PendingWay {
            oneway,
            chain: chain.into_iter().map(Some).collect(),
        });
    }

    /// Parse one line of the text format and record its contents.
    fn add_line(&mut self, line_no: usize, line: &str) {
        match parse_record(line) {
            Record::Blank => {}
            Record::Comment => self.stats.comments += 1,
            Record::Node { id, name, position } => self.add_node(id, name, position),
            Record::Way { oneway, chain } => {
                self.stats.way_records += 1;
                self.ways.push(PendingWay { oneway, chain });
            }
            Record::Other => self.stats.other_records += 1,
            Record::Malformed => {
                debug!(line = line_no, "skipping malformed record");
                self.stats.skipped_records += 1;
            }
        }
    }

    /// Sort the nodes, resolve every way into edges and produce the graph.
    pub fn finish(self) -> IngestReport {
        let GraphBuilder {
            mut nodes,
            ways,
            mut stats,
        } = self;

        // Stable sort keeps the first record of a duplicated id in front.
        nodes.sort_by_key(|node| node.id);
        let before = nodes.len();
        nodes.dedup_by_key(|node| node.id);
        stats.duplicate_nodes = before - nodes.len();
        if stats.duplicate_nodes > 0 {
            warn!(
                duplicates = stats.duplicate_nodes,
                "dropped node records with repeated ids"
            );
        }

        for way in &ways {
            let indices: Vec<Option<NodeIndex>> = way
                .chain
                .iter()
                .map(|id| id.and_then(|id| lookup(&nodes, id)))
                .collect();

            let mut links = indices.into_iter();
            let Some(mut origin) = links.next() else {
                continue;
            };
            for dest in links {
                match (origin, dest) {
                    (Some(from), Some(to)) if from == to => stats.self_loops += 1,
                    (Some(from), Some(to)) => {
                        connect(&mut nodes, from, to, &mut stats);
                        if !way.oneway {
                            connect(&mut nodes, to, from, &mut stats);
                        }
                    }
                    _ => stats.missing_references += 1,
                }
                origin = dest;
            }
        }

        let graph = Graph::from_sorted(nodes);
        info!(
            nodes = graph.len(),
            ways = stats.way_records,
            edges = stats.edges,
            skipped = stats.skipped_records,
            "built graph from text map"
        );

        IngestReport { graph, stats }
    }
}

fn lookup(nodes: &[Node], id: NodeId) -> Option<NodeIndex> {
    nodes.binary_search_by_key(&id, |node| node.id).ok()
}

fn connect(nodes: &mut [Node], from: NodeIndex, to: NodeIndex, stats: &mut IngestStats) {
    match nodes[from].add_successor(to) {
        EdgeInsert::Added => stats.edges += 1,
        EdgeInsert::Duplicate => stats.duplicate_edges += 1,
        EdgeInsert::Capped => stats.capped_edges += 1,
    }
}

/// Build a graph from any buffered reader producing the text format.
///
/// Invalid UTF-8 is replaced rather than rejected; such lines simply fail to
/// parse and are skipped like any other malformed record.
pub fn build_graph_from_reader<R: BufRead>(mut reader: R) -> Result<IngestReport> {
    let mut builder = GraphBuilder::new();
    let mut buffer = Vec::new();
    let mut line_no = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_no += 1;
        builder.add_line(line_no, &String::from_utf8_lossy(&buffer));
    }

    Ok(builder.finish())
}

/// Build a graph from an in-memory text map.
pub fn build_graph_from_str(text: &str) -> IngestReport {
    let mut builder = GraphBuilder::new();
    for (line_no, line) in text.lines().enumerate() {
        builder.add_line(line_no + 1, line);
    }
    builder.finish()
}

/// Read and build a graph from a text map on disk.
pub fn load_graph_from_text(path: &Path) -> Result<IngestReport> {
    debug!(path = %path.display(), "loading text map");
    let file = File::open(path).map_err(|error| match error.kind() {
        std::io::ErrorKind::NotFound => Error::MapNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(error),
    })?;
    build_graph_from_reader(BufReader::new(file))
}
