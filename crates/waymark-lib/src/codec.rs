//! Compact binary persistence for [`Graph`].
//!
//! The layout is purely positional: no magic, no version and no checksum.
//! All integers are fixed width and little-endian.
//!
//! ```text
//! u64 node_count
//! repeated node_count times, in ascending id order:
//!   u64 id
//!   f64 lat
//!   f64 lon
//!   u16 successor_count
//!   u32 name_len
//!   name_len bytes of UTF-8 name
//!   successor_count x u64 successor index
//! ```
//!
//! The variable-length name belongs to the node record and sits between the
//! fixed fields and the successor indices, so successors do not follow the
//! fixed fields directly.
//!
//! Decoding validates everything it reads: truncated input, successor
//! indices outside the node array, ids out of order and trailing bytes are
//! all reported as [`Error::GraphDecode`] instead of producing a partial
//! graph.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::Position;
use crate::graph::{Graph, Node, NodeId, NodeIndex};

/// Size of the leading node count.
const COUNT_SIZE: usize = 8;

/// Size of the fixed part of a node record (id, lat, lon, nsucc, name_len).
const FIXED_RECORD_SIZE: usize = 8 + 8 + 8 + 2 + 4;

/// Size of one successor index.
const SUCCESSOR_SIZE: usize = 8;

/// Derive the binary graph path for a text map: `andorra.csv` -> `andorra.csv.bin`.
pub fn graph_path_for(map_path: &Path) -> PathBuf {
    let mut path = map_path.as_os_str().to_owned();
    path.push(".bin");
    PathBuf::from(path)
}

/// Number of bytes [`encode_graph`] produces for `graph`.
pub fn encoded_len(graph: &Graph) -> usize {
    COUNT_SIZE
        + graph
            .nodes()
            .iter()
            .map(|node| {
                FIXED_RECORD_SIZE + node.name.len() + node.successors().len() * SUCCESSOR_SIZE
            })
            .sum::<usize>()
}

/// Encode a graph into a freshly allocated buffer.
pub fn encode_graph(graph: &Graph) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(encoded_len(graph));
    write_graph(graph, &mut buffer)?;
    Ok(buffer)
}

/// Stream a graph into `writer`.
pub fn write_graph<W: Write>(graph: &Graph, writer: &mut W) -> Result<()> {
    writer.write_all(&(graph.len() as u64).to_le_bytes())?;

    for node in graph.nodes() {
        let successor_count =
            u16::try_from(node.successors().len()).map_err(|_| Error::GraphEncode {
                message: format!(
                    "node {} has {} successors, more than a u16 can count",
                    node.id,
                    node.successors().len()
                ),
            })?;
        let name_len = u32::try_from(node.name.len()).map_err(|_| Error::GraphEncode {
            message: format!("name of node {} is too long", node.id),
        })?;

        writer.write_all(&node.id.to_le_bytes())?;
        writer.write_all(&node.position.lat.to_le_bytes())?;
        writer.write_all(&node.position.lon.to_le_bytes())?;
        writer.write_all(&successor_count.to_le_bytes())?;
        writer.write_all(&name_len.to_le_bytes())?;
        writer.write_all(node.name.as_bytes())?;
        for &successor in node.successors() {
            writer.write_all(&(successor as u64).to_le_bytes())?;
        }
    }

    Ok(())
}

/// Cursor over an input buffer that reports truncation with its offset.
struct ByteReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::decode(
                self.offset,
                format!(
                    "truncated input: needed {} bytes, {} available",
                    len,
                    self.remaining()
                ),
            ));
        }
        let bytes = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u16(&mut self) -> Result<u16> {
        self.array().map(u16::from_le_bytes)
    }

    fn u32(&mut self) -> Result<u32> {
        self.array().map(u32::from_le_bytes)
    }

    fn u64(&mut self) -> Result<u64> {
        self.array().map(u64::from_le_bytes)
    }

    fn f64(&mut self) -> Result<f64> {
        self.array().map(f64::from_le_bytes)
    }
}

/// Decode a graph previously produced by [`encode_graph`].
///
/// Search state is not part of the layout, so the returned graph is ready for
/// a fresh query.
pub fn decode_graph(bytes: &[u8]) -> Result<Graph> {
    let mut reader = ByteReader::new(bytes);

    let raw_count = reader.u64()?;
    // Every node needs at least its fixed record; refuse to allocate for
    // counts the input cannot possibly hold.
    let max_nodes = reader.remaining() / FIXED_RECORD_SIZE;
    let count = usize::try_from(raw_count)
        .ok()
        .filter(|&count| count <= max_nodes)
        .ok_or_else(|| {
            Error::decode(
                0,
                format!(
                    "node count {} exceeds what {} remaining bytes can hold",
                    raw_count,
                    reader.remaining()
                ),
            )
        })?;

    let mut nodes = Vec::with_capacity(count);
    // Marks the successors of the node being decoded; cleared after each node.
    let mut seen = vec![false; count];
    let mut previous_id: Option<NodeId> = None;

    for index in 0..count {
        let record_offset = reader.offset;
        let id = reader.u64()?;
        let lat = reader.f64()?;
        let lon = reader.f64()?;
        let successor_count = reader.u16()? as usize;
        let name_len = reader.u32()? as usize;

        if previous_id.is_some_and(|previous| previous >= id) {
            return Err(Error::decode(
                record_offset,
                format!("node ids out of order: {} follows {:?}", id, previous_id),
            ));
        }
        previous_id = Some(id);

        let name_offset = reader.offset;
        let name = std::str::from_utf8(reader.take(name_len)?)
            .map_err(|e| Error::decode(name_offset, format!("node {} name: {}", id, e)))?
            .to_string();

        let mut successors: Vec<NodeIndex> = Vec::with_capacity(successor_count);
        for _ in 0..successor_count {
            let successor_offset = reader.offset;
            let raw = reader.u64()?;
            let successor = usize::try_from(raw)
                .ok()
                .filter(|&successor| successor < count)
                .ok_or_else(|| {
                    Error::decode(
                        successor_offset,
                        format!(
                            "successor index {} of node {} is outside {} nodes",
                            raw, id, count
                        ),
                    )
                })?;
            if successor == index {
                return Err(Error::decode(
                    successor_offset,
                    format!("node {} lists itself as a successor", id),
                ));
            }
            if seen[successor] {
                return Err(Error::decode(
                    successor_offset,
                    format!("node {} lists successor {} twice", id, successor),
                ));
            }
            seen[successor] = true;
            successors.push(successor);
        }
        for &successor in &successors {
            seen[successor] = false;
        }

        nodes.push(Node::new(id, name, Position::new(lat, lon)).with_successors(successors));
    }

    if reader.remaining() > 0 {
        return Err(Error::decode(
            reader.offset,
            format!("{} trailing bytes after last node", reader.remaining()),
        ));
    }

    Ok(Graph::from_sorted(nodes))
}

/// Write a graph to `path`, replacing any existing file.
pub fn save_graph(graph: &Graph, path: &Path) -> Result<()> {
    info!(
        path = %path.display(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        "saving binary graph"
    );

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_graph(graph, &mut writer)?;
    writer.flush()?;

    info!(file_size = encoded_len(graph), "binary graph saved");
    Ok(())
}

/// Load a graph written by [`save_graph`].
pub fn load_graph(path: &Path) -> Result<Graph> {
    debug!(path = %path.display(), "loading binary graph");

    let bytes = std::fs::read(path).map_err(|e| Error::GraphLoad {
        path: path.to_path_buf(),
        message: format!("failed to read file: {}", e),
    })?;
    let graph = decode_graph(&bytes)?;

    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        bytes = bytes.len(),
        "loaded binary graph"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MAX_SUCCESSORS;
    use crate::ingest::GraphBuilder;

    fn sample_graph() -> Graph {
        let mut builder = GraphBuilder::new();
        builder.add_node(10, "Plaça", Position::new(42.5, 1.5));
        builder.add_node(20, "", Position::new(42.6, 1.6));
        builder.add_node(30, "Carrer Major", Position::new(42.7, 1.7));
        builder.add_way([10, 20, 30], false);
        builder.add_way([30, 10], true);
        builder.finish().graph
    }

    #[test]
    fn round_trip_preserves_nodes_and_successor_order() {
        let graph = sample_graph();
        let bytes = encode_graph(&graph).expect("encode");
        assert_eq!(bytes.len(), encoded_len(&graph));

        let decoded = decode_graph(&bytes).expect("decode");
        assert_eq!(decoded, graph);
        assert_eq!(decoded.successors(2), &[1, 0]);
    }

    #[test]
    fn empty_graph_round_trips() {
        let bytes = encode_graph(&Graph::default()).expect("encode");
        assert_eq!(bytes, 0u64.to_le_bytes());
        assert!(decode_graph(&bytes).expect("decode").is_empty());
    }

    #[test]
    fn every_truncation_is_rejected() {
        let bytes = encode_graph(&sample_graph()).expect("encode");
        for len in 0..bytes.len() {
            let result = decode_graph(&bytes[..len]);
            assert!(
                matches!(result, Err(Error::GraphDecode { .. })),
                "truncation at {len} was accepted"
            );
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode_graph(&sample_graph()).expect("encode");
        bytes.push(0);
        let error = decode_graph(&bytes).expect_err("trailing byte");
        assert!(error.to_string().contains("trailing"));
    }

    #[test]
    fn huge_node_count_is_rejected_without_allocating() {
        let bytes = u64::MAX.to_le_bytes();
        let error = decode_graph(&bytes).expect_err("absurd count");
        assert!(error.to_string().contains("node count"));
    }

    #[test]
    fn out_of_range_successor_is_rejected() {
        let mut bytes = encode_graph(&sample_graph()).expect("encode");
        // Last eight bytes are the final successor index of the last node.
        let len = bytes.len();
        bytes[len - 8..].copy_from_slice(&99u64.to_le_bytes());
        let error = decode_graph(&bytes).expect_err("bad successor");
        assert!(error.to_string().contains("outside"));
    }

    #[test]
    fn unsorted_ids_are_rejected() {
        let mut bytes = encode_graph(&sample_graph()).expect("encode");
        // Overwrite the first node id with one larger than its successor record.
        bytes[COUNT_SIZE..COUNT_SIZE + 8].copy_from_slice(&25u64.to_le_bytes());
        let error = decode_graph(&bytes).expect_err("unsorted");
        assert!(error.to_string().contains("out of order"));
    }

    #[test]
    fn hub_with_maximum_successors_round_trips() {
        let hub_successors: Vec<NodeIndex> = (1..=MAX_SUCCESSORS).collect();
        let mut nodes = vec![Node::new(0, "hub", Position::new(0.0, 0.0))
            .with_successors(hub_successors)];
        nodes.extend(
            (1..=MAX_SUCCESSORS as NodeId).map(|id| Node::new(id, "", Position::new(0.0, 1.0))),
        );
        // Indices already listed by the hub may appear again on other nodes.
        nodes[1] = nodes[1].clone().with_successors(vec![0, 2]);
        let graph = Graph::from_sorted(nodes);

        let bytes = encode_graph(&graph).expect("encode");
        let decoded = decode_graph(&bytes).expect("decode");
        assert_eq!(decoded.successors(0).len(), MAX_SUCCESSORS);
        assert_eq!(decoded, graph);
    }

    #[test]
    fn repeated_successor_is_rejected() {
        let graph = Graph::from_sorted(vec![
            Node::new(1, "", Position::new(0.0, 0.0)).with_successors(vec![1, 1]),
            Node::new(2, "", Position::new(0.0, 1.0)),
        ]);
        let bytes = encode_graph(&graph).expect("encode");
        let error = decode_graph(&bytes).expect_err("repeated successor");
        assert!(error.to_string().contains("twice"));
    }

    #[test]
    fn graph_path_appends_bin_extension() {
        assert_eq!(
            graph_path_for(Path::new("maps/andorra.csv")),
            PathBuf::from("maps/andorra.csv.bin")
        );
    }
}
