//! Serialization support, enabled with the `serialize` feature.
//!
//! A graph is serialized as its sorted node list followed by its sorted edge list, as
//! `(source, destination, weight)` triples. Deserializing rebuilds the graph through
//! [`Graph::insert_node`] and [`Graph::insert_edge`], so duplicate entries are ignored and edges
//! referring to undeclared nodes are rejected.
use crate::Graph;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
#[serde(rename = "Graph")]
struct GraphRef<'a, N, E> {
    nodes: Vec<&'a N>,
    edges: Vec<(&'a N, &'a N, &'a E)>,
}

#[derive(Deserialize)]
#[serde(rename = "Graph")]
struct SerializedGraph<N, E> {
    nodes: Vec<N>,
    edges: Vec<(N, N, E)>,
}

impl<N: Serialize, E: Serialize> Serialize for Graph<N, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphRef {
            nodes: self.nodes().collect(),
            edges: self.iter().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, N, E> Deserialize<'de> for Graph<N, E>
where
    N: Ord + Deserialize<'de>,
    E: Ord + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let SerializedGraph { nodes, edges } = SerializedGraph::<N, E>::deserialize(deserializer)?;
        let mut graph = Graph::from_nodes(nodes);
        for (src, dst, weight) in edges {
            graph.insert_edge(&src, &dst, weight).map_err(D::Error::custom)?;
        }
        Ok(graph)
    }
}

/// Serializes a graph to a writer using CBOR format.
///
/// # Arguments
///
/// * `writer` - The writer to which the serialized data will be written.
/// * `graph` - The graph to serialize.
pub fn to_writer<N: Serialize, E: Serialize>(
    writer: impl std::io::Write,
    graph: &Graph<N, E>,
) -> Result<(), serde_cbor::Error> {
    serde_cbor::to_writer(writer, graph)
}

/// Deserializes a graph from a reader using CBOR format.
///
/// # Arguments
///
/// * `reader` - The reader from which the serialized data will be read.
pub fn from_reader<N, E>(reader: impl std::io::Read) -> Result<Graph<N, E>, serde_cbor::Error>
where
    N: Ord + for<'de> Deserialize<'de>,
    E: Ord + for<'de> Deserialize<'de>,
{
    serde_cbor::from_reader(reader)
}
