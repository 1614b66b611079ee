//! Input graph format and loading

pub mod loader;

pub use loader::{load_graph, load_records, LoadedGraph};

use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// One node of the serialized node/edge list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique node id
    pub id: String,

    /// Graph-space x coordinate
    pub x: f64,

    /// Graph-space y coordinate
    pub y: f64,

    /// Node size; raw data units on input, render units on export
    pub size: f64,

    /// Conserved aggregation mass; only present on exported snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<f64>,

    /// Display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One edge of the serialized node/edge list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Edge weight; a missing weight counts as 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// The on-disk node/edge list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphFile {
    /// Serialize a graph back into record form, e.g. for level snapshots
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .node_ids()
            .filter_map(|id| graph.node(id).map(|attributes| (id, attributes)))
            .map(|(id, attributes)| NodeRecord {
                id: id.to_string(),
                x: attributes.position.x,
                y: attributes.position.y,
                size: attributes.size,
                original_size: Some(attributes.original_size),
                color: Some(attributes.color.clone()),
                label: attributes.label.clone(),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(source, target, weight)| EdgeRecord {
                source: source.to_string(),
                target: target.to_string(),
                weight: Some(weight),
            })
            .collect();

        Self { nodes, edges }
    }
}
