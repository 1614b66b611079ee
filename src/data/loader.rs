//! Load and validate a serialized graph, then fit the render-size scale

use itertools::{Itertools, MinMaxResult};
use log;

use crate::data::GraphFile;
use crate::error::LoadError;
use crate::graph::{Graph, GraphBuilder};
use crate::scale::SizeScale;

/// A validated graph together with the size scale fit over its extent.
///
/// The scale is fit exactly once, over the raw sizes of the loaded (level-0)
/// graph, and reused unchanged for every coarser level.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub scale: SizeScale,
}

/// Load a graph from a JSON node/edge list on disk
pub fn load_graph(path: &str, size_range: (f64, f64)) -> Result<LoadedGraph, LoadError> {
    log::info!("Reading graph file: {}", path);

    let text = std::fs::read_to_string(path)?;
    let file: GraphFile = serde_json::from_str(&text)?;

    load_records(&file, size_range)
}

/// Build a validated graph from parsed records.
///
/// All load-time failures are fatal here: a position that cannot be
/// projected would otherwise only surface mid-pass. After validation the
/// raw size of each node is stamped as its `original_size` and the render
/// `size` is rewritten through the freshly fit scale.
pub fn load_records(file: &GraphFile, size_range: (f64, f64)) -> Result<LoadedGraph, LoadError> {
    log::info!(
        "Building graph from {} node and {} edge records",
        file.nodes.len(),
        file.edges.len()
    );

    let mut builder = GraphBuilder::with_capacity(file.nodes.len(), file.edges.len());

    for node in &file.nodes {
        builder.add_node(
            &node.id,
            node.x,
            node.y,
            node.size,
            node.color.clone(),
            node.label.clone(),
        )?;
    }

    for edge in &file.edges {
        builder.add_edge(&edge.source, &edge.target, edge.weight.unwrap_or(1.0))?;
    }

    let mut graph = builder.build()?;

    // Fit the render-size scale over the raw size extent
    let extent = match file.nodes.iter().map(|node| node.size).minmax() {
        MinMaxResult::NoElements => return Err(LoadError::EmptyGraph),
        MinMaxResult::OneElement(only) => (only, only),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let scale = SizeScale::fit(extent, size_range);

    graph.for_each_node_mut(|_, attributes| {
        attributes.size = scale.apply(attributes.original_size);
    });

    log::info!(
        "Loaded graph with {} nodes and {} edges (size extent {:?})",
        graph.node_count(),
        graph.edge_count(),
        extent
    );

    Ok(LoadedGraph { graph, scale })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EdgeRecord, NodeRecord};

    fn record(id: &str, x: f64, size: f64) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            x,
            y: 0.0,
            size,
            original_size: None,
            color: None,
            label: None,
        }
    }

    #[test]
    fn loads_and_rescales_sizes() {
        let file = GraphFile {
            nodes: vec![record("a", 0.0, 1.0), record("b", 10.0, 9.0)],
            edges: vec![EdgeRecord {
                source: "a".to_string(),
                target: "b".to_string(),
                weight: None,
            }],
        };

        let loaded = load_records(&file, (4.0, 20.0)).unwrap();

        let a = loaded.graph.node("a").unwrap();
        let b = loaded.graph.node("b").unwrap();
        assert_eq!(a.original_size, 1.0);
        assert_eq!(a.size, 4.0);
        assert_eq!(b.original_size, 9.0);
        assert_eq!(b.size, 20.0);

        // Missing weight defaults to 1.0
        assert_eq!(loaded.graph.edge_weight("a", "b"), Some(1.0));
    }

    #[test]
    fn parses_the_minimal_json_shape() {
        let text = r#"{
            "nodes": [
                {"id": "a", "x": 0.0, "y": 0.0, "size": 2.0},
                {"id": "b", "x": 1.0, "y": 1.0, "size": 3.0, "label": "B"}
            ],
            "edges": [
                {"source": "a", "target": "b", "weight": 2.5}
            ]
        }"#;

        let file: GraphFile = serde_json::from_str(text).unwrap();
        let loaded = load_records(&file, (4.0, 20.0)).unwrap();

        assert_eq!(loaded.graph.node_count(), 2);
        assert_eq!(loaded.graph.edge_weight("a", "b"), Some(2.5));
        assert_eq!(loaded.graph.node("b").unwrap().label.as_deref(), Some("B"));
    }

    #[test]
    fn rejects_unprojectable_positions() {
        let file = GraphFile {
            nodes: vec![record("a", f64::INFINITY, 1.0)],
            edges: vec![],
        };

        let err = load_records(&file, (4.0, 20.0)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPosition { .. }));
    }

    #[test]
    fn rejects_edges_to_undeclared_nodes() {
        let file = GraphFile {
            nodes: vec![record("a", 0.0, 1.0)],
            edges: vec![EdgeRecord {
                source: "a".to_string(),
                target: "missing".to_string(),
                weight: None,
            }],
        };

        let err = load_records(&file, (4.0, 20.0)).unwrap_err();
        assert!(matches!(err, LoadError::UnknownEndpoint { .. }));
    }

    #[test]
    fn rejects_an_empty_node_list() {
        let file = GraphFile {
            nodes: vec![],
            edges: vec![],
        };

        let err = load_records(&file, (4.0, 20.0)).unwrap_err();
        assert!(matches!(err, LoadError::EmptyGraph));
    }

    #[test]
    fn snapshot_records_round_trip() {
        let file = GraphFile {
            nodes: vec![record("a", 0.0, 1.0), record("b", 10.0, 9.0)],
            edges: vec![EdgeRecord {
                source: "a".to_string(),
                target: "b".to_string(),
                weight: Some(2.0),
            }],
        };
        let loaded = load_records(&file, (4.0, 20.0)).unwrap();

        let snapshot = GraphFile::from_graph(&loaded.graph);
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].weight, Some(2.0));
        assert_eq!(snapshot.nodes[0].original_size, Some(1.0));
    }
}
