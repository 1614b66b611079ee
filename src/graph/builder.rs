//! Validated incremental graph construction

use crate::error::LoadError;
use crate::graph::{Graph, NodeAttributes, Position};

/// Default display color for nodes declared without one
pub const DEFAULT_NODE_COLOR: &str = "#999";

/// Builder for incrementally constructing a validated Graph.
///
/// Every record-level check the load path performs lives here: positions and
/// sizes must be finite (an unprojectable coordinate is fatal, per the load
/// contract), node ids must be unique, and edges may only reference declared
/// nodes. Duplicate edges accumulate weight instead of erroring.
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Create a new builder with pre-allocated node capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            graph: Graph::with_capacity(node_count, edge_count),
        }
    }

    /// Declare a node.
    ///
    /// The raw size is stored as both `size` and `original_size`; the load
    /// path rescales `size` once the size scale has been fit.
    pub fn add_node(
        &mut self,
        id: &str,
        x: f64,
        y: f64,
        size: f64,
        color: Option<String>,
        label: Option<String>,
    ) -> Result<(), LoadError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(LoadError::InvalidPosition {
                id: id.to_string(),
                x,
                y,
            });
        }

        if !size.is_finite() {
            return Err(LoadError::InvalidSize {
                id: id.to_string(),
                size,
            });
        }

        if self.graph.contains_node(id) {
            return Err(LoadError::DuplicateNode { id: id.to_string() });
        }

        self.graph.insert_node(
            id,
            NodeAttributes {
                position: Position { x, y },
                size,
                original_size: size,
                color: color.unwrap_or_else(|| DEFAULT_NODE_COLOR.to_string()),
                label,
            },
        );

        Ok(())
    }

    /// Declare an edge between two previously declared nodes
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<(), LoadError> {
        for endpoint in [source, target] {
            if !self.graph.contains_node(endpoint) {
                return Err(LoadError::UnknownEndpoint {
                    src: source.to_string(),
                    target: target.to_string(),
                    missing: endpoint.to_string(),
                });
            }
        }

        self.graph.upsert_edge(source, target, weight);

        Ok(())
    }

    /// Finish construction
    pub fn build(self) -> Result<Graph, LoadError> {
        if self.graph.node_count() == 0 {
            return Err(LoadError::EmptyGraph);
        }

        Ok(self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_position() {
        let mut builder = GraphBuilder::with_capacity(1, 0);
        let err = builder
            .add_node("a", f64::NAN, 0.0, 1.0, None, None)
            .unwrap_err();

        assert!(matches!(err, LoadError::InvalidPosition { .. }));
    }

    #[test]
    fn rejects_duplicate_node_id() {
        let mut builder = GraphBuilder::with_capacity(2, 0);
        builder.add_node("a", 0.0, 0.0, 1.0, None, None).unwrap();
        let err = builder.add_node("a", 1.0, 1.0, 2.0, None, None).unwrap_err();

        assert!(matches!(err, LoadError::DuplicateNode { .. }));
    }

    #[test]
    fn rejects_edge_to_unknown_node() {
        let mut builder = GraphBuilder::with_capacity(1, 1);
        builder.add_node("a", 0.0, 0.0, 1.0, None, None).unwrap();
        let err = builder.add_edge("a", "ghost", 1.0).unwrap_err();

        assert!(matches!(err, LoadError::UnknownEndpoint { missing, .. } if missing == "ghost"));
    }

    #[test]
    fn rejects_empty_graph() {
        let builder = GraphBuilder::with_capacity(0, 0);
        assert!(matches!(builder.build(), Err(LoadError::EmptyGraph)));
    }

    #[test]
    fn duplicate_edges_accumulate() {
        let mut builder = GraphBuilder::with_capacity(2, 1);
        builder.add_node("a", 0.0, 0.0, 1.0, None, None).unwrap();
        builder.add_node("b", 1.0, 0.0, 1.0, None, None).unwrap();
        builder.add_edge("a", "b", 1.0).unwrap();
        builder.add_edge("b", "a", 2.0).unwrap();

        let graph = builder.build().unwrap();
        assert_eq!(graph.edge_weight("a", "b"), Some(3.0));
    }
}
