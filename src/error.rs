//! Typed errors surfaced by the library boundary

use thiserror::Error;

/// Errors raised while loading and validating an input graph
#[derive(Debug, Error)]
pub enum LoadError {
    /// A node position that cannot be projected (NaN or infinite coordinate)
    #[error("node `{id}` has a non-finite position ({x}, {y})")]
    InvalidPosition { id: String, x: f64, y: f64 },

    /// A node size that cannot be scaled or aggregated
    #[error("node `{id}` has a non-finite size ({size})")]
    InvalidSize { id: String, size: f64 },

    /// The same node id appeared more than once in the input
    #[error("duplicate node id `{id}`")]
    DuplicateNode { id: String },

    /// An edge referenced a node id that was never declared
    #[error("edge ({src}, {target}) references unknown node `{missing}`")]
    UnknownEndpoint {
        src: String,
        target: String,
        missing: String,
    },

    /// The input declared no nodes, so no size extent can be fit
    #[error("graph file contains no nodes")]
    EmptyGraph,

    /// The graph file could not be read
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    /// The graph file could not be parsed as a node/edge list
    #[error("failed to parse graph file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while validating a level hierarchy configuration
#[derive(Debug, Error, PartialEq)]
pub enum HierarchyError {
    /// The configuration declared no levels at all
    #[error("at least one ratio threshold is required")]
    NoLevels,

    /// Ratio thresholds must form a strictly ascending sequence
    #[error("ratio thresholds must be strictly ascending (violated at index {index})")]
    UnorderedThresholds { index: usize },

    /// The per-level radius increment was NaN, infinite or negative
    #[error("radius step must be a finite, non-negative number (got {got})")]
    InvalidRadiusStep { got: f64 },
}
