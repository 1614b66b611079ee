//! Graph representation module

pub mod model;
pub mod builder;

pub use model::{EdgeKey, Graph, NodeAttributes, Position};
pub use builder::GraphBuilder;
