//! DOM arena: slotmap-backed node tree with versioned maps, dirty
//! propagation and incremental rendering.

pub mod node;
pub mod query;
pub mod render;
pub mod tree;

pub use node::{Child, Element, NodeData, NodeId};
pub use render::RenderOutput;
pub use tree::{ChildValue, Dom};
