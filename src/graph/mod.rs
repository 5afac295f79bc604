//! In-memory relationship graph: nodes, edges, relationship types and the
//! transient selection/edit state the editor mutates.

mod registry;
mod state;
mod types;

pub use state::GraphState;
pub use types::{Edge, EdgeId, GraphData, Node, NodeId, Position};
