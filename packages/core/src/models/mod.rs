//! Data Models
//!
//! Core data structures: the flat node map, the outline document wrapper,
//! and transient selection state.

pub mod node;
pub mod outline;
pub mod selection;

pub use node::{Node, NodeMap, NodeType, NodeUpdate, ValidationError};
pub use outline::Outline;
pub use selection::SelectionState;
