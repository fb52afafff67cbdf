//! Tree Operation Error Types
//!
//! Error taxonomy for the mutation core. Two things can go wrong with a
//! well-formed tree: a referenced id is absent from the map, or the requested
//! change would break a structural invariant (deleting or reparenting the
//! root). Cycle-producing moves are deliberately NOT errors; `move_node`
//! treats them as silent no-ops so drag-and-drop callers can rely on
//! "nothing happened" semantics.

use thiserror::Error;

/// Errors produced by the tree mutation operations
#[derive(Error, Debug)]
pub enum TreeError {
    /// Referenced node id absent from the map
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Operation would break a structural invariant
    #[error("Hierarchy constraint violated: {0}")]
    HierarchyViolation(String),
}

impl TreeError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a hierarchy violation error
    pub fn hierarchy_violation(msg: impl Into<String>) -> Self {
        Self::HierarchyViolation(msg.into())
    }
}
