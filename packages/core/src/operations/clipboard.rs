//! Subtree Clipboard
//!
//! Copy/cut/paste for whole subtrees. The clipboard holds a detached
//! snapshot (ids preserved at snapshot time); paste deep-clones the snapshot
//! with fresh ids, so a single snapshot can be pasted any number of times.
//! Clipboard state is transient application state: it is never serialized
//! with the outline, and clearing it after a cut-paste is the caller's
//! convention, not enforced here.

use crate::models::NodeMap;
use crate::operations::error::TreeError;
use crate::operations::tree::{clone_subtree_into, delete_node, subtree_ids};
use chrono::Utc;

/// Detached snapshot of one subtree.
///
/// `nodes` contains the snapshot root and all its descendants, keyed by
/// their original ids; the snapshot root's `parent_id` is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    root_id: String,
    nodes: NodeMap,
    cut: bool,
}

impl Clipboard {
    /// Id the snapshot root had in the source outline
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// Number of nodes in the snapshot
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the snapshot came from a cut (the source subtree was removed)
    pub fn is_cut(&self) -> bool {
        self.cut
    }
}

/// Snapshot the subtree rooted at `node_id` without touching the source map.
///
/// # Errors
///
/// Returns `TreeError::NodeNotFound` if `node_id` is absent.
pub fn copy_subtree(nodes: &NodeMap, node_id: &str) -> Result<Clipboard, TreeError> {
    if !nodes.contains_key(node_id) {
        return Err(TreeError::node_not_found(node_id));
    }

    let mut snapshot = NodeMap::new();
    for id in subtree_ids(nodes, node_id) {
        if let Some(node) = nodes.get(&id) {
            snapshot.insert(id.clone(), node.clone());
        }
    }
    // Detach: the snapshot root belongs to no parent
    if let Some(root) = snapshot.get_mut(node_id) {
        root.parent_id = None;
    }

    tracing::debug!(node_id, size = snapshot.len(), "copied subtree to clipboard");
    Ok(Clipboard {
        root_id: node_id.to_string(),
        nodes: snapshot,
        cut: false,
    })
}

/// Snapshot then delete the subtree rooted at `node_id`.
///
/// Composed atomically: if the delete is rejected (root node, absent id)
/// the error propagates and no intermediate state is observable.
///
/// # Errors
///
/// - `TreeError::NodeNotFound` if `node_id` is absent
/// - `TreeError::HierarchyViolation` when cutting the root
pub fn cut_subtree(nodes: &NodeMap, node_id: &str) -> Result<(NodeMap, Clipboard), TreeError> {
    let next = delete_node(nodes, node_id)?;
    let mut clipboard = copy_subtree(nodes, node_id)?;
    clipboard.cut = true;

    tracing::debug!(node_id, "cut subtree to clipboard");
    Ok((next, clipboard))
}

/// Deep-clone the clipboard snapshot (fresh ids throughout) and append it as
/// the last child of `target_id`. Returns the pasted root's new id.
///
/// Idempotent over the clipboard: pasting twice inserts two independent
/// copies.
///
/// # Errors
///
/// - `TreeError::NodeNotFound` if `target_id` is absent
/// - `TreeError::HierarchyViolation` when the snapshot is empty
pub fn paste_subtree(
    nodes: &NodeMap,
    target_id: &str,
    clipboard: &Clipboard,
) -> Result<(NodeMap, String), TreeError> {
    if !nodes.contains_key(target_id) {
        return Err(TreeError::node_not_found(target_id));
    }
    if clipboard.is_empty() {
        return Err(TreeError::hierarchy_violation(
            "clipboard snapshot is empty",
        ));
    }

    let mut next = nodes.clone();
    let pasted_id = clone_subtree_into(&mut next, &clipboard.nodes, &clipboard.root_id, target_id)
        .ok_or_else(|| TreeError::node_not_found(&clipboard.root_id))?;

    if let Some(target) = next.get_mut(target_id) {
        target.children_ids.push(pasted_id.clone());
        target.modified_at = Utc::now();
    }

    tracing::debug!(target_id, pasted_id = %pasted_id, "pasted subtree");
    Ok((next, pasted_id))
}
