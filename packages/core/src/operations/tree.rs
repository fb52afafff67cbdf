//! Tree Mutation Core
//!
//! Pure functions over a [`NodeMap`]: every operation takes the current map
//! by reference and returns a fresh map, never mutating its input. The
//! surrounding application serializes all mutations through a single event
//! loop, so there is no locking discipline here; purity keeps each operation
//! atomic from the caller's point of view (a failed operation leaves nothing
//! observable behind).
//!
//! # Examples
//!
//! ```rust
//! use idiampro_core::models::{NodeType, Outline};
//! use idiampro_core::operations::{create_node, delete_node, Placement};
//!
//! let outline = Outline::new("Notes".to_string());
//! let (nodes, child_id) = create_node(
//!     &outline.nodes,
//!     &outline.root_node_id,
//!     Placement::FirstChild,
//!     NodeType::Document,
//!     "first entry",
//! ).unwrap();
//!
//! let nodes = delete_node(&nodes, &child_id).unwrap();
//! assert_eq!(nodes.len(), 1);
//! ```

use crate::models::{Node, NodeMap, NodeType, NodeUpdate};
use crate::operations::error::TreeError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a newly created node lands relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Next sibling of the anchor (degrades to first child when the anchor
    /// is the root, which has no siblings)
    SiblingAfter,
    /// First child of the anchor
    FirstChild,
}

/// Where a dragged node lands relative to its drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovePosition {
    /// Sibling immediately before the target
    Before,
    /// Sibling immediately after the target
    After,
    /// Last child of the target
    Inside,
}

/// Insert a new node relative to `anchor_id`.
///
/// Returns the updated map and the new node's id.
///
/// # Errors
///
/// Returns `TreeError::NodeNotFound` if `anchor_id` is absent.
pub fn create_node(
    nodes: &NodeMap,
    anchor_id: &str,
    placement: Placement,
    node_type: NodeType,
    content: &str,
) -> Result<(NodeMap, String), TreeError> {
    let anchor = nodes
        .get(anchor_id)
        .ok_or_else(|| TreeError::node_not_found(anchor_id))?;

    let (parent_id, index) = match (placement, anchor.parent_id.as_deref()) {
        (Placement::SiblingAfter, Some(pid)) => {
            let parent = nodes.get(pid).ok_or_else(|| TreeError::node_not_found(pid))?;
            let at = parent
                .children_ids
                .iter()
                .position(|c| c == anchor_id)
                .map(|i| i + 1)
                .unwrap_or(parent.children_ids.len());
            (pid.to_string(), at)
        }
        // The root has no siblings; a sibling insert against it becomes a
        // first child of the root instead.
        (Placement::SiblingAfter, None) | (Placement::FirstChild, _) => {
            (anchor_id.to_string(), 0)
        }
    };

    let node = Node::new(
        node_type,
        String::new(),
        content.to_string(),
        Some(parent_id.clone()),
    );
    let node_id = node.id.clone();

    let mut next = nodes.clone();
    next.insert(node_id.clone(), node);
    if let Some(parent) = next.get_mut(&parent_id) {
        let at = index.min(parent.children_ids.len());
        parent.children_ids.insert(at, node_id.clone());
        parent.modified_at = Utc::now();
    }

    tracing::debug!(node_id = %node_id, parent_id = %parent_id, "created node");
    Ok((next, node_id))
}

/// Remove `node_id` and its whole subtree, splicing it out of the parent's
/// child list.
///
/// # Errors
///
/// - `TreeError::NodeNotFound` if `node_id` is absent (callers must check
///   existence first; delete is not idempotent)
/// - `TreeError::HierarchyViolation` when `node_id` is the root
pub fn delete_node(nodes: &NodeMap, node_id: &str) -> Result<NodeMap, TreeError> {
    let node = nodes
        .get(node_id)
        .ok_or_else(|| TreeError::node_not_found(node_id))?;
    let Some(parent_id) = node.parent_id.clone() else {
        return Err(TreeError::hierarchy_violation(
            "the root node cannot be deleted",
        ));
    };

    let mut next = nodes.clone();
    let subtree = subtree_ids(nodes, node_id);
    for id in &subtree {
        next.remove(id);
    }
    if let Some(parent) = next.get_mut(&parent_id) {
        parent.children_ids.retain(|c| c != node_id);
        parent.modified_at = Utc::now();
    }

    tracing::debug!(node_id, removed = subtree.len(), "deleted subtree");
    Ok(next)
}

/// Move `dragged_id` relative to `target_id`.
///
/// A drop onto the dragged node itself, or anywhere inside its own subtree,
/// returns the map unchanged: the UI treats that as "nothing happened" and
/// the silent no-op is part of the contract.
///
/// # Errors
///
/// - `TreeError::NodeNotFound` if either id is absent
/// - `TreeError::HierarchyViolation` when moving the root, or placing a
///   sibling next to the root
pub fn move_node(
    nodes: &NodeMap,
    dragged_id: &str,
    target_id: &str,
    position: MovePosition,
) -> Result<NodeMap, TreeError> {
    let dragged = nodes
        .get(dragged_id)
        .ok_or_else(|| TreeError::node_not_found(dragged_id))?;
    if !nodes.contains_key(target_id) {
        return Err(TreeError::node_not_found(target_id));
    }
    if dragged.parent_id.is_none() {
        return Err(TreeError::hierarchy_violation(
            "the root node cannot be moved",
        ));
    }

    if dragged_id == target_id || is_descendant(nodes, dragged_id, target_id) {
        tracing::warn!(dragged_id, target_id, "rejected cycle-producing move");
        return Ok(nodes.clone());
    }

    let mut next = nodes.clone();
    detach(&mut next, dragged_id);

    let (new_parent_id, index) = match position {
        MovePosition::Inside => {
            let target = next
                .get(target_id)
                .ok_or_else(|| TreeError::node_not_found(target_id))?;
            (target_id.to_string(), target.children_ids.len())
        }
        MovePosition::Before | MovePosition::After => {
            let parent_id = next
                .get(target_id)
                .and_then(|t| t.parent_id.clone())
                .ok_or_else(|| {
                    TreeError::hierarchy_violation("cannot place a sibling next to the root node")
                })?;
            let parent = next
                .get(&parent_id)
                .ok_or_else(|| TreeError::node_not_found(&parent_id))?;
            let at = parent
                .children_ids
                .iter()
                .position(|c| c == target_id)
                .unwrap_or(parent.children_ids.len());
            let at = if matches!(position, MovePosition::After) {
                at + 1
            } else {
                at
            };
            (parent_id, at)
        }
    };

    if let Some(parent) = next.get_mut(&new_parent_id) {
        let at = index.min(parent.children_ids.len());
        parent.children_ids.insert(at, dragged_id.to_string());
        parent.modified_at = Utc::now();
    }
    if let Some(node) = next.get_mut(dragged_id) {
        node.parent_id = Some(new_parent_id.clone());
        node.modified_at = Utc::now();
    }

    tracing::debug!(dragged_id, target_id, ?position, "moved node");
    Ok(next)
}

/// Indent a node one level: it becomes the last child of its previous
/// sibling. No-op when the node is the first child of its parent (or the
/// root itself).
pub fn indent_node(nodes: &NodeMap, node_id: &str) -> Result<NodeMap, TreeError> {
    let node = nodes
        .get(node_id)
        .ok_or_else(|| TreeError::node_not_found(node_id))?;
    let Some(parent_id) = node.parent_id.as_deref() else {
        return Ok(nodes.clone());
    };
    let parent = nodes
        .get(parent_id)
        .ok_or_else(|| TreeError::node_not_found(parent_id))?;

    let pos = parent
        .children_ids
        .iter()
        .position(|c| c == node_id)
        .ok_or_else(|| {
            TreeError::hierarchy_violation(format!(
                "node {} missing from its parent's child list",
                node_id
            ))
        })?;
    if pos == 0 {
        // First child has no previous sibling to indent under
        return Ok(nodes.clone());
    }

    let anchor = parent.children_ids[pos - 1].clone();
    move_node(nodes, node_id, &anchor, MovePosition::Inside)
}

/// Outdent a node one level: it becomes the next sibling of its former
/// parent. No-op when the parent is the root.
pub fn outdent_node(nodes: &NodeMap, node_id: &str) -> Result<NodeMap, TreeError> {
    let node = nodes
        .get(node_id)
        .ok_or_else(|| TreeError::node_not_found(node_id))?;
    let Some(parent_id) = node.parent_id.as_deref() else {
        return Ok(nodes.clone());
    };
    let parent = nodes
        .get(parent_id)
        .ok_or_else(|| TreeError::node_not_found(parent_id))?;
    if parent.parent_id.is_none() {
        // Already at the top level
        return Ok(nodes.clone());
    }

    move_node(nodes, node_id, parent_id, MovePosition::After)
}

/// Deep-clone the subtree rooted at `node_id` (every id regenerated, the
/// internal parent/child shape preserved) and insert the clone as the next
/// sibling of the original. Returns the clone's root id.
///
/// # Errors
///
/// - `TreeError::NodeNotFound` if `node_id` is absent
/// - `TreeError::HierarchyViolation` when duplicating the root
pub fn duplicate_node(nodes: &NodeMap, node_id: &str) -> Result<(NodeMap, String), TreeError> {
    let node = nodes
        .get(node_id)
        .ok_or_else(|| TreeError::node_not_found(node_id))?;
    let Some(parent_id) = node.parent_id.clone() else {
        return Err(TreeError::hierarchy_violation(
            "the root node cannot be duplicated",
        ));
    };

    let mut next = nodes.clone();
    let clone_id = clone_subtree_into(&mut next, nodes, node_id, &parent_id)
        .ok_or_else(|| TreeError::node_not_found(node_id))?;

    if let Some(parent) = next.get_mut(&parent_id) {
        let at = parent
            .children_ids
            .iter()
            .position(|c| c == node_id)
            .map(|i| i + 1)
            .unwrap_or(parent.children_ids.len());
        parent.children_ids.insert(at, clone_id.clone());
        parent.modified_at = Utc::now();
    }

    tracing::debug!(node_id, clone_id = %clone_id, "duplicated subtree");
    Ok((next, clone_id))
}

/// Apply a field-level [`NodeUpdate`] to one node.
pub fn update_node(
    nodes: &NodeMap,
    node_id: &str,
    update: &NodeUpdate,
) -> Result<NodeMap, TreeError> {
    if update.is_empty() {
        return Ok(nodes.clone());
    }

    let mut next = nodes.clone();
    let node = next
        .get_mut(node_id)
        .ok_or_else(|| TreeError::node_not_found(node_id))?;
    node.apply_update(update);
    Ok(next)
}

/// Ids of `node_id` and all its descendants, in depth-first display order.
///
/// Returns an empty vec when `node_id` is absent.
pub fn subtree_ids(nodes: &NodeMap, node_id: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![node_id.to_string()];
    while let Some(id) = stack.pop() {
        if let Some(node) = nodes.get(&id) {
            // Push children reversed so DFS visits them in display order
            for child in node.children_ids.iter().rev() {
                stack.push(child.clone());
            }
            out.push(id);
        }
    }
    out
}

/// Number of nodes in the subtree rooted at `node_id` (itself included)
pub fn subtree_size(nodes: &NodeMap, node_id: &str) -> usize {
    subtree_ids(nodes, node_id).len()
}

/// Whether `maybe_descendant` lies inside the subtree of `ancestor_id`
/// (a node is not its own descendant).
pub fn is_descendant(nodes: &NodeMap, ancestor_id: &str, maybe_descendant: &str) -> bool {
    if ancestor_id == maybe_descendant {
        return false;
    }
    let mut current = nodes.get(maybe_descendant).and_then(|n| n.parent_id.as_deref());
    let mut hops = 0;
    while let Some(id) = current {
        if id == ancestor_id {
            return true;
        }
        hops += 1;
        if hops > nodes.len() {
            // Corrupted parent chain; treat as unrelated
            return false;
        }
        current = nodes.get(id).and_then(|n| n.parent_id.as_deref());
    }
    false
}

/// Check the five structural invariants of a NodeMap:
/// exactly one root (typed `root`, null parent), bidirectional
/// parent/children agreement, acyclic parent chains, no dangling ids, and
/// no node appearing in more than one child list.
///
/// The test suite runs this after every mutation; callers can use it as a
/// load-time sanity check on deserialized outlines.
pub fn verify_integrity(nodes: &NodeMap) -> Result<(), TreeError> {
    let mut roots = nodes.values().filter(|n| n.parent_id.is_none());
    let root = roots
        .next()
        .ok_or_else(|| TreeError::hierarchy_violation("outline has no root node"))?;
    if roots.next().is_some() {
        return Err(TreeError::hierarchy_violation(
            "outline has more than one root node",
        ));
    }
    if root.node_type != NodeType::Root {
        return Err(TreeError::hierarchy_violation(format!(
            "root node {} does not carry the root type",
            root.id
        )));
    }

    let mut claimed: std::collections::HashSet<&str> = std::collections::HashSet::new();
    for node in nodes.values() {
        if let Some(parent_id) = &node.parent_id {
            let parent = nodes.get(parent_id).ok_or_else(|| {
                TreeError::hierarchy_violation(format!(
                    "node {} has dangling parent reference {}",
                    node.id, parent_id
                ))
            })?;
            if !parent.children_ids.iter().any(|c| c == &node.id) {
                return Err(TreeError::hierarchy_violation(format!(
                    "node {} missing from parent {}'s child list",
                    node.id, parent_id
                )));
            }
        }

        for child_id in &node.children_ids {
            let child = nodes.get(child_id).ok_or_else(|| {
                TreeError::hierarchy_violation(format!(
                    "node {} references dangling child {}",
                    node.id, child_id
                ))
            })?;
            if child.parent_id.as_deref() != Some(node.id.as_str()) {
                return Err(TreeError::hierarchy_violation(format!(
                    "child {} does not point back at parent {}",
                    child_id, node.id
                )));
            }
            if !claimed.insert(child_id.as_str()) {
                return Err(TreeError::hierarchy_violation(format!(
                    "node {} appears in more than one child list",
                    child_id
                )));
            }
        }
    }

    // Every parent chain must terminate at the root within |nodes| hops
    for node in nodes.values() {
        let mut current = node;
        let mut hops = 0;
        while let Some(parent_id) = &current.parent_id {
            current = nodes.get(parent_id).ok_or_else(|| {
                TreeError::hierarchy_violation(format!("dangling parent reference {}", parent_id))
            })?;
            hops += 1;
            if hops > nodes.len() {
                return Err(TreeError::hierarchy_violation(format!(
                    "cycle detected in parent chain of node {}",
                    node.id
                )));
            }
        }
    }

    Ok(())
}

/// Remove `node_id` from its parent's child list (the node itself stays in
/// the map).
fn detach(nodes: &mut NodeMap, node_id: &str) {
    let parent_id = nodes.get(node_id).and_then(|n| n.parent_id.clone());
    if let Some(parent_id) = parent_id {
        if let Some(parent) = nodes.get_mut(&parent_id) {
            parent.children_ids.retain(|c| c != node_id);
        }
    }
}

/// Deep-clone the subtree rooted at `src_id` from `src` into `dst`,
/// regenerating every id and parenting the clone root under
/// `new_parent_id`. The caller wires the returned clone root id into the
/// parent's child list. Returns `None` when `src_id` is absent from `src`.
pub(crate) fn clone_subtree_into(
    dst: &mut NodeMap,
    src: &NodeMap,
    src_id: &str,
    new_parent_id: &str,
) -> Option<String> {
    let original = src.get(src_id)?;
    let now = Utc::now();

    let mut clone = original.clone();
    clone.id = Uuid::new_v4().to_string();
    clone.parent_id = Some(new_parent_id.to_string());
    clone.children_ids = Vec::new();
    clone.created_at = now;
    clone.modified_at = now;

    let clone_id = clone.id.clone();
    dst.insert(clone_id.clone(), clone);

    for child_id in &original.children_ids {
        if let Some(child_clone_id) = clone_subtree_into(dst, src, child_id, &clone_id) {
            if let Some(clone) = dst.get_mut(&clone_id) {
                clone.children_ids.push(child_clone_id);
            }
        }
    }

    Some(clone_id)
}

// Include tests
#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
