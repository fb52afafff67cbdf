//! Multi-Select Bulk Operations
//!
//! Batch variants of the single-node mutations. Selection order is the
//! caller's stable iteration order. A selected id that is ineligible for the
//! operation (no anchor, already at top level, the root, or no longer
//! present) is a silent per-id no-op, never a batch failure.

use crate::models::NodeMap;
use crate::operations::error::TreeError;
use crate::operations::tree::{move_node, subtree_ids, MovePosition};
use chrono::Utc;
use std::collections::HashSet;

/// Indent every selected node under its nearest eligible previous sibling.
///
/// Eligible means "not still pending in this same batch": a previous sibling
/// that is selected but not yet processed is skipped, because it is itself
/// about to move; selections that have already been processed are valid
/// anchors. Given selected siblings `[a, b, c]` with nothing before `a`,
/// `a` stays put while `b` and `c` both end up as children of `a`.
pub fn bulk_indent(nodes: &NodeMap, selected_ids: &[String]) -> Result<NodeMap, TreeError> {
    let mut next = nodes.clone();
    let mut pending: HashSet<&str> = selected_ids.iter().map(String::as_str).collect();

    for id in selected_ids {
        pending.remove(id.as_str());

        let Some(node) = next.get(id) else {
            continue;
        };
        let Some(parent_id) = node.parent_id.clone() else {
            continue;
        };
        let Some(parent) = next.get(&parent_id) else {
            continue;
        };
        let Some(pos) = parent.children_ids.iter().position(|c| c == id) else {
            continue;
        };

        // Nearest previous sibling that is not simultaneously moving
        let anchor = parent.children_ids[..pos]
            .iter()
            .rev()
            .find(|c| !pending.contains(c.as_str()))
            .cloned();
        let Some(anchor) = anchor else {
            tracing::debug!(node_id = %id, "bulk indent: no eligible anchor, skipped");
            continue;
        };

        next = move_node(&next, id, &anchor, MovePosition::Inside)?;
    }

    Ok(next)
}

/// Outdent every selected node one level (next sibling of its former
/// parent). Nodes already directly under the root are skipped.
pub fn bulk_outdent(nodes: &NodeMap, selected_ids: &[String]) -> Result<NodeMap, TreeError> {
    let mut next = nodes.clone();

    for id in selected_ids {
        let Some(node) = next.get(id) else {
            continue;
        };
        let Some(parent_id) = node.parent_id.clone() else {
            continue;
        };
        let Some(parent) = next.get(&parent_id) else {
            continue;
        };
        if parent.parent_id.is_none() {
            tracing::debug!(node_id = %id, "bulk outdent: already at top level, skipped");
            continue;
        }

        next = move_node(&next, id, &parent_id, MovePosition::After)?;
    }

    Ok(next)
}

/// Delete the subtrees of all selected nodes.
///
/// The set of doomed ids is computed against the single before-snapshot the
/// caller sees: a selection that is a descendant of another selection folds
/// into the same removal, and deleting one node never changes the
/// eligibility of a sibling in the same batch. The root is skipped.
pub fn bulk_delete(nodes: &NodeMap, selected_ids: &[String]) -> NodeMap {
    let mut doomed: HashSet<String> = HashSet::new();
    for id in selected_ids {
        let Some(node) = nodes.get(id) else {
            continue;
        };
        if node.parent_id.is_none() {
            tracing::warn!(node_id = %id, "bulk delete: skipped the root node");
            continue;
        }
        doomed.extend(subtree_ids(nodes, id));
    }

    let mut next = nodes.clone();
    for id in &doomed {
        next.remove(id);
    }
    for node in next.values_mut() {
        node.children_ids.retain(|c| !doomed.contains(c));
    }

    tracing::debug!(removed = doomed.len(), "bulk deleted subtrees");
    next
}

/// Set (or clear, with `None`) the display color across the selection
pub fn bulk_set_color(nodes: &NodeMap, selected_ids: &[String], color: Option<&str>) -> NodeMap {
    let mut next = nodes.clone();
    let now = Utc::now();
    for id in selected_ids {
        if let Some(node) = next.get_mut(id) {
            node.color = color.map(str::to_string);
            node.modified_at = now;
        }
    }
    next
}

/// Add a tag across the selection; nodes already carrying the tag are left
/// unchanged.
pub fn bulk_add_tag(nodes: &NodeMap, selected_ids: &[String], tag: &str) -> NodeMap {
    let mut next = nodes.clone();
    let now = Utc::now();
    for id in selected_ids {
        if let Some(node) = next.get_mut(id) {
            if !node.tags.iter().any(|t| t == tag) {
                node.tags.push(tag.to_string());
                node.modified_at = now;
            }
        }
    }
    next
}
