//! Outline Document Model
//!
//! An [`Outline`] is one complete document: the flat node map plus the id of
//! its single root and a little document-level metadata. The struct owns the
//! map and exposes the tree operations as methods that swap in the fresh map
//! each operation returns, so callers that do not manage maps by hand get a
//! conventional mutable document API.

use crate::models::node::{Node, NodeMap, NodeType, NodeUpdate};
use crate::operations::error::TreeError;
use crate::operations::tree::{self, MovePosition, Placement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A complete outline document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    /// Unique outline identifier (UUID)
    pub id: String,

    /// Human-readable outline name
    pub name: String,

    /// Id of the single root node inside `nodes`
    pub root_node_id: String,

    /// All nodes of the document, keyed by id
    pub nodes: NodeMap,

    /// Timestamp of the last structural or content change
    pub last_modified: DateTime<Utc>,
}

impl Outline {
    /// Create an empty outline: one root node, no content yet
    pub fn new(name: String) -> Self {
        let root = Node::new_root(name.clone());
        let root_node_id = root.id.clone();
        let mut nodes = NodeMap::new();
        nodes.insert(root_node_id.clone(), root);

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            root_node_id,
            nodes,
            last_modified: Utc::now(),
        }
    }

    /// Look up a node by id
    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// The root node. Absent only if the map was corrupted externally.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(&self.root_node_id)
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root remains
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn touch(&mut self, next: NodeMap) {
        self.nodes = next;
        self.last_modified = Utc::now();
    }

    /// Create a node relative to `anchor_id`; returns the new node's id
    pub fn create_node(
        &mut self,
        anchor_id: &str,
        placement: Placement,
        node_type: NodeType,
        content: &str,
    ) -> Result<String, TreeError> {
        let (next, id) = tree::create_node(&self.nodes, anchor_id, placement, node_type, content)?;
        self.touch(next);
        Ok(id)
    }

    /// Delete a node and its subtree
    pub fn delete_node(&mut self, node_id: &str) -> Result<(), TreeError> {
        let next = tree::delete_node(&self.nodes, node_id)?;
        self.touch(next);
        Ok(())
    }

    /// Move a node relative to `target_id`
    pub fn move_node(
        &mut self,
        node_id: &str,
        target_id: &str,
        position: MovePosition,
    ) -> Result<(), TreeError> {
        let next = tree::move_node(&self.nodes, node_id, target_id, position)?;
        self.touch(next);
        Ok(())
    }

    /// Indent a node under its previous sibling
    pub fn indent_node(&mut self, node_id: &str) -> Result<(), TreeError> {
        let next = tree::indent_node(&self.nodes, node_id)?;
        self.touch(next);
        Ok(())
    }

    /// Outdent a node to its parent's level
    pub fn outdent_node(&mut self, node_id: &str) -> Result<(), TreeError> {
        let next = tree::outdent_node(&self.nodes, node_id)?;
        self.touch(next);
        Ok(())
    }

    /// Duplicate a node's subtree; returns the duplicate root's id
    pub fn duplicate_node(&mut self, node_id: &str) -> Result<String, TreeError> {
        let (next, id) = tree::duplicate_node(&self.nodes, node_id)?;
        self.touch(next);
        Ok(id)
    }

    /// Apply a field-level update to one node
    pub fn update_node(&mut self, node_id: &str, update: &NodeUpdate) -> Result<(), TreeError> {
        let next = tree::update_node(&self.nodes, node_id, update)?;
        self.touch(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_outline_has_single_root() {
        let outline = Outline::new("Notes".to_string());
        assert_eq!(outline.len(), 1);
        assert!(outline.is_empty());

        let root = outline.root().unwrap();
        assert_eq!(root.name, "Notes");
        assert!(root.is_root());
        assert!(root.parent_id.is_none());
    }

    #[test]
    fn test_outline_methods_swap_map_and_bump_timestamp() {
        let mut outline = Outline::new("Doc".to_string());
        let before = outline.last_modified;
        let root_id = outline.root_node_id.clone();

        let a = outline
            .create_node(&root_id, Placement::FirstChild, NodeType::Document, "a")
            .unwrap();
        assert_eq!(outline.len(), 2);
        assert!(outline.last_modified >= before);
        assert_eq!(outline.node(&a).unwrap().parent_id.as_deref(), Some(root_id.as_str()));

        outline.delete_node(&a).unwrap();
        assert!(outline.is_empty());
    }

    #[test]
    fn test_outline_rejects_root_delete() {
        let mut outline = Outline::new("Doc".to_string());
        let root_id = outline.root_node_id.clone();
        let err = outline.delete_node(&root_id).unwrap_err();
        assert!(matches!(err, TreeError::HierarchyViolation(_)));
        assert_eq!(outline.len(), 1);
    }

    #[test]
    fn test_outline_json_round_trip() {
        let mut outline = Outline::new("Serde".to_string());
        let root_id = outline.root_node_id.clone();
        outline
            .create_node(&root_id, Placement::FirstChild, NodeType::Code, "fn main() {}")
            .unwrap();

        let json = serde_json::to_string(&outline).unwrap();
        assert!(json.contains("\"rootNodeId\""));
        assert!(json.contains("\"lastModified\""));

        let back: Outline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outline);
    }
}
