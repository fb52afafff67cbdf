//! Selection State
//!
//! Tracks the focused node plus an ordered multi-selection. Selection is
//! transient UI state: it is kept separate from the outline and never
//! serialized with it. Order of `selected_ids` is click order, which the
//! bulk operations rely on.

use crate::models::node::NodeMap;

/// Focused node and ordered multi-selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Node with keyboard focus, if any
    pub current_node_id: Option<String>,

    /// Multi-selected node ids, in selection order, no duplicates
    pub selected_ids: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus a single node and collapse the multi-selection onto it
    pub fn select(&mut self, node_id: &str) {
        self.current_node_id = Some(node_id.to_string());
        self.selected_ids = vec![node_id.to_string()];
    }

    /// Toggle a node in or out of the multi-selection (ctrl-click)
    pub fn toggle(&mut self, node_id: &str) {
        if let Some(pos) = self.selected_ids.iter().position(|id| id == node_id) {
            self.selected_ids.remove(pos);
            if self.current_node_id.as_deref() == Some(node_id) {
                self.current_node_id = self.selected_ids.last().cloned();
            }
        } else {
            self.selected_ids.push(node_id.to_string());
            self.current_node_id = Some(node_id.to_string());
        }
    }

    pub fn is_selected(&self, node_id: &str) -> bool {
        self.selected_ids.iter().any(|id| id == node_id)
    }

    pub fn clear(&mut self) {
        self.current_node_id = None;
        self.selected_ids.clear();
    }

    /// Drop ids that no longer exist in the map (after deletes, undo, import)
    pub fn retain_existing(&mut self, nodes: &NodeMap) {
        self.selected_ids.retain(|id| nodes.contains_key(id));
        if let Some(current) = &self.current_node_id {
            if !nodes.contains_key(current) {
                self.current_node_id = self.selected_ids.last().cloned();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node::Node;

    #[test]
    fn test_select_collapses_multi_selection() {
        let mut sel = SelectionState::new();
        sel.toggle("a");
        sel.toggle("b");
        assert_eq!(sel.selected_ids, vec!["a", "b"]);

        sel.select("c");
        assert_eq!(sel.selected_ids, vec!["c"]);
        assert_eq!(sel.current_node_id.as_deref(), Some("c"));
    }

    #[test]
    fn test_toggle_preserves_click_order_and_removes() {
        let mut sel = SelectionState::new();
        sel.toggle("a");
        sel.toggle("b");
        sel.toggle("c");
        sel.toggle("b");

        assert_eq!(sel.selected_ids, vec!["a", "c"]);
        assert!(!sel.is_selected("b"));
        assert_eq!(sel.current_node_id.as_deref(), Some("c"));
    }

    #[test]
    fn test_retain_existing_drops_stale_ids() {
        let root = Node::new_root("Sel".to_string());
        let root_id = root.id.clone();
        let mut nodes = NodeMap::new();
        nodes.insert(root_id.clone(), root);

        let mut sel = SelectionState::new();
        sel.toggle(&root_id);
        sel.toggle("deleted");
        sel.retain_existing(&nodes);

        assert_eq!(sel.selected_ids, vec![root_id.clone()]);
        assert_eq!(sel.current_node_id, Some(root_id));
    }
}
