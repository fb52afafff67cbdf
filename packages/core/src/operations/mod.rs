//! Tree Mutation Operations
//!
//! Pure functions over a [`crate::models::NodeMap`]: every operation takes
//! the current map by reference and returns a fresh map, leaving the input
//! untouched. Callers own state handling (swap the map in, push the old one
//! onto an undo stack, and so on).

pub mod bulk;
pub mod clipboard;
pub mod error;
pub mod tree;

pub use bulk::{bulk_add_tag, bulk_delete, bulk_indent, bulk_outdent, bulk_set_color};
pub use clipboard::{copy_subtree, cut_subtree, paste_subtree, Clipboard};
pub use error::TreeError;
pub use tree::{
    create_node, delete_node, duplicate_node, indent_node, is_descendant, move_node, outdent_node,
    subtree_ids, subtree_size, update_node, verify_integrity, MovePosition, Placement,
};
