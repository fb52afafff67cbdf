//! IdiamPro Core
//!
//! In-memory tree engine for an outliner: a flat, id-keyed node map with
//! bidirectional parent/child links, pure-function mutations over it
//! (create, delete, move, indent/outdent, duplicate), a subtree clipboard,
//! multi-select bulk operations, and markdown import/export.
//!
//! Every mutation takes the current [`models::NodeMap`] by reference and
//! returns a fresh map; the input is never modified. [`models::Outline`]
//! wraps the map in a conventional document API for callers that prefer
//! methods over free functions.

pub mod import;
pub mod models;
pub mod operations;
pub mod utils;

pub use import::{outline_from_markdown, outline_to_markdown};
pub use models::{Node, NodeMap, NodeType, NodeUpdate, Outline, SelectionState, ValidationError};
pub use operations::{
    bulk_add_tag, bulk_delete, bulk_indent, bulk_outdent, bulk_set_color, copy_subtree,
    create_node, cut_subtree, delete_node, duplicate_node, indent_node, is_descendant, move_node,
    outdent_node,
    paste_subtree, subtree_ids, subtree_size, update_node, verify_integrity, Clipboard,
    MovePosition, Placement, TreeError,
};
