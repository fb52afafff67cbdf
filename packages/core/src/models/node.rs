//! Outline Node Data Structures
//!
//! Defines the core `Node` struct that makes up an outline tree. Nodes carry
//! explicit `parent_id` back-references plus an ordered `children_ids` list,
//! so the tree lives in a flat id-keyed map (see [`NodeMap`]) rather than in
//! nested owned structs. That keeps lookups O(1) and makes reparenting a
//! matter of splicing id lists instead of fighting ownership.
//!
//! # Examples
//!
//! ```rust
//! use idiampro_core::models::{Node, NodeType};
//!
//! let root = Node::new_root("Trip Planning".to_string());
//!
//! let child = Node::new(
//!     NodeType::Document,
//!     "Packing list".to_string(),
//!     "- socks\n- charger".to_string(),
//!     Some(root.id.clone()),
//! );
//! assert_eq!(child.parent_id.as_deref(), Some(root.id.as_str()));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Flat id-keyed collection of every node in one outline.
///
/// Insertion order is irrelevant; display order is carried entirely by each
/// parent's `children_ids`.
pub type NodeMap = HashMap<String, Node>;

/// Default metadata value for serde deserialization (empty object)
fn default_metadata() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Validation errors for Node operations
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid parent reference: {0}")]
    InvalidParent(String),

    #[error("Invalid child reference: {0}")]
    InvalidChild(String),

    #[error("Metadata validation failed: {0}")]
    InvalidMetadata(String),
}

/// How a node's `content` payload should be interpreted by the editor.
///
/// The tag is opaque to the tree model with one exception: exactly one node
/// per outline carries [`NodeType::Root`], and that node is the tree root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Rich-text document content (the common case)
    #[default]
    Document,
    /// Freeform drawing canvas
    Canvas,
    /// Tabular / spreadsheet content
    Spreadsheet,
    /// Image attachment
    Image,
    /// External link (URL lives in `metadata`)
    Link,
    /// Source code snippet
    Code,
    /// Block quotation
    Quote,
    /// Date / scheduling entry
    Date,
    /// The single synthetic root of an outline
    Root,
}

impl NodeType {
    /// Whether this is the synthetic outline root type
    pub fn is_root(&self) -> bool {
        matches!(self, NodeType::Root)
    }
}

/// A single outline entry.
///
/// # Fields
///
/// - `id`: unique identifier (UUID string), immutable for the node's lifetime
/// - `name`: short display label shown in the tree
/// - `content`: serialized rich-text payload; format is opaque to the tree model
/// - `node_type`: editor interpretation tag (see [`NodeType`])
/// - `parent_id`: owning node id; `None` only for the root
/// - `children_ids`: ordered child ids; order IS display order
/// - `is_collapsed`: view state only, never affects tree shape
/// - `color`, `tags`: presentation metadata, not structural
/// - `metadata`: free-form auxiliary fields (url, due date, ...) as a JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier (UUID string)
    pub id: String,

    /// Short display label
    pub name: String,

    /// Serialized rich-text payload (opaque to the tree model)
    #[serde(default)]
    pub content: String,

    /// Editor interpretation tag
    pub node_type: NodeType,

    /// Owning node id (`None` only for the root)
    pub parent_id: Option<String>,

    /// Ordered child ids; sole source of truth for display order
    #[serde(default)]
    pub children_ids: Vec<String>,

    /// Collapsed in the tree view (view state only)
    #[serde(default)]
    pub is_collapsed: bool,

    /// Optional display color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Free-form tag labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Auxiliary fields opaque to the core (url, due date, ...)
    #[serde(default = "default_metadata")]
    pub metadata: serde_json::Value,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl Node {
    /// Create a new node with an auto-generated UUID.
    ///
    /// The node starts with no children; callers are responsible for wiring
    /// it into the parent's `children_ids` (the tree operations do this).
    pub fn new(
        node_type: NodeType,
        name: String,
        content: String,
        parent_id: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            content,
            node_type,
            parent_id,
            children_ids: Vec::new(),
            is_collapsed: false,
            color: None,
            tags: Vec::new(),
            metadata: default_metadata(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Create the synthetic root node of a new outline
    pub fn new_root(name: String) -> Self {
        Self::new(NodeType::Root, name, String::new(), None)
    }

    /// Validate node-local structure and required fields
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if:
    /// - `id` is empty
    /// - `metadata` is not a JSON object
    /// - the node references itself as parent or child
    ///
    /// Whole-tree invariants (bidirectional consistency, acyclicity) are
    /// checked by `operations::verify_integrity`, not here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        // Blank names are valid: nodes created by pressing Enter start
        // empty and get filled in (or deleted) later.

        if !self.metadata.is_object() {
            return Err(ValidationError::InvalidMetadata(
                "metadata must be a JSON object".to_string(),
            ));
        }

        if let Some(parent_id) = &self.parent_id {
            if parent_id == &self.id {
                return Err(ValidationError::InvalidParent(
                    "Node cannot be its own parent".to_string(),
                ));
            }
        }

        if self.children_ids.iter().any(|c| c == &self.id) {
            return Err(ValidationError::InvalidChild(
                "Node cannot be its own child".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether this node is the outline root
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Update the display label
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.modified_at = Utc::now();
    }

    /// Update the content payload
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.modified_at = Utc::now();
    }

    /// Merge fields into metadata (shallow merge)
    pub fn merge_metadata(&mut self, updates: serde_json::Value) {
        if let (Some(existing), Some(new)) = (self.metadata.as_object_mut(), updates.as_object()) {
            for (key, value) in new {
                existing.insert(key.clone(), value.clone());
            }
            self.modified_at = Utc::now();
        }
    }

    /// Apply a partial update, bumping `modified_at` when anything changed
    pub fn apply_update(&mut self, update: &NodeUpdate) {
        if update.is_empty() {
            return;
        }

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        if let Some(node_type) = update.node_type {
            self.node_type = node_type;
        }
        if let Some(is_collapsed) = update.is_collapsed {
            self.is_collapsed = is_collapsed;
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
        if let Some(metadata) = &update.metadata {
            self.merge_metadata(metadata.clone());
        }
        self.modified_at = Utc::now();
    }
}

/// Custom deserializer for optional fields that accepts both plain values and null
///
/// Maps three input formats to the double-Option pattern:
/// - Missing field → None (don't update)
/// - null → Some(None) (clear the field)
/// - "value" → Some(Some("value")) (set the field)
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    // Missing field is handled by #[serde(default)] on the struct field
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Partial node update for field-level edits.
///
/// All fields are optional; only provided fields are applied. Nullable fields
/// (`color`) use a double-`Option`:
///
/// - `None`: don't change the field
/// - `Some(None)`: clear the field
/// - `Some(Some(value))`: set the field
///
/// # Examples
///
/// ```rust
/// use idiampro_core::models::NodeUpdate;
///
/// // Rename only
/// let update = NodeUpdate::new().with_name("Ideas".to_string());
///
/// // Clear the color
/// let update = NodeUpdate {
///     color: Some(None),
///     ..Default::default()
/// };
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    /// Update the display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Update the content payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Update the editor interpretation tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,

    /// Update the collapsed view flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_collapsed: Option<bool>,

    /// Update the display color (double-Option: `Some(None)` clears it)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub color: Option<Option<String>>,

    /// Merge fields into metadata (shallow merge)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl NodeUpdate {
    /// Create a new empty NodeUpdate
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a name update
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Set a content update
    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    /// Set a node type update
    pub fn with_node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = Some(node_type);
        self
    }

    /// Set a color update
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    /// Check if the update contains any changes
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.content.is_none()
            && self.node_type.is_none()
            && self.is_collapsed.is_none()
            && self.color.is_none()
            && self.metadata.is_none()
    }
}
