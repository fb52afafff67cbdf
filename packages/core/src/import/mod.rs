//! Document Import

pub mod markdown;

pub use markdown::{infer_node_type, outline_from_markdown, outline_to_markdown};
