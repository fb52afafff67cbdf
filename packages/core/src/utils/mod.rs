//! Utility Functions

pub mod markdown;

pub use markdown::strip_markdown;
