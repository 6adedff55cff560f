//! Utility functions and helpers.

pub mod console;
pub mod text;

pub use text::{contains_any, non_empty, truncate_graphemes};
