//! Collector abstraction for notice boards.
//!
//! A collector knows how to walk a board's list pages and resolve each
//! entry into title and body text. Everything browser- or HTML-specific
//! stays behind this trait; the pipeline only sees `NoticeRef` and
//! `NoticeInput`.
//!
//! ## Implementations
//!
//! - `JsonFileCollector`: serves notices exported to a JSON array

pub mod json;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NoticeInput, NoticeRef};

// Re-export for convenience
pub use json::JsonFileCollector;

/// Trait for notice board collectors.
#[async_trait]
pub trait NoticeCollector: Send + Sync {
    /// List the notices on a 1-based list page.
    ///
    /// An empty page marks the end of the board.
    async fn fetch_notice_list(&self, page: usize) -> Result<Vec<NoticeRef>>;

    /// Resolve a list entry into its title and body.
    async fn fetch_notice_detail(&self, notice: &NoticeRef) -> Result<NoticeInput>;
}
