// src/models/mod.rs

//! Domain models for the extractor application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod date;
mod notice;
mod record;

// Re-export all public types
pub use config::{
    CategoryRule, CollectorConfig, CompiledPatterns, Config, ExtractorRules, OutputConfig,
    check_reference_year,
};
pub use date::{CANONICAL_FORMAT, NormalizedDate};
pub use notice::{NoticeInput, NoticeRef};
pub use record::{Category, ExtractedRecord};
