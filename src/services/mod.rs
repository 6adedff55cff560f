//! Field extraction services.
//!
//! This module contains the heuristics that turn notice text into fields:
//! - Date normalization (`DateNormalizer`)
//! - Event dates and ranges (`EventDateExtractor`)
//! - Application deadlines (`DeadlineExtractor`)
//! - Venues (`LocationExtractor`)
//! - Target audience and application method (`LineExtractor`)
//! - Categories (`CategoryClassifier`)
//!
//! `NoticeExtractor` wires them together from the configured rule tables.

mod category;
mod dates;
mod deadline;
mod extractor;
mod lines;
mod location;
mod normalizer;

pub use category::CategoryClassifier;
pub use dates::{DateStrategy, EventDateExtractor};
pub use deadline::DeadlineExtractor;
pub use extractor::NoticeExtractor;
pub use lines::{LineExtractor, clean_prefix};
pub use location::LocationExtractor;
pub use normalizer::{DateNormalizer, has_explicit_year};
