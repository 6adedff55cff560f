//! Pipeline entry points.
//!
//! - `run_extraction`: Walk a collector and extract a record per notice
//! - `run_validate`: Check configuration and compile every rule table

pub mod extract;
pub mod validate;

pub use extract::{ExtractionOutcome, run_extraction};
pub use validate::run_validate;
