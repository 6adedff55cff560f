// src/lib.rs

//! Notice Extractor Library
//!
//! Pulls event dates, deadline, venue, audience, application method and a
//! category out of free-form Korean university notices.

pub mod collector;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
