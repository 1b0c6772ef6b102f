//! Parsing Strategies
//!
//! Single documents go through [`crate::mapper::parse`]. Batches of
//! independent documents are mapped in parallel here.

pub mod parallel;

pub use parallel::{parse_many, parse_many_text};
