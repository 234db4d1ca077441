//! Data ingestion layer for the Benford checker.
//!
//! Reads uploads, splits them into rows, validates their structure, builds
//! the cleaned dataset and runs the first-digit analysis pipeline.

pub mod analysis;
pub mod analyzer;
pub mod cleaned;
pub mod numeric;
pub mod reader;
pub mod splitter;
pub mod validator;

pub use benford_core as core;
