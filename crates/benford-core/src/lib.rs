//! Shared building blocks for the Benford checker.
//!
//! Holds the error type, the extension-driven delimiter policy, the data
//! model shared by the ingestion crate and the binary, text formatting
//! helpers, and the command-line settings.

pub mod delimiter;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{BenfordError, Result};
