//! Core data models for the C-Force terminal simulator.
//!
//! This crate provides the plain data types shared by the session engine,
//! the async runtime and the CLI host: prompt contexts, scrollback lines,
//! the fixed findings table and the target exposure classification.

pub mod context;
pub mod finding;
pub mod line;

// Re-export main types
pub use context::{Context, Exposure};
pub use finding::{default_findings, Category, Finding, Severity};
pub use line::{Line, LineKind};
