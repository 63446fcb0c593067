//! C-Force CLI library.
//!
//! This crate provides the interactive terminal host and the batch
//! replay tooling around the session engine.

pub mod cli;
pub mod commands;
pub mod error;
pub mod host;
pub mod render;
pub mod repl;
pub mod report;

pub use error::{CliError, Result};
