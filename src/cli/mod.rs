//! CLI module
//!
//! Command-line interface for compiling and publishing copy jobs.
//!
//! # Commands
//!
//! - `compile` - Print the pipeline document for a copy job
//! - `validate` - Check a copy job and build its connector models
//! - `deploy` - Create or update the pipeline in a workspace
//! - `connectors` - List known connectors

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
