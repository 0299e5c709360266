// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # fabric-copy
//!
//! Compiles connector source and sink descriptions into copy activity
//! pipeline documents, and publishes them to a workspace.
//!
//! ## Features
//!
//! - **Eight connectors**: SharePoint, S3, Lakehouse, HTTP, REST, FileSystem,
//!   MySQL and Google Cloud Storage, each a typed, validated model
//! - **File addressing**: file path, wildcard, prefix and file list strategies
//! - **Formats**: delimited text, JSON, binary, Parquet and Avro
//! - **Deterministic output**: the same model always compiles to the same document
//! - **Publishing**: create or update pipelines through the workspace items API
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fabric_copy::pipeline::{compile_pipeline, CopyActivityConfig};
//! use fabric_copy::sink::SinkModel;
//! use fabric_copy::source::SourceModel;
//! use serde_json::json;
//!
//! let source = SourceModel::from_config("MySQL", json!({
//!     "connection_id": "mysql-conn",
//!     "table_name": "orders"
//! }))?;
//! let sink = SinkModel::from_config("Lakehouse", json!({
//!     "lakehouse_name": "Sales",
//!     "workspace_id": "ws-1",
//!     "artifact_id": "lh-1",
//!     "root_folder": "Tables",
//!     "table_config": {"table_name": "orders"}
//! }))?;
//!
//! let pipeline = compile_pipeline(&source, &sink, &CopyActivityConfig::default(), None);
//! println!("{}", pipeline.to_json_string(true)?);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Copy job (YAML)  →  SourceModel / SinkModel  →  Pipeline  →  API │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────┬───────┴──────┬───────────┬─────────────┐
//! │  Path     │  Format  │   Dataset    │ Fragment  │  Client     │
//! ├───────────┼──────────┼──────────────┼───────────┼─────────────┤
//! │ FilePath  │ Delimited│ Connection   │ Ordered   │ List items  │
//! │ Wildcard  │ Json     │ Lakehouse    │ keys      │ Create      │
//! │ Prefix    │ Binary   │ Schema       │ Optional  │ Update      │
//! │ ListFiles │ Parquet  │ placeholder  │ omission  │ definition  │
//! └───────────┴──────────┴──────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connector configuration building blocks
pub mod config;

/// File format kinds and their settings
pub mod format;

/// File path addressing strategies
pub mod path;

/// Ordered JSON fragments
pub mod fragment;

/// Dataset settings and references
pub mod dataset;

/// Connector registry
pub mod connectors;

/// Source connector models
pub mod source;

/// Sink connector models
pub mod sink;

/// Copy activity and pipeline assembly
pub mod pipeline;

/// Orchestration API client
pub mod client;

/// Copy job loader
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use connectors::ConnectorKind;
pub use fragment::CompiledActivityFragment;
pub use loader::{load_copy_job, load_copy_job_from_str, CopyJob};
pub use pipeline::{compile_pipeline, CopyActivityConfig, PipelineDefinition};
pub use sink::{CopySink, SinkModel};
pub use source::{CopySource, SourceModel};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
