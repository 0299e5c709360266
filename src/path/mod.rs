//! Path addressing module
//!
//! Supports: exact file path, wildcard, prefix, list of files
//!
//! # Overview
//!
//! File-based connectors identify what to read with one of four addressing
//! strategies. A strategy is accepted from a flat, loosely typed
//! [`FilePathConfig`] and validated into the [`PathAddressing`] sum type when
//! the model is constructed, so a half-specified strategy never reaches the
//! compiler. [`resolve`] then splits a strategy into the dataset `location`
//! keys and the `storeSettings` keys the copy activity schema expects.

mod resolver;
mod types;

pub use resolver::{file_location, resolve, ResolvedPath};
pub use types::{FilePathConfig, FilePathType, GoogleCloudStoragePathType, PathAddressing};
