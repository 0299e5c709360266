//! Format module
//!
//! Supports: DelimitedText, JSON, Binary, Parquet, Avro
//!
//! # Overview
//!
//! The format kind decides the outer activity type (`<Format>Source` /
//! `<Format>Sink`), whether a `formatSettings` fragment exists and what it
//! contains, and the shape of the dataset `schema` placeholder. The connector
//! decides everything else.

mod types;

pub use types::{DelimitedTextOptions, FileFormat, WriteFormatOptions};
