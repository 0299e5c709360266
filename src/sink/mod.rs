//! Sink connector models
//!
//! One model per connector that can be written to, compiled through
//! [`CopySink`]. Write-side knobs such as `copyBehavior` only exist here.

mod filesystem;
mod lakehouse;
mod object_store;
mod rest;
mod store;
mod types;

pub use filesystem::FileSystemSink;
pub use lakehouse::LakehouseSink;
pub use object_store::{GoogleCloudStorageSink, S3Sink};
pub use rest::RestSink;
pub use types::{CopySink, SinkModel};

#[cfg(test)]
mod tests;
