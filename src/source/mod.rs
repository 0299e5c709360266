//! Source connector models
//!
//! One model per connector that can be read from. Each compiles into the
//! `source` object of a copy activity through [`CopySource`]; the
//! [`SourceModel`] enum selects a model from a connector tag.
//!
//! # Compilation order
//!
//! 1. addressing resolves into `location` and `storeSettings` keys
//! 2. connector knobs complete `storeSettings`
//! 3. the format picks the outer `type`, `formatSettings` and schema shape
//! 4. `datasetSettings` gathers location, format and connection reference
//! 5. `additionalColumns` is attached if any were supplied

mod filesystem;
mod http;
mod lakehouse;
mod mysql;
mod object_store;
mod sharepoint;
mod store;
mod types;

pub use filesystem::FileSystemSource;
pub use http::{HttpSource, RestSource};
pub use lakehouse::LakehouseSource;
pub use mysql::MySqlSource;
pub use object_store::{GoogleCloudStorageSource, S3Source};
pub use sharepoint::SharePointSource;
pub use types::{CopySource, SourceModel, StoreReadOptions};

pub(crate) use lakehouse::table_type_properties;
pub(crate) use types::parse_config;
