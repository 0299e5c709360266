//! Source model types and traits
//!
//! Defines the compilation capability every source connector implements,
//! the dispatch enum selected from a connector tag, and the store-level read
//! knobs the file-based connectors share.

use super::{
    FileSystemSource, GoogleCloudStorageSource, HttpSource, LakehouseSource, MySqlSource,
    RestSource, S3Source, SharePointSource,
};
use crate::connectors::ConnectorKind;
use crate::error::{Error, Result};
use crate::fragment::{CompiledActivityFragment, ObjectBuilder};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A connector model that can be compiled into a copy activity `source`
pub trait CopySource {
    /// Connector this model belongs to
    fn kind(&self) -> ConnectorKind;

    /// Compile into the `source` object of a copy activity
    ///
    /// Pure and total: a constructed model always compiles.
    fn to_copy_activity_source(&self) -> CompiledActivityFragment;
}

// ============================================================================
// Dispatch
// ============================================================================

/// Any supported source connector
#[derive(Debug, Clone, PartialEq)]
pub enum SourceModel {
    SharePoint(SharePointSource),
    S3(S3Source),
    Lakehouse(LakehouseSource),
    Http(HttpSource),
    Rest(RestSource),
    FileSystem(FileSystemSource),
    MySql(MySqlSource),
    GoogleCloudStorage(GoogleCloudStorageSource),
}

impl SourceModel {
    /// Build a source model from a connector tag and its configuration
    pub fn from_config(tag: &str, config: JsonValue) -> Result<Self> {
        let kind: ConnectorKind = tag.parse()?;
        Self::from_kind(kind, config)
    }

    /// Build a source model for a known connector
    pub fn from_kind(kind: ConnectorKind, config: JsonValue) -> Result<Self> {
        debug!(connector = %kind, "Building source model");
        let model = match kind {
            ConnectorKind::SharePoint => Self::SharePoint(parse_config(kind, config)?),
            ConnectorKind::S3 => Self::S3(parse_config(kind, config)?),
            ConnectorKind::Lakehouse => Self::Lakehouse(parse_config(kind, config)?),
            ConnectorKind::Http => Self::Http(parse_config(kind, config)?),
            ConnectorKind::Rest => Self::Rest(parse_config(kind, config)?),
            ConnectorKind::FileSystem => Self::FileSystem(parse_config(kind, config)?),
            ConnectorKind::MySql => Self::MySql(parse_config(kind, config)?),
            ConnectorKind::GoogleCloudStorage => {
                Self::GoogleCloudStorage(parse_config(kind, config)?)
            }
        };
        Ok(model)
    }

    fn inner(&self) -> &dyn CopySource {
        match self {
            SourceModel::SharePoint(model) => model,
            SourceModel::S3(model) => model,
            SourceModel::Lakehouse(model) => model,
            SourceModel::Http(model) => model,
            SourceModel::Rest(model) => model,
            SourceModel::FileSystem(model) => model,
            SourceModel::MySql(model) => model,
            SourceModel::GoogleCloudStorage(model) => model,
        }
    }
}

impl CopySource for SourceModel {
    fn kind(&self) -> ConnectorKind {
        self.inner().kind()
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        self.inner().to_copy_activity_source()
    }
}

/// Deserialize a connector configuration, naming the connector on failure
pub(crate) fn parse_config<T: DeserializeOwned>(kind: ConnectorKind, config: JsonValue) -> Result<T> {
    serde_json::from_value(config)
        .map_err(|e| Error::config(format!("Invalid {kind} configuration: {e}")))
}

// ============================================================================
// Shared Read Options
// ============================================================================

/// Store-level read knobs shared by the object store and file share sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreReadOptions {
    /// Read sub-folders too (never emitted next to a file list)
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    /// Delete source files once copied
    #[serde(default)]
    pub delete_files_after_completion: bool,

    /// Only read files modified at or after this ISO-8601 instant
    #[serde(default)]
    pub modified_datetime_start: Option<String>,

    /// Only read files modified before this ISO-8601 instant
    #[serde(default)]
    pub modified_datetime_end: Option<String>,

    /// Parse partition columns from the folder structure
    #[serde(default)]
    pub enable_partition_discovery: bool,

    /// Folder partition discovery starts from
    #[serde(default)]
    pub partition_root_path: Option<String>,
}

impl Default for StoreReadOptions {
    fn default() -> Self {
        Self {
            recursive: default_recursive(),
            delete_files_after_completion: false,
            modified_datetime_start: None,
            modified_datetime_end: None,
            enable_partition_discovery: false,
            partition_root_path: None,
        }
    }
}

impl StoreReadOptions {
    /// Add the read knobs to a `storeSettings` builder
    ///
    /// Flags that default to off are only written when switched on, and the
    /// partition root only accompanies partition discovery.
    pub fn apply(&self, settings: ObjectBuilder, permits_recursive: bool) -> ObjectBuilder {
        let partition_root = self
            .partition_root_path
            .as_deref()
            .filter(|_| self.enable_partition_discovery);

        settings
            .insert_if(permits_recursive, "recursive", self.recursive)
            .insert_if(
                self.delete_files_after_completion,
                "deleteFilesAfterCompletion",
                true,
            )
            .insert_opt("modifiedDatetimeStart", self.modified_datetime_start.as_deref())
            .insert_opt("modifiedDatetimeEnd", self.modified_datetime_end.as_deref())
            .insert_if(
                self.enable_partition_discovery,
                "enablePartitionDiscovery",
                true,
            )
            .insert_opt("partitionRootPath", partition_root)
    }
}

fn default_recursive() -> bool {
    true
}
