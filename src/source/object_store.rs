//! Object store sources (Amazon S3, Google Cloud Storage)

use super::store::FileStoreSource;
use super::types::{CopySource, StoreReadOptions};
use crate::config::AdditionalColumn;
use crate::connectors::ConnectorKind;
use crate::format::{DelimitedTextOptions, FileFormat};
use crate::fragment::{CompiledActivityFragment, ObjectBuilder};
use crate::path::PathAddressing;
use crate::types::UnknownKeys;
use serde::Deserialize;

fn default_max_concurrent_connections() -> u32 {
    1
}

fn default_s3_format() -> FileFormat {
    FileFormat::Binary
}

// ============================================================================
// Amazon S3
// ============================================================================

/// Amazon S3 bucket source
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct S3Source {
    pub connection_id: String,
    pub bucket_name: String,

    /// Format of the objects (defaults to Binary)
    #[serde(default = "default_s3_format", alias = "format_type")]
    pub file_format: FileFormat,

    /// Which objects to read
    pub file_path_config: PathAddressing,

    #[serde(default = "default_max_concurrent_connections")]
    pub max_concurrent_connections: u32,

    #[serde(flatten)]
    pub read_options: StoreReadOptions,

    #[serde(flatten)]
    pub delimited: DelimitedTextOptions,

    #[serde(default)]
    pub additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

impl S3Source {
    /// Create an S3 source with default knobs
    pub fn new(
        connection_id: impl Into<String>,
        bucket_name: impl Into<String>,
        file_path_config: PathAddressing,
        file_format: FileFormat,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            bucket_name: bucket_name.into(),
            file_format,
            file_path_config,
            max_concurrent_connections: default_max_concurrent_connections(),
            read_options: StoreReadOptions::default(),
            delimited: DelimitedTextOptions::default(),
            additional_columns: Vec::new(),
            unknown_keys: UnknownKeys,
        }
    }
}

impl CopySource for S3Source {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::S3
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        FileStoreSource {
            read_settings_type: "AmazonS3ReadSettings",
            location: ObjectBuilder::typed("AmazonS3Location")
                .insert("bucketName", self.bucket_name.as_str()),
            addressing: &self.file_path_config,
            format: self.file_format,
            max_concurrent_connections: Some(self.max_concurrent_connections),
            read_options: &self.read_options,
            delimited: &self.delimited,
            connection_id: &self.connection_id,
            additional_columns: &self.additional_columns,
        }
        .compile()
    }
}

// ============================================================================
// Google Cloud Storage
// ============================================================================

/// Google Cloud Storage bucket source
///
/// File path addressing may name a full `object_key`, which is split on its
/// last `/` into folder and file name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleCloudStorageSource {
    pub connection_id: String,
    pub bucket_name: String,

    #[serde(default)]
    pub file_format: FileFormat,

    pub file_path_config: PathAddressing,

    #[serde(default = "default_max_concurrent_connections")]
    pub max_concurrent_connections: u32,

    #[serde(flatten)]
    pub read_options: StoreReadOptions,

    #[serde(flatten)]
    pub delimited: DelimitedTextOptions,

    #[serde(default)]
    pub additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

impl GoogleCloudStorageSource {
    /// Create a Google Cloud Storage source with default knobs
    pub fn new(
        connection_id: impl Into<String>,
        bucket_name: impl Into<String>,
        file_path_config: PathAddressing,
        file_format: FileFormat,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            bucket_name: bucket_name.into(),
            file_format,
            file_path_config,
            max_concurrent_connections: default_max_concurrent_connections(),
            read_options: StoreReadOptions::default(),
            delimited: DelimitedTextOptions::default(),
            additional_columns: Vec::new(),
            unknown_keys: UnknownKeys,
        }
    }
}

impl CopySource for GoogleCloudStorageSource {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::GoogleCloudStorage
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        FileStoreSource {
            read_settings_type: "GoogleCloudStorageReadSettings",
            location: ObjectBuilder::typed("GoogleCloudStorageLocation")
                .insert("bucketName", self.bucket_name.as_str()),
            addressing: &self.file_path_config,
            format: self.file_format,
            max_concurrent_connections: Some(self.max_concurrent_connections),
            read_options: &self.read_options,
            delimited: &self.delimited,
            connection_id: &self.connection_id,
            additional_columns: &self.additional_columns,
        }
        .compile()
    }
}
