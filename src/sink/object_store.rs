//! Object store sinks (S3-compatible, Google Cloud Storage)

use super::store::FileStoreSink;
use super::types::CopySink;
use crate::config::FileConfiguration;
use crate::connectors::ConnectorKind;
use crate::dataset::DatasetReference;
use crate::error::Error;
use crate::format::{DelimitedTextOptions, FileFormat, WriteFormatOptions};
use crate::fragment::{CompiledActivityFragment, ObjectBuilder};
use crate::types::{CopyBehavior, JsonFilePattern, JsonValue, UnknownKeys};
use serde::Deserialize;

fn default_max_concurrent_connections() -> u32 {
    1
}

const DEFAULT_BLOCK_SIZE_MB: u32 = 50;

fn default_block_size_mb() -> u32 {
    DEFAULT_BLOCK_SIZE_MB
}

// ============================================================================
// Amazon S3
// ============================================================================

/// Amazon S3 bucket sink, written through the S3-compatible connector
///
/// The format may be given at the top level (`file_format`, or
/// `format_type`) or inside `file_config`; without either it is Binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawS3Sink")]
pub struct S3Sink {
    pub connection_id: String,
    pub bucket_name: String,
    /// Target folder, file name and format
    pub file_config: FileConfiguration,
    pub max_concurrent_connections: u32,
    pub copy_behavior: CopyBehavior,
    pub file_extension: String,
    pub json_file_pattern: JsonFilePattern,
    pub delimited: DelimitedTextOptions,
}

#[derive(Deserialize)]
struct RawS3Sink {
    connection_id: String,
    bucket_name: String,
    #[serde(default, alias = "format_type")]
    file_format: Option<FileFormat>,
    file_config: RawS3FileTarget,
    #[serde(default = "default_max_concurrent_connections")]
    max_concurrent_connections: u32,
    #[serde(default)]
    copy_behavior: CopyBehavior,
    #[serde(default = "default_s3_file_extension")]
    file_extension: String,
    #[serde(default)]
    json_file_pattern: JsonFilePattern,
    #[serde(flatten)]
    delimited: DelimitedTextOptions,
    #[serde(flatten)]
    _unknown_keys: UnknownKeys,
}

/// `file_config` block, keeping track of whether it named a format
#[derive(Deserialize)]
struct RawS3FileTarget {
    #[serde(default)]
    folder_path: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    file_format: Option<FileFormat>,
}

fn default_s3_file_extension() -> String {
    ".csv".to_string()
}

impl TryFrom<RawS3Sink> for S3Sink {
    type Error = Error;

    fn try_from(raw: RawS3Sink) -> Result<Self, Error> {
        let file_format = match (raw.file_format, raw.file_config.file_format) {
            (Some(top), Some(nested)) if top != nested => {
                return Err(Error::invalid_value(
                    "file_config.file_format",
                    format!("conflicts with the top-level format {}", top.dataset_type()),
                ));
            }
            (top, nested) => top.or(nested).unwrap_or(FileFormat::Binary),
        };

        Ok(Self {
            connection_id: raw.connection_id,
            bucket_name: raw.bucket_name,
            file_config: FileConfiguration {
                folder_path: raw.file_config.folder_path,
                file_name: raw.file_config.file_name,
                file_format,
            },
            max_concurrent_connections: raw.max_concurrent_connections,
            copy_behavior: raw.copy_behavior,
            file_extension: raw.file_extension,
            json_file_pattern: raw.json_file_pattern,
            delimited: raw.delimited,
        })
    }
}

impl S3Sink {
    /// Create an S3 sink with default knobs
    pub fn new(
        connection_id: impl Into<String>,
        bucket_name: impl Into<String>,
        file_config: FileConfiguration,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            bucket_name: bucket_name.into(),
            file_config,
            max_concurrent_connections: default_max_concurrent_connections(),
            copy_behavior: CopyBehavior::default(),
            file_extension: default_s3_file_extension(),
            json_file_pattern: JsonFilePattern::default(),
            delimited: DelimitedTextOptions::default(),
        }
    }
}

impl CopySink for S3Sink {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::S3
    }

    fn to_copy_activity_sink(&self) -> CompiledActivityFragment {
        FileStoreSink {
            write_settings: ObjectBuilder::typed("AmazonS3CompatibleWriteSettings")
                .insert("maxConcurrentConnections", self.max_concurrent_connections)
                .insert("copyBehavior", self.copy_behavior.as_str()),
            location: ObjectBuilder::typed("AmazonS3CompatibleLocation")
                .insert("bucketName", self.bucket_name.as_str()),
            file: &self.file_config,
            write_options: WriteFormatOptions::new(self.file_extension.as_str())
                .with_json_file_pattern(self.json_file_pattern),
            delimited: &self.delimited,
            compression_codec: None,
            reference: DatasetReference::connection(self.connection_id.as_str()),
        }
        .compile()
    }
}

// ============================================================================
// Google Cloud Storage
// ============================================================================

/// Google Cloud Storage bucket sink
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleCloudStorageSink {
    pub connection_id: String,
    pub bucket_name: String,

    /// Target folder, file name and format
    #[serde(flatten)]
    pub file: FileConfiguration,

    /// Dataset compression codec (gzip, snappy, ...)
    #[serde(default)]
    pub compression_codec: Option<String>,

    #[serde(default)]
    pub json_file_pattern: JsonFilePattern,

    #[serde(default = "default_max_concurrent_connections")]
    pub max_concurrent_connections: u32,

    #[serde(default)]
    pub copy_behavior: CopyBehavior,

    /// Upload block size; only written when it differs from the default
    #[serde(default = "default_block_size_mb")]
    pub block_size_mb: u32,

    /// Object metadata entries, copied verbatim
    #[serde(default)]
    pub metadata: Option<JsonValue>,

    #[serde(flatten)]
    pub delimited: DelimitedTextOptions,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

impl GoogleCloudStorageSink {
    /// Create a Google Cloud Storage sink with default knobs
    pub fn new(
        connection_id: impl Into<String>,
        bucket_name: impl Into<String>,
        file: FileConfiguration,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            bucket_name: bucket_name.into(),
            file,
            compression_codec: None,
            json_file_pattern: JsonFilePattern::default(),
            max_concurrent_connections: default_max_concurrent_connections(),
            copy_behavior: CopyBehavior::default(),
            block_size_mb: default_block_size_mb(),
            metadata: None,
            delimited: DelimitedTextOptions::default(),
            unknown_keys: UnknownKeys,
        }
    }
}

impl CopySink for GoogleCloudStorageSink {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::GoogleCloudStorage
    }

    fn to_copy_activity_sink(&self) -> CompiledActivityFragment {
        let write_settings = ObjectBuilder::typed("GoogleCloudStorageWriteSettings")
            .insert("maxConcurrentConnections", self.max_concurrent_connections)
            .insert("copyBehavior", self.copy_behavior.as_str())
            .insert_if(
                self.block_size_mb != DEFAULT_BLOCK_SIZE_MB,
                "blockSizeInMB",
                self.block_size_mb,
            )
            .insert_opt("metadata", self.metadata.clone());

        FileStoreSink {
            write_settings,
            location: ObjectBuilder::typed("GoogleCloudStorageLocation")
                .insert("bucketName", self.bucket_name.as_str()),
            file: &self.file,
            write_options: WriteFormatOptions::default()
                .with_json_file_pattern(self.json_file_pattern),
            delimited: &self.delimited,
            compression_codec: self.compression_codec.as_deref(),
            reference: DatasetReference::connection(self.connection_id.as_str()),
        }
        .compile()
    }
}
