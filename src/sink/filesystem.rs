//! On-premises file share sink

use super::store::FileStoreSink;
use super::types::CopySink;
use crate::config::FileConfiguration;
use crate::connectors::ConnectorKind;
use crate::dataset::DatasetReference;
use crate::format::{DelimitedTextOptions, WriteFormatOptions};
use crate::fragment::{CompiledActivityFragment, ObjectBuilder};
use crate::types::{CopyBehavior, JsonFilePattern, UnknownKeys};
use serde::Deserialize;

/// File share sink reached through a gateway connection
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileSystemSink {
    pub connection_id: String,

    #[serde(flatten)]
    pub file: FileConfiguration,

    #[serde(default)]
    pub copy_behavior: CopyBehavior,

    #[serde(default)]
    pub max_concurrent_connections: Option<u32>,

    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    #[serde(default)]
    pub json_file_pattern: JsonFilePattern,

    #[serde(flatten)]
    pub delimited: DelimitedTextOptions,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

fn default_file_extension() -> String {
    ".txt".to_string()
}

impl FileSystemSink {
    /// Create a file share sink with default knobs
    pub fn new(connection_id: impl Into<String>, file: FileConfiguration) -> Self {
        Self {
            connection_id: connection_id.into(),
            file,
            copy_behavior: CopyBehavior::default(),
            max_concurrent_connections: None,
            file_extension: default_file_extension(),
            json_file_pattern: JsonFilePattern::default(),
            delimited: DelimitedTextOptions::default(),
            unknown_keys: UnknownKeys,
        }
    }
}

impl CopySink for FileSystemSink {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::FileSystem
    }

    fn to_copy_activity_sink(&self) -> CompiledActivityFragment {
        FileStoreSink {
            write_settings: ObjectBuilder::typed("FileServerWriteSettings")
                .insert("copyBehavior", self.copy_behavior.as_str())
                .insert_opt("maxConcurrentConnections", self.max_concurrent_connections),
            location: ObjectBuilder::typed("FileServerLocation"),
            file: &self.file,
            write_options: WriteFormatOptions::new(self.file_extension.as_str())
                .with_json_file_pattern(self.json_file_pattern),
            delimited: &self.delimited,
            compression_codec: None,
            reference: DatasetReference::connection(self.connection_id.as_str()),
        }
        .compile()
    }
}
