//! On-premises file share source

use super::store::FileStoreSource;
use super::types::{CopySource, StoreReadOptions};
use crate::config::AdditionalColumn;
use crate::connectors::ConnectorKind;
use crate::format::{DelimitedTextOptions, FileFormat};
use crate::fragment::{CompiledActivityFragment, ObjectBuilder};
use crate::path::PathAddressing;
use crate::types::UnknownKeys;
use serde::Deserialize;

/// File share source reached through a gateway connection
///
/// Addressing fields sit at the top level of the configuration; the
/// strategy tag may be left out and is then inferred from them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileSystemSource {
    pub connection_id: String,

    #[serde(flatten)]
    pub addressing: PathAddressing,

    #[serde(default)]
    pub file_format: FileFormat,

    #[serde(default)]
    pub max_concurrent_connections: Option<u32>,

    #[serde(flatten)]
    pub read_options: StoreReadOptions,

    #[serde(flatten)]
    pub delimited: DelimitedTextOptions,

    /// Append a column holding each row's source file path
    #[serde(default)]
    pub add_file_name_column: bool,

    #[serde(default = "default_file_name_column")]
    pub file_name_column_name: String,

    #[serde(default)]
    pub additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

fn default_file_name_column() -> String {
    "file_name".to_string()
}

impl FileSystemSource {
    /// Create a file share source with default knobs
    pub fn new(
        connection_id: impl Into<String>,
        addressing: PathAddressing,
        file_format: FileFormat,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            addressing,
            file_format,
            max_concurrent_connections: None,
            read_options: StoreReadOptions::default(),
            delimited: DelimitedTextOptions::default(),
            add_file_name_column: false,
            file_name_column_name: default_file_name_column(),
            additional_columns: Vec::new(),
            unknown_keys: UnknownKeys,
        }
    }

    /// Record each row's source file path in a column of the given name
    #[must_use]
    pub fn with_file_name_column(mut self, name: impl Into<String>) -> Self {
        self.add_file_name_column = true;
        self.file_name_column_name = name.into();
        self
    }

    /// Caller-supplied columns plus the file name column, if requested
    fn columns(&self) -> Vec<AdditionalColumn> {
        let mut columns = self.additional_columns.clone();
        if self.add_file_name_column {
            columns.push(AdditionalColumn::file_path(self.file_name_column_name.as_str()));
        }
        columns
    }
}

impl CopySource for FileSystemSource {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::FileSystem
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        let columns = self.columns();
        FileStoreSource {
            read_settings_type: "FileServerReadSettings",
            location: ObjectBuilder::typed("FileServerLocation"),
            addressing: &self.addressing,
            format: self.file_format,
            max_concurrent_connections: self.max_concurrent_connections,
            read_options: &self.read_options,
            delimited: &self.delimited,
            connection_id: &self.connection_id,
            additional_columns: &columns,
        }
        .compile()
    }
}
