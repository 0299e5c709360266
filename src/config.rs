//! Configuration value objects shared by connector models
//!
//! These describe one addressable unit (a table or a file) inside a store,
//! plus the handful of descriptors several connectors carry. All of them
//! deserialize from snake_case structured values.

use crate::error::{Error, Result};
use crate::format::FileFormat;
use crate::fragment::ObjectBuilder;
use crate::types::{JsonValue, RootFolder};
use serde::{Deserialize, Serialize};

// ============================================================================
// Table / File Configuration
// ============================================================================

/// A table inside a Lakehouse-like store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfiguration {
    /// Table name
    pub table_name: String,

    /// Optional schema the table lives in
    #[serde(default)]
    pub schema_name: Option<String>,
}

impl TableConfiguration {
    /// Create a table configuration without a schema
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            schema_name: None,
        }
    }

    /// Set the schema name
    #[must_use]
    pub fn with_schema(mut self, schema_name: impl Into<String>) -> Self {
        self.schema_name = Some(schema_name.into());
        self
    }
}

/// A single file (or a folder to write into)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileConfiguration {
    /// Folder containing the file
    #[serde(default)]
    pub folder_path: Option<String>,

    /// File name
    #[serde(default)]
    pub file_name: Option<String>,

    /// Serialization of the file contents
    #[serde(default)]
    pub file_format: FileFormat,
}

impl FileConfiguration {
    /// Create a file configuration
    pub fn new(
        folder_path: impl Into<String>,
        file_name: impl Into<String>,
        file_format: FileFormat,
    ) -> Self {
        Self {
            folder_path: Some(folder_path.into()),
            file_name: Some(file_name.into()),
            file_format,
        }
    }
}

// ============================================================================
// Additional Columns
// ============================================================================

/// A computed column appended to every source row
///
/// `value` is passed through untouched; sentinels such as `$$FILEPATH` or
/// `$$COLUMN:<name>` are interpreted by the orchestration engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalColumn {
    /// Column name
    pub name: String,
    /// Column value or sentinel
    pub value: JsonValue,
}

impl AdditionalColumn {
    /// Create an additional column
    pub fn new(name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Column holding the path of the file each row was read from
    pub fn file_path(name: impl Into<String>) -> Self {
        Self::new(name, FILE_PATH_SENTINEL)
    }

    /// Compile to `{name, value}`
    pub fn to_value(&self) -> JsonValue {
        ObjectBuilder::new()
            .insert("name", self.name.as_str())
            .insert("value", self.value.clone())
            .into()
    }
}

/// Computed-column marker for the source file path
pub const FILE_PATH_SENTINEL: &str = "$$FILEPATH";

// ============================================================================
// Lakehouse
// ============================================================================

/// Identity of a Lakehouse referenced through a linked service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LakehouseReference {
    /// Lakehouse display name
    pub lakehouse_name: String,
    /// Workspace containing the Lakehouse
    pub workspace_id: String,
    /// Lakehouse item id
    pub artifact_id: String,
}

impl LakehouseReference {
    /// Create a Lakehouse reference
    pub fn new(
        lakehouse_name: impl Into<String>,
        workspace_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        Self {
            lakehouse_name: lakehouse_name.into(),
            workspace_id: workspace_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

/// What part of a Lakehouse a source or sink addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LakehouseTarget {
    /// A managed table under `Tables`
    Table(TableConfiguration),
    /// A file under `Files`
    Files(FileConfiguration),
}

impl LakehouseTarget {
    /// Validate the root folder against the configurations provided
    ///
    /// The configuration matching `root_folder` is required and the other
    /// one must be absent.
    pub fn from_parts(
        root_folder: RootFolder,
        table_config: Option<TableConfiguration>,
        file_config: Option<FileConfiguration>,
    ) -> Result<Self> {
        match root_folder {
            RootFolder::Tables => {
                if file_config.is_some() {
                    return Err(Error::conflicting_field("Tables", "file_config"));
                }
                table_config
                    .map(Self::Table)
                    .ok_or_else(|| Error::missing_field("table_config"))
            }
            RootFolder::Files => {
                if table_config.is_some() {
                    return Err(Error::conflicting_field("Files", "table_config"));
                }
                file_config
                    .map(Self::Files)
                    .ok_or_else(|| Error::missing_field("file_config"))
            }
        }
    }

    /// Root folder this target lives in
    pub fn root_folder(&self) -> RootFolder {
        match self {
            LakehouseTarget::Table(_) => RootFolder::Tables,
            LakehouseTarget::Files(_) => RootFolder::Files,
        }
    }
}
