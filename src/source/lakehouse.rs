//! Lakehouse source

use super::types::CopySource;
use crate::config::{
    AdditionalColumn, FileConfiguration, LakehouseReference, LakehouseTarget, TableConfiguration,
};
use crate::connectors::ConnectorKind;
use crate::dataset::{file_type_properties, DatasetReference, DatasetSettings};
use crate::error::Error;
use crate::format::DelimitedTextOptions;
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::path::file_location;
use crate::types::{JsonObject, JsonValue, RootFolder, UnknownKeys};
use serde::Deserialize;

/// Lakehouse table or file source
///
/// Reaches the Lakehouse through an embedded linked service rather than a
/// connection id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLakehouseSource")]
pub struct LakehouseSource {
    pub lakehouse: LakehouseReference,
    pub target: LakehouseTarget,
    /// Time travel: read the table as of this timestamp
    pub timestamp_as_of: Option<String>,
    /// Time travel: read this table version
    pub version_as_of: Option<i64>,
    /// Read sub-folders of a file target
    pub recursive: bool,
    pub delimited: DelimitedTextOptions,
    pub additional_columns: Vec<AdditionalColumn>,
}

#[derive(Deserialize)]
struct RawLakehouseSource {
    #[serde(flatten)]
    lakehouse: LakehouseReference,
    #[serde(default)]
    root_folder: RootFolder,
    #[serde(default)]
    table_config: Option<TableConfiguration>,
    #[serde(default)]
    file_config: Option<FileConfiguration>,
    #[serde(default)]
    timestamp_as_of: Option<String>,
    #[serde(default)]
    version_as_of: Option<i64>,
    #[serde(default = "default_recursive")]
    recursive: bool,
    #[serde(flatten)]
    delimited: DelimitedTextOptions,
    #[serde(default)]
    additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    _unknown_keys: UnknownKeys,
}

fn default_recursive() -> bool {
    true
}

impl TryFrom<RawLakehouseSource> for LakehouseSource {
    type Error = Error;

    fn try_from(raw: RawLakehouseSource) -> Result<Self, Error> {
        Ok(Self {
            target: LakehouseTarget::from_parts(raw.root_folder, raw.table_config, raw.file_config)?,
            lakehouse: raw.lakehouse,
            timestamp_as_of: raw.timestamp_as_of,
            version_as_of: raw.version_as_of,
            recursive: raw.recursive,
            delimited: raw.delimited,
            additional_columns: raw.additional_columns,
        })
    }
}

impl LakehouseSource {
    /// Read a Lakehouse table
    pub fn table(lakehouse: LakehouseReference, table: TableConfiguration) -> Self {
        Self::with_target(lakehouse, LakehouseTarget::Table(table))
    }

    /// Read Lakehouse files
    pub fn files(lakehouse: LakehouseReference, file: FileConfiguration) -> Self {
        Self::with_target(lakehouse, LakehouseTarget::Files(file))
    }

    fn with_target(lakehouse: LakehouseReference, target: LakehouseTarget) -> Self {
        Self {
            lakehouse,
            target,
            timestamp_as_of: None,
            version_as_of: None,
            recursive: default_recursive(),
            delimited: DelimitedTextOptions::default(),
            additional_columns: Vec::new(),
        }
    }

    fn reference(&self) -> DatasetReference {
        DatasetReference::Lakehouse {
            lakehouse: self.lakehouse.clone(),
            root_folder: self.target.root_folder(),
        }
    }

    fn compile_table(&self, table: &TableConfiguration) -> CompiledActivityFragment {
        let dataset = DatasetSettings::new("LakehouseTable", self.reference())
            .type_properties(table_type_properties(table))
            .schema(JsonValue::Array(Vec::new()))
            .build();

        FragmentBuilder::new("LakehouseTableSource")
            .property_opt("timestampAsOf", self.timestamp_as_of.as_deref())
            .property_opt("versionAsOf", self.version_as_of)
            .dataset_settings(dataset)
            .additional_columns(&self.additional_columns)
            .build()
    }

    fn compile_files(&self, file: &FileConfiguration) -> CompiledActivityFragment {
        let format = file.file_format;
        let location = file_location(file, ObjectBuilder::typed("LakehouseLocation"));
        let dataset = DatasetSettings::new(format.dataset_type(), self.reference())
            .type_properties(file_type_properties(location, format, &self.delimited).build())
            .schema(format.schema_placeholder())
            .build();

        FragmentBuilder::new(format.source_type())
            .store_settings(
                ObjectBuilder::typed("LakehouseReadSettings")
                    .insert("recursive", self.recursive)
                    .build(),
            )
            .format_settings(format.read_settings())
            .dataset_settings(dataset)
            .additional_columns(&self.additional_columns)
            .build()
    }
}

/// `typeProperties` of a Lakehouse table dataset
pub(crate) fn table_type_properties(table: &TableConfiguration) -> JsonObject {
    ObjectBuilder::new()
        .insert("table", table.table_name.as_str())
        .insert_opt("schema", table.schema_name.as_deref())
        .build()
}

impl CopySource for LakehouseSource {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Lakehouse
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        match &self.target {
            LakehouseTarget::Table(table) => self.compile_table(table),
            LakehouseTarget::Files(file) => self.compile_files(file),
        }
    }
}
