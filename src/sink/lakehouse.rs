//! Lakehouse sink

use super::store::FileStoreSink;
use super::types::CopySink;
use crate::config::{FileConfiguration, LakehouseReference, LakehouseTarget, TableConfiguration};
use crate::connectors::ConnectorKind;
use crate::dataset::{DatasetReference, DatasetSettings};
use crate::error::Error;
use crate::format::{DelimitedTextOptions, WriteFormatOptions};
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::source::table_type_properties;
use crate::types::{
    CopyBehavior, JsonFilePattern, JsonValue, PartitionOption, RootFolder, TableActionOption,
    UnknownKeys,
};
use serde::Deserialize;

/// Lakehouse table or file sink
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLakehouseSink")]
pub struct LakehouseSink {
    pub lakehouse: LakehouseReference,
    pub target: LakehouseTarget,
    pub table_action_option: TableActionOption,
    pub partition_option: PartitionOption,
    pub max_concurrent_connections: u32,
    pub copy_behavior: CopyBehavior,
    pub block_size_mb: u32,
    pub file_extension: String,
    pub json_file_pattern: JsonFilePattern,
    pub delimited: DelimitedTextOptions,
}

#[derive(Deserialize)]
struct RawLakehouseSink {
    #[serde(flatten)]
    lakehouse: LakehouseReference,
    #[serde(default = "default_root_folder")]
    root_folder: RootFolder,
    #[serde(default)]
    table_config: Option<TableConfiguration>,
    #[serde(default)]
    file_config: Option<FileConfiguration>,
    #[serde(default)]
    table_action_option: TableActionOption,
    #[serde(default)]
    partition_option: PartitionOption,
    #[serde(default = "default_max_concurrent_connections")]
    max_concurrent_connections: u32,
    #[serde(default)]
    copy_behavior: CopyBehavior,
    #[serde(default = "default_block_size_mb")]
    block_size_mb: u32,
    #[serde(default = "default_file_extension")]
    file_extension: String,
    #[serde(default)]
    json_file_pattern: JsonFilePattern,
    #[serde(flatten)]
    delimited: DelimitedTextOptions,

    #[serde(flatten)]
    _unknown_keys: UnknownKeys,
}

fn default_root_folder() -> RootFolder {
    RootFolder::Files
}

fn default_max_concurrent_connections() -> u32 {
    1
}

fn default_block_size_mb() -> u32 {
    50
}

fn default_file_extension() -> String {
    ".txt".to_string()
}

impl TryFrom<RawLakehouseSink> for LakehouseSink {
    type Error = Error;

    fn try_from(raw: RawLakehouseSink) -> Result<Self, Error> {
        Ok(Self {
            target: LakehouseTarget::from_parts(raw.root_folder, raw.table_config, raw.file_config)?,
            lakehouse: raw.lakehouse,
            table_action_option: raw.table_action_option,
            partition_option: raw.partition_option,
            max_concurrent_connections: raw.max_concurrent_connections,
            copy_behavior: raw.copy_behavior,
            block_size_mb: raw.block_size_mb,
            file_extension: raw.file_extension,
            json_file_pattern: raw.json_file_pattern,
            delimited: raw.delimited,
        })
    }
}

impl LakehouseSink {
    /// Write into a Lakehouse table
    pub fn table(
        lakehouse: LakehouseReference,
        table: TableConfiguration,
        action: TableActionOption,
    ) -> Self {
        let mut sink = Self::with_target(lakehouse, LakehouseTarget::Table(table));
        sink.table_action_option = action;
        sink
    }

    /// Write Lakehouse files
    pub fn files(lakehouse: LakehouseReference, file: FileConfiguration) -> Self {
        Self::with_target(lakehouse, LakehouseTarget::Files(file))
    }

    fn with_target(lakehouse: LakehouseReference, target: LakehouseTarget) -> Self {
        Self {
            lakehouse,
            target,
            table_action_option: TableActionOption::default(),
            partition_option: PartitionOption::default(),
            max_concurrent_connections: default_max_concurrent_connections(),
            copy_behavior: CopyBehavior::default(),
            block_size_mb: default_block_size_mb(),
            file_extension: default_file_extension(),
            json_file_pattern: JsonFilePattern::default(),
            delimited: DelimitedTextOptions::default(),
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

        let partition = match self.partition_option {
            PartitionOption::None => None,
            PartitionOption::PartitionByKey => Some("PartitionByKey"),
        };

        FragmentBuilder::new("LakehouseTableSink")
            .property("tableActionOption", self.table_action_option.as_str())
            .property_opt("partitionOption", partition)
            .dataset_settings(dataset)
            .build()
    }

    fn compile_files(&self, file: &FileConfiguration) -> CompiledActivityFragment {
        FileStoreSink {
            write_settings: ObjectBuilder::typed("LakehouseWriteSettings")
                .insert("maxConcurrentConnections", self.max_concurrent_connections)
                .insert("copyBehavior", self.copy_behavior.as_str())
                .insert("blockSizeInMB", self.block_size_mb),
            location: ObjectBuilder::typed("LakehouseLocation"),
            file,
            write_options: WriteFormatOptions::new(self.file_extension.as_str())
                .with_json_file_pattern(self.json_file_pattern),
            delimited: &self.delimited,
            compression_codec: None,
            reference: self.reference(),
        }
        .compile()
    }
}

impl CopySink for LakehouseSink {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Lakehouse
    }

    fn to_copy_activity_sink(&self) -> CompiledActivityFragment {
        match &self.target {
            LakehouseTarget::Table(table) => self.compile_table(table),
            LakehouseTarget::Files(file) => self.compile_files(file),
        }
    }
}
