//! MySQL source

use super::types::CopySource;
use crate::config::AdditionalColumn;
use crate::connectors::ConnectorKind;
use crate::dataset::{DatasetReference, DatasetSettings};
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::types::{JsonValue, UnknownKeys};
use serde::Deserialize;

/// MySQL table, optionally read through a custom query
///
/// The table name is required even when a query drives the read, since the
/// dataset definition still names it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MySqlSource {
    pub connection_id: String,

    /// Table name, backticks allowed
    pub table_name: String,

    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

impl MySqlSource {
    /// Read a whole table
    pub fn new(connection_id: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            table_name: table_name.into(),
            query: None,
            additional_columns: Vec::new(),
            unknown_keys: UnknownKeys,
        }
    }

    /// Drive the read with a custom query
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Append a computed column
    #[must_use]
    pub fn with_column(mut self, column: AdditionalColumn) -> Self {
        self.additional_columns.push(column);
        self
    }
}

impl CopySource for MySqlSource {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::MySql
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        let dataset = DatasetSettings::new(
            "MySqlTable",
            DatasetReference::connection(self.connection_id.as_str()),
        )
        .type_properties(
            ObjectBuilder::new()
                .insert("tableName", self.table_name.as_str())
                .build(),
        )
        .schema(JsonValue::Array(Vec::new()))
        .build();

        FragmentBuilder::new("MySqlSource")
            .property_opt("query", self.query.as_deref())
            .dataset_settings(dataset)
            .additional_columns(&self.additional_columns)
            .build()
    }
}
