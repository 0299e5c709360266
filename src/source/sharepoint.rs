//! SharePoint Online list source

use super::types::CopySource;
use crate::config::AdditionalColumn;
use crate::connectors::ConnectorKind;
use crate::dataset::{DatasetReference, DatasetSettings};
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::types::{JsonValue, UnknownKeys};
use serde::Deserialize;

/// Items of a SharePoint Online list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SharePointSource {
    pub connection_id: String,
    pub list_name: String,

    /// OData query narrowing the items read
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default = "default_http_request_timeout")]
    pub http_request_timeout: String,

    #[serde(default)]
    pub additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

fn default_http_request_timeout() -> String {
    "00:05:00".to_string()
}

impl SharePointSource {
    /// Read every item of a list
    pub fn new(connection_id: impl Into<String>, list_name: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            list_name: list_name.into(),
            query: None,
            http_request_timeout: default_http_request_timeout(),
            additional_columns: Vec::new(),
            unknown_keys: UnknownKeys,
        }
    }

    /// Narrow the items with a query
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

impl CopySource for SharePointSource {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::SharePoint
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        let dataset = DatasetSettings::new(
            "SharePointOnlineListResource",
            DatasetReference::connection(self.connection_id.as_str()),
        )
        .type_properties(
            ObjectBuilder::new()
                .insert("listName", self.list_name.as_str())
                .build(),
        )
        .schema(JsonValue::Array(Vec::new()))
        .build();

        FragmentBuilder::new("SharePointOnlineListSource")
            .property("httpRequestTimeout", self.http_request_timeout.as_str())
            .property_opt("query", self.query.as_deref())
            .dataset_settings(dataset)
            .additional_columns(&self.additional_columns)
            .build()
    }
}
