//! REST sink

use super::types::CopySink;
use crate::connectors::ConnectorKind;
use crate::dataset::{DatasetReference, DatasetSettings};
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::types::{JsonValue, UnknownKeys};
use serde::Deserialize;

/// Records posted to a RESTful API in batches
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestSink {
    pub connection_id: String,

    #[serde(default)]
    pub relative_url: Option<String>,

    #[serde(default = "default_request_method")]
    pub request_method: String,

    #[serde(default = "default_http_request_timeout")]
    pub http_request_timeout: String,

    /// Milliseconds between requests
    #[serde(default = "default_request_interval")]
    pub request_interval: u32,

    #[serde(default = "default_write_batch_size")]
    pub write_batch_size: u32,

    /// `none` or `gzip`
    #[serde(default = "default_http_compression_type")]
    pub http_compression_type: String,

    #[serde(default)]
    pub additional_headers: Option<JsonValue>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

fn default_request_method() -> String {
    "POST".to_string()
}

fn default_http_request_timeout() -> String {
    "00:05:00".to_string()
}

fn default_request_interval() -> u32 {
    10
}

fn default_write_batch_size() -> u32 {
    10_000
}

fn default_http_compression_type() -> String {
    "none".to_string()
}

impl RestSink {
    /// Create a REST sink posting batches of 10000 records
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            relative_url: None,
            request_method: default_request_method(),
            http_request_timeout: default_http_request_timeout(),
            request_interval: default_request_interval(),
            write_batch_size: default_write_batch_size(),
            http_compression_type: default_http_compression_type(),
            additional_headers: None,
            unknown_keys: UnknownKeys,
        }
    }

    /// Set the relative URL
    #[must_use]
    pub fn with_relative_url(mut self, relative_url: impl Into<String>) -> Self {
        self.relative_url = Some(relative_url.into());
        self
    }
}

impl CopySink for RestSink {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Rest
    }

    fn to_copy_activity_sink(&self) -> CompiledActivityFragment {
        let dataset = DatasetSettings::new(
            "RestResource",
            DatasetReference::connection(self.connection_id.as_str()),
        )
        .type_properties(
            ObjectBuilder::new()
                .insert_opt("relativeUrl", self.relative_url.as_deref())
                .build(),
        )
        .schema(JsonValue::Array(Vec::new()))
        .build();

        FragmentBuilder::new("RestSink")
            .property("httpRequestTimeout", self.http_request_timeout.as_str())
            .property("requestInterval", self.request_interval)
            .property("requestMethod", self.request_method.as_str())
            .property("writeBatchSize", self.write_batch_size)
            .property("httpCompressionType", self.http_compression_type.as_str())
            .property_opt("additionalHeaders", self.additional_headers.clone())
            .dataset_settings(dataset)
            .build()
    }
}
