//! HTTP and REST sources
//!
//! Request methods, bodies, headers and pagination rules are opaque to the
//! compiler and copied as given; their legality is the engine's concern.

use super::types::CopySource;
use crate::config::AdditionalColumn;
use crate::connectors::ConnectorKind;
use crate::dataset::{file_type_properties, DatasetReference, DatasetSettings};
use crate::format::{DelimitedTextOptions, FileFormat};
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::types::{JsonValue, UnknownKeys};
use serde::Deserialize;
use serde_json::json;

fn default_get() -> String {
    "GET".to_string()
}

// ============================================================================
// HTTP
// ============================================================================

/// Files served by a generic HTTP endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HttpSource {
    pub connection_id: String,

    /// Path appended to the connection's base URL
    #[serde(default)]
    pub relative_url: Option<String>,

    #[serde(default)]
    pub file_format: FileFormat,

    #[serde(default = "default_get")]
    pub request_method: String,

    #[serde(default)]
    pub request_body: Option<JsonValue>,

    #[serde(default)]
    pub additional_headers: Option<JsonValue>,

    #[serde(default = "default_http_request_timeout")]
    pub request_timeout: String,

    #[serde(default = "default_http_connections")]
    pub max_concurrent_connections: u32,

    #[serde(flatten)]
    pub delimited: DelimitedTextOptions,

    #[serde(default)]
    pub additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

fn default_http_request_timeout() -> String {
    "00:02:40".to_string()
}

fn default_http_connections() -> u32 {
    1
}

impl HttpSource {
    /// Create an HTTP source reading delimited text with a GET request
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            relative_url: None,
            file_format: FileFormat::default(),
            request_method: default_get(),
            request_body: None,
            additional_headers: None,
            request_timeout: default_http_request_timeout(),
            max_concurrent_connections: default_http_connections(),
            delimited: DelimitedTextOptions::default(),
            additional_columns: Vec::new(),
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

impl CopySource for HttpSource {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Http
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
        let format = self.file_format;

        let store_settings = ObjectBuilder::typed("HttpReadSettings")
            .insert("maxConcurrentConnections", self.max_concurrent_connections)
            .insert("requestMethod", self.request_method.as_str())
            .insert("requestTimeout", self.request_timeout.as_str())
            .insert_opt("requestBody", self.request_body.clone())
            .insert_opt("additionalHeaders", self.additional_headers.clone())
            .build();

        let location = ObjectBuilder::typed("HttpServerLocation")
            .insert_opt("relativeUrl", self.relative_url.as_deref())
            .build();
        let dataset = DatasetSettings::new(
            format.dataset_type(),
            DatasetReference::connection(self.connection_id.as_str()),
        )
        .type_properties(file_type_properties(location, format, &self.delimited).build())
        .schema(format.schema_placeholder())
        .build();

        FragmentBuilder::new(format.source_type())
            .store_settings(store_settings)
            .format_settings(format.read_settings())
            .dataset_settings(dataset)
            .additional_columns(&self.additional_columns)
            .build()
    }
}

// ============================================================================
// REST
// ============================================================================

/// JSON resources behind a RESTful API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestSource {
    pub connection_id: String,

    #[serde(default)]
    pub relative_url: Option<String>,

    #[serde(default = "default_get")]
    pub request_method: String,

    #[serde(default)]
    pub request_body: Option<JsonValue>,

    #[serde(default)]
    pub additional_headers: Option<JsonValue>,

    /// Engine pagination rules, copied verbatim
    #[serde(default = "default_pagination_rules", alias = "pagination_config")]
    pub pagination_rules: JsonValue,

    #[serde(default = "default_rest_request_timeout")]
    pub http_request_timeout: String,

    /// Pause between paged requests
    #[serde(default = "default_request_interval")]
    pub request_interval: String,

    #[serde(default)]
    pub additional_columns: Vec<AdditionalColumn>,

    #[serde(flatten)]
    unknown_keys: UnknownKeys,
}

fn default_pagination_rules() -> JsonValue {
    json!({"supportRFC5988": "true"})
}

fn default_rest_request_timeout() -> String {
    "00:01:40".to_string()
}

fn default_request_interval() -> String {
    "00.00:00:00.010".to_string()
}

impl RestSource {
    /// Create a REST source issuing GET requests with link-header paging
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            relative_url: None,
            request_method: default_get(),
            request_body: None,
            additional_headers: None,
            pagination_rules: default_pagination_rules(),
            http_request_timeout: default_rest_request_timeout(),
            request_interval: default_request_interval(),
            additional_columns: Vec::new(),
            unknown_keys: UnknownKeys,
        }
    }

    /// Set the relative URL
    #[must_use]
    pub fn with_relative_url(mut self, relative_url: impl Into<String>) -> Self {
        self.relative_url = Some(relative_url.into());
        self
    }

    /// Set the request method and body
    #[must_use]
    pub fn with_request(mut self, method: impl Into<String>, body: Option<JsonValue>) -> Self {
        self.request_method = method.into();
        self.request_body = body;
        self
    }
}

impl CopySource for RestSource {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Rest
    }

    fn to_copy_activity_source(&self) -> CompiledActivityFragment {
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

        FragmentBuilder::new("RestSource")
            .property("httpRequestTimeout", self.http_request_timeout.as_str())
            .property("requestInterval", self.request_interval.as_str())
            .property("requestMethod", self.request_method.as_str())
            .property_opt("requestBody", self.request_body.clone())
            .property_opt("additionalHeaders", self.additional_headers.clone())
            .property("paginationRules", self.pagination_rules.clone())
            .dataset_settings(dataset)
            .additional_columns(&self.additional_columns)
            .build()
    }
}
