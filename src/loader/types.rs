//! Copy job document types

use crate::connectors::ConnectorKind;
use crate::error::{Error, Result};
use crate::pipeline::{compile_pipeline, CopyActivityConfig, PipelineDefinition};
use crate::sink::SinkModel;
use crate::source::SourceModel;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// A copy job: one source, one sink and the pipeline to publish them as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyJob {
    /// Workspace the pipeline is published to
    pub workspace_id: String,

    /// Display name of the pipeline item
    pub pipeline_name: String,

    /// Pipeline description (defaults to one naming both connectors)
    #[serde(default)]
    pub description: Option<String>,

    pub source: ConnectorConfig,

    pub sink: ConnectorConfig,

    /// Activity-level settings
    #[serde(default)]
    pub activity: CopyActivityConfig,
}

/// Connector tag plus its connector-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(rename = "type")]
    pub connector_type: String,

    #[serde(default = "empty_config")]
    pub config: JsonValue,
}

fn empty_config() -> JsonValue {
    JsonValue::Object(JsonObject::new())
}

impl ConnectorConfig {
    /// Create a connector config
    pub fn new(connector_type: impl Into<String>, config: JsonValue) -> Self {
        Self {
            connector_type: connector_type.into(),
            config,
        }
    }

    /// Resolve the connector tag
    pub fn kind(&self) -> Result<ConnectorKind> {
        self.connector_type.parse()
    }
}

impl CopyJob {
    /// Build the source model
    pub fn source_model(&self) -> Result<SourceModel> {
        SourceModel::from_config(&self.source.connector_type, self.source.config.clone())
    }

    /// Build the sink model
    pub fn sink_model(&self) -> Result<SinkModel> {
        SinkModel::from_config(&self.sink.connector_type, self.sink.config.clone())
    }

    /// Check names, connector tags and connector roles
    pub fn validate(&self) -> Result<()> {
        if self.workspace_id.trim().is_empty() {
            return Err(Error::missing_field("workspace_id"));
        }
        if self.pipeline_name.trim().is_empty() {
            return Err(Error::missing_field("pipeline_name"));
        }

        let source = self.source.kind()?;
        if !source.supports_source() {
            return Err(Error::unsupported(source.name(), "source"));
        }

        let sink = self.sink.kind()?;
        if !sink.supports_sink() {
            return Err(Error::unsupported(sink.name(), "sink"));
        }

        Ok(())
    }

    /// Build both models and compile them into a pipeline document
    pub fn compile(&self) -> Result<PipelineDefinition> {
        let source = self.source_model()?;
        let sink = self.sink_model()?;
        Ok(compile_pipeline(
            &source,
            &sink,
            &self.activity,
            self.description.clone(),
        ))
    }
}
