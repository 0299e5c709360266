//! Pipeline types
//!
//! Activity-level settings, the pipeline document and the definition part
//! the orchestration API accepts.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

// ============================================================================
// Copy Activity Configuration
// ============================================================================

/// Activity-level metadata wrapped around a compiled source and sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyActivityConfig {
    #[serde(default = "default_activity_name")]
    pub activity_name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Activity timeout (`d.hh:mm:ss`)
    #[serde(default = "default_timeout")]
    pub timeout: String,

    #[serde(default)]
    pub retry_count: u32,

    #[serde(default = "default_retry_interval_seconds")]
    pub retry_interval_seconds: u32,

    #[serde(default)]
    pub secure_output: bool,

    #[serde(default)]
    pub secure_input: bool,

    #[serde(default)]
    pub enable_staging: bool,

    /// Emit the translator (requires `translator` too)
    #[serde(default)]
    pub enable_schema_mapping: bool,

    /// Column mapping merged over the tabular translator defaults
    #[serde(default)]
    pub translator: Option<JsonObject>,
}

fn default_activity_name() -> String {
    "Copy Activity".to_string()
}

fn default_timeout() -> String {
    "0.12:00:00".to_string()
}

fn default_retry_interval_seconds() -> u32 {
    30
}

impl Default for CopyActivityConfig {
    fn default() -> Self {
        Self {
            activity_name: default_activity_name(),
            description: None,
            timeout: default_timeout(),
            retry_count: 0,
            retry_interval_seconds: default_retry_interval_seconds(),
            secure_output: false,
            secure_input: false,
            enable_staging: false,
            enable_schema_mapping: false,
            translator: None,
        }
    }
}

impl CopyActivityConfig {
    /// Create a config with the given activity name
    pub fn new(activity_name: impl Into<String>) -> Self {
        Self {
            activity_name: activity_name.into(),
            ..Self::default()
        }
    }

    /// Enable schema mapping with a translator
    #[must_use]
    pub fn with_translator(mut self, translator: JsonObject) -> Self {
        self.enable_schema_mapping = true;
        self.translator = Some(translator);
        self
    }

    /// Set retry policy
    #[must_use]
    pub fn with_retry(mut self, count: u32, interval_seconds: u32) -> Self {
        self.retry_count = count;
        self.retry_interval_seconds = interval_seconds;
        self
    }

    /// The translator to emit, if schema mapping is on and one was given
    ///
    /// Caller keys override the tabular translator defaults.
    pub fn effective_translator(&self) -> Option<JsonObject> {
        if !self.enable_schema_mapping {
            return None;
        }
        let custom = self.translator.as_ref()?;

        let mut settings = JsonObject::new();
        settings.insert("allowDataTruncation".to_string(), JsonValue::Bool(true));
        settings.insert("treatBooleanAsNumber".to_string(), JsonValue::Bool(false));

        let mut translator = JsonObject::new();
        translator.insert("type".to_string(), "TabularTranslator".into());
        translator.insert("typeConversion".to_string(), JsonValue::Bool(true));
        translator.insert(
            "typeConversionSettings".to_string(),
            JsonValue::Object(settings),
        );
        for (key, value) in custom {
            translator.insert(key.clone(), value.clone());
        }
        Some(translator)
    }
}

// ============================================================================
// Pipeline Document
// ============================================================================

/// Folder pipelines are filed under
pub const PIPELINE_FOLDER: &str = "Universal Copy Pipelines";

/// Path of the pipeline document inside an item definition
pub const PIPELINE_CONTENT_PATH: &str = "pipeline-content.json";

/// A complete pipeline document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub properties: PipelineProperties,
}

/// `properties` of a pipeline document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineProperties {
    pub activities: Vec<JsonValue>,
    pub description: String,
    pub concurrency: u32,
    pub annotations: Vec<String>,
    pub folder: PipelineFolder,
}

/// Display folder of a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFolder {
    pub name: String,
}

impl PipelineDefinition {
    /// Serialize the document
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Encode the document as an inline base64 definition part
    pub fn to_definition_part(&self) -> Result<DefinitionPart> {
        let document = self.to_json_string(true)?;
        Ok(DefinitionPart::inline(
            PIPELINE_CONTENT_PATH,
            base64::engine::general_purpose::STANDARD.encode(document.as_bytes()),
        ))
    }

    /// Wrap the document into an item definition
    pub fn to_item_definition(&self) -> Result<ItemDefinition> {
        Ok(ItemDefinition {
            parts: vec![self.to_definition_part()?],
        })
    }
}

// ============================================================================
// Item Definition
// ============================================================================

/// One file of an item definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionPart {
    pub path: String,
    pub payload: String,
    pub payload_type: String,
}

impl DefinitionPart {
    /// Create an inline base64 part
    pub fn inline(path: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            payload: payload.into(),
            payload_type: "InlineBase64".to_string(),
        }
    }
}

/// Definition of an item, as a list of parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub parts: Vec<DefinitionPart>,
}
