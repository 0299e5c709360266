//! Format types
//!
//! Maps each format kind onto the type names and settings the copy activity
//! schema expects.

use crate::fragment::ObjectBuilder;
use crate::types::{JsonFilePattern, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Serialization of the data being moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FileFormat {
    /// Delimited text (CSV, TSV, ...)
    #[default]
    DelimitedText,
    /// JSON documents
    #[serde(alias = "JSON")]
    Json,
    /// Opaque bytes, copied as-is
    Binary,
    /// Apache Parquet
    Parquet,
    /// Apache Avro
    Avro,
}

impl FileFormat {
    /// Dataset type name (`datasetSettings.type`)
    pub fn dataset_type(self) -> &'static str {
        match self {
            FileFormat::DelimitedText => "DelimitedText",
            FileFormat::Json => "Json",
            FileFormat::Binary => "Binary",
            FileFormat::Parquet => "Parquet",
            FileFormat::Avro => "Avro",
        }
    }

    /// Outer source type (e.g. `JsonSource`)
    pub fn source_type(self) -> String {
        format!("{}Source", self.dataset_type())
    }

    /// Outer sink type (e.g. `BinarySink`)
    pub fn sink_type(self) -> String {
        format!("{}Sink", self.dataset_type())
    }

    /// Whether this is delimited text
    pub fn is_delimited_text(self) -> bool {
        self == FileFormat::DelimitedText
    }

    /// `formatSettings` for a source; Binary has none
    pub fn read_settings(self) -> Option<JsonObject> {
        match self {
            FileFormat::Binary => None,
            other => Some(ObjectBuilder::typed(format!("{}ReadSettings", other.dataset_type())).build()),
        }
    }

    /// `formatSettings` for a sink; Binary has none
    pub fn write_settings(self, options: &WriteFormatOptions) -> Option<JsonObject> {
        let settings = ObjectBuilder::typed(format!("{}WriteSettings", self.dataset_type()));
        match self {
            FileFormat::Binary => None,
            FileFormat::DelimitedText => Some(
                settings
                    .insert("fileExtension", options.file_extension.as_str())
                    .build(),
            ),
            FileFormat::Json => Some(
                settings
                    .insert("filePattern", options.json_file_pattern.as_str())
                    .build(),
            ),
            FileFormat::Parquet | FileFormat::Avro => Some(settings.build()),
        }
    }

    /// Empty `datasetSettings.schema` placeholder
    ///
    /// JSON datasets take an object, every other format an array.
    pub fn schema_placeholder(self) -> JsonValue {
        match self {
            FileFormat::Json => JsonValue::Object(JsonObject::new()),
            _ => JsonValue::Array(Vec::new()),
        }
    }
}

// ============================================================================
// Delimited Text Options
// ============================================================================

/// Dataset properties of a delimited text file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimitedTextOptions {
    /// Column delimiter
    #[serde(default = "default_column_delimiter")]
    pub column_delimiter: String,
    /// Escape character
    #[serde(default = "default_escape_char")]
    pub escape_char: String,
    /// Quote character
    #[serde(default = "default_quote_char")]
    pub quote_char: String,
    /// Whether the first row holds column names
    #[serde(default = "default_first_row_as_header")]
    pub first_row_as_header: bool,
}

impl Default for DelimitedTextOptions {
    fn default() -> Self {
        Self {
            column_delimiter: default_column_delimiter(),
            escape_char: default_escape_char(),
            quote_char: default_quote_char(),
            first_row_as_header: default_first_row_as_header(),
        }
    }
}

impl DelimitedTextOptions {
    /// Add the delimited text keys to a `typeProperties` builder
    pub fn apply(&self, properties: ObjectBuilder) -> ObjectBuilder {
        properties
            .insert("columnDelimiter", self.column_delimiter.as_str())
            .insert("escapeChar", self.escape_char.as_str())
            .insert("firstRowAsHeader", self.first_row_as_header)
            .insert("quoteChar", self.quote_char.as_str())
    }
}

fn default_column_delimiter() -> String {
    ",".to_string()
}

fn default_escape_char() -> String {
    "\\".to_string()
}

fn default_quote_char() -> String {
    "\"".to_string()
}

fn default_first_row_as_header() -> bool {
    true
}

// ============================================================================
// Write Options
// ============================================================================

/// Sink-side knobs that end up in `formatSettings`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFormatOptions {
    /// Extension for written delimited text files
    pub file_extension: String,
    /// Record layout for written JSON files
    pub json_file_pattern: JsonFilePattern,
}

impl WriteFormatOptions {
    /// Create write options with the default JSON pattern
    pub fn new(file_extension: impl Into<String>) -> Self {
        Self {
            file_extension: file_extension.into(),
            json_file_pattern: JsonFilePattern::default(),
        }
    }

    /// Set the JSON file pattern
    #[must_use]
    pub fn with_json_file_pattern(mut self, pattern: JsonFilePattern) -> Self {
        self.json_file_pattern = pattern;
        self
    }
}

impl Default for WriteFormatOptions {
    fn default() -> Self {
        Self::new(".txt")
    }
}
