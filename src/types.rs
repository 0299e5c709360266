//! Common types used throughout fabric-copy
//!
//! This module contains shared type definitions, type aliases,
//! and the small closed enumerations used by several connectors.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type (insertion ordered)
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Lakehouse Root Folder
// ============================================================================

/// Top-level area of a Lakehouse a dataset points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RootFolder {
    /// Managed Delta tables
    #[default]
    Tables,
    /// Unmanaged file area
    Files,
}

impl RootFolder {
    /// Wire name of the root folder
    pub fn as_str(self) -> &'static str {
        match self {
            RootFolder::Tables => "Tables",
            RootFolder::Files => "Files",
        }
    }
}

// ============================================================================
// Copy Behavior
// ============================================================================

/// How a file sink lays out copied files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CopyBehavior {
    /// Keep the source folder structure
    #[default]
    PreserveHierarchy,
    /// Write every file into the target folder
    FlattenHierarchy,
    /// Merge all source files into one target file
    MergeFiles,
}

impl CopyBehavior {
    /// Wire name of the copy behavior
    pub fn as_str(self) -> &'static str {
        match self {
            CopyBehavior::PreserveHierarchy => "PreserveHierarchy",
            CopyBehavior::FlattenHierarchy => "FlattenHierarchy",
            CopyBehavior::MergeFiles => "MergeFiles",
        }
    }
}

// ============================================================================
// Table Sink Options
// ============================================================================

/// Write action for table sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableActionOption {
    /// Append rows to the table
    #[default]
    Append,
    /// Replace the table contents
    Overwrite,
    /// Merge rows by key
    Upsert,
}

impl TableActionOption {
    /// Wire name of the action
    pub fn as_str(self) -> &'static str {
        match self {
            TableActionOption::Append => "Append",
            TableActionOption::Overwrite => "Overwrite",
            TableActionOption::Upsert => "Upsert",
        }
    }
}

/// Partitioning applied by table sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartitionOption {
    /// No partitioning (never emitted)
    #[default]
    None,
    /// Partition by the configured key columns
    PartitionByKey,
}

// ============================================================================
// JSON File Pattern
// ============================================================================

/// Layout of records inside a written JSON file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JsonFilePattern {
    /// One JSON object per line
    #[default]
    SetOfObjects,
    /// A single top-level array of objects
    ArrayOfObjects,
}

impl JsonFilePattern {
    /// Wire name of the pattern
    pub fn as_str(self) -> &'static str {
        match self {
            JsonFilePattern::SetOfObjects => "setOfObjects",
            JsonFilePattern::ArrayOfObjects => "arrayOfObjects",
        }
    }
}

// ============================================================================
// Unknown Configuration Keys
// ============================================================================

/// Type tags the original model shapes carry; the compiler derives them itself
const DERIVED_TYPE_KEYS: [&str; 2] = ["source_type", "sink_type"];

/// Rejects configuration keys that no other field of a model claimed
///
/// Flatten it as the last field of a connector model so that it sees only
/// the leftovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnknownKeys;

impl<'de> Deserialize<'de> for UnknownKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let leftover = JsonObject::deserialize(deserializer)?;
        let unknown: Vec<String> = leftover
            .keys()
            .filter(|key| !DERIVED_TYPE_KEYS.contains(&key.as_str()))
            .map(|key| format!("`{key}`"))
            .collect();

        if unknown.is_empty() {
            Ok(Self)
        } else {
            Err(de::Error::custom(format!(
                "unknown field(s) {}",
                unknown.join(", ")
            )))
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_folder_serde() {
        let folder: RootFolder = serde_json::from_str("\"Files\"").unwrap();
        assert_eq!(folder, RootFolder::Files);
        assert_eq!(RootFolder::default().as_str(), "Tables");
    }

    #[test]
    fn test_copy_behavior_round_trips_wire_name() {
        let behavior: CopyBehavior = serde_json::from_str("\"MergeFiles\"").unwrap();
        assert_eq!(behavior, CopyBehavior::MergeFiles);
        assert_eq!(
            serde_json::to_string(&behavior).unwrap(),
            format!("\"{}\"", behavior.as_str())
        );
    }

    #[test]
    fn test_json_file_pattern_serde() {
        let pattern: JsonFilePattern = serde_json::from_str("\"arrayOfObjects\"").unwrap();
        assert_eq!(pattern, JsonFilePattern::ArrayOfObjects);
        assert_eq!(JsonFilePattern::default().as_str(), "setOfObjects");
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }

    #[derive(Debug, Deserialize)]
    struct Knobs {
        #[serde(default)]
        recursive: Option<bool>,
        #[serde(flatten)]
        _unknown_keys: UnknownKeys,
    }

    #[test]
    fn test_unknown_keys_rejects_leftovers() {
        let err = serde_json::from_value::<Knobs>(serde_json::json!({
            "recursve": false,
            "batch": 10
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown field(s) `recursve`, `batch`"));
    }

    #[test]
    fn test_unknown_keys_allows_derived_type_tags() {
        let knobs: Knobs = serde_json::from_value(serde_json::json!({
            "recursive": false,
            "source_type": "BinarySource",
            "sink_type": "BinarySink"
        }))
        .unwrap();
        assert_eq!(knobs.recursive, Some(false));
    }
}
