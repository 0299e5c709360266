//! Compiled activity fragments and the JSON builders that produce them
//!
//! The orchestration engine treats an absent key differently from a key set
//! to `null`, so nothing here ever writes a placeholder: a builder only
//! inserts the keys it is told to set, and optional values that are `None`
//! leave no trace in the output.
//!
//! Compilation is additive. Every key is written exactly once; a later step
//! never overwrites what an earlier step produced (checked in debug builds).

use crate::config::AdditionalColumn;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Object Builder
// ============================================================================

/// Builder for a single JSON object that only inserts what it is given
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    map: JsonObject,
}

impl ObjectBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose first key is `type`
    pub fn typed(type_name: impl Into<String>) -> Self {
        Self::new().insert("type", type_name.into())
    }

    /// Insert a key
    pub fn insert(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        debug_assert!(
            !self.map.contains_key(key),
            "key '{key}' was already set by an earlier compilation step"
        );
        self.map.insert(key.to_string(), value.into());
        self
    }

    /// Insert a key only when a value is present
    pub fn insert_opt<V: Into<JsonValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.insert(key, value),
            None => self,
        }
    }

    /// Insert a key only when the condition holds
    pub fn insert_if(self, condition: bool, key: &str, value: impl Into<JsonValue>) -> Self {
        if condition {
            self.insert(key, value)
        } else {
            self
        }
    }

    /// Insert every key of another object
    pub fn merge(self, other: JsonObject) -> Self {
        other
            .into_iter()
            .fold(self, |builder, (key, value)| builder.insert(&key, value))
    }

    /// Check whether a key has been set
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Finish the object
    pub fn build(self) -> JsonObject {
        self.map
    }
}

impl From<ObjectBuilder> for JsonValue {
    fn from(builder: ObjectBuilder) -> Self {
        JsonValue::Object(builder.build())
    }
}

// ============================================================================
// Compiled Fragment
// ============================================================================

/// The compiled `source` or `sink` object of a copy activity
///
/// Always carries `type`; `storeSettings`, `formatSettings`,
/// `datasetSettings` and `additionalColumns` are present only when the
/// connector, addressing and format call for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledActivityFragment(JsonObject);

impl CompiledActivityFragment {
    /// Outer activity type (e.g. `DelimitedTextSource`)
    pub fn type_name(&self) -> &str {
        self.0
            .get("type")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
    }

    /// Get a top-level key
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Check whether a top-level key is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The `storeSettings` object, if any
    pub fn store_settings(&self) -> Option<&JsonObject> {
        self.object("storeSettings")
    }

    /// The `formatSettings` object, if any
    pub fn format_settings(&self) -> Option<&JsonObject> {
        self.object("formatSettings")
    }

    /// The `datasetSettings` object, if any
    pub fn dataset_settings(&self) -> Option<&JsonObject> {
        self.object("datasetSettings")
    }

    /// `datasetSettings.typeProperties`, if any
    pub fn type_properties(&self) -> Option<&JsonObject> {
        self.dataset_settings()?
            .get("typeProperties")
            .and_then(JsonValue::as_object)
    }

    /// `datasetSettings.typeProperties.location`, if any
    pub fn location(&self) -> Option<&JsonObject> {
        self.type_properties()?
            .get("location")
            .and_then(JsonValue::as_object)
    }

    /// The `additionalColumns` array, if any
    pub fn additional_columns(&self) -> Option<&Vec<JsonValue>> {
        self.0.get("additionalColumns").and_then(JsonValue::as_array)
    }

    /// Borrow the underlying object
    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }

    /// Serialize to a compact JSON string
    pub fn to_json_string(&self) -> String {
        JsonValue::Object(self.0.clone()).to_string()
    }

    fn object(&self, key: &str) -> Option<&JsonObject> {
        self.0.get(key).and_then(JsonValue::as_object)
    }
}

impl From<CompiledActivityFragment> for JsonValue {
    fn from(fragment: CompiledActivityFragment) -> Self {
        fragment.into_value()
    }
}

// ============================================================================
// Fragment Builder
// ============================================================================

/// Assembles a fragment in the fixed compilation order
///
/// 1. addressing and connector store settings (`store_settings`)
/// 2. format settings (`format_settings`)
/// 3. dataset settings (`dataset_settings`)
/// 4. additional columns (`additional_columns`)
///
/// Connector-level top-level knobs go through `property`.
#[derive(Debug, Clone)]
pub struct FragmentBuilder {
    inner: ObjectBuilder,
}

impl FragmentBuilder {
    /// Start a fragment with its outer type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            inner: ObjectBuilder::typed(type_name),
        }
    }

    /// Set a top-level connector property
    pub fn property(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.inner = self.inner.insert(key, value);
        self
    }

    /// Set a top-level connector property when present
    pub fn property_opt<V: Into<JsonValue>>(mut self, key: &str, value: Option<V>) -> Self {
        self.inner = self.inner.insert_opt(key, value);
        self
    }

    /// Attach `storeSettings`
    pub fn store_settings(mut self, settings: JsonObject) -> Self {
        self.inner = self.inner.insert("storeSettings", settings);
        self
    }

    /// Attach `formatSettings` unless the format has none
    pub fn format_settings(mut self, settings: Option<JsonObject>) -> Self {
        self.inner = self.inner.insert_opt("formatSettings", settings);
        self
    }

    /// Attach `datasetSettings`
    pub fn dataset_settings(mut self, settings: JsonObject) -> Self {
        self.inner = self.inner.insert("datasetSettings", settings);
        self
    }

    /// Attach `additionalColumns` when the caller supplied any
    pub fn additional_columns(mut self, columns: &[AdditionalColumn]) -> Self {
        if !columns.is_empty() {
            let columns: Vec<JsonValue> = columns.iter().map(AdditionalColumn::to_value).collect();
            self.inner = self.inner.insert("additionalColumns", columns);
        }
        self
    }

    /// Finish the fragment
    pub fn build(self) -> CompiledActivityFragment {
        CompiledActivityFragment(self.inner.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_opt_omits_none() {
        let object = ObjectBuilder::typed("AmazonS3Location")
            .insert("bucketName", "photos")
            .insert_opt("folderPath", None::<String>)
            .insert_opt("fileName", Some("data.json"))
            .build();

        assert_eq!(
            JsonValue::Object(object.clone()),
            json!({"type": "AmazonS3Location", "bucketName": "photos", "fileName": "data.json"})
        );
        assert!(!object.contains_key("folderPath"));
    }

    #[test]
    fn test_insert_if() {
        let object = ObjectBuilder::new()
            .insert_if(false, "deleteFilesAfterCompletion", true)
            .insert_if(true, "enablePartitionDiscovery", true)
            .build();
        assert_eq!(
            JsonValue::Object(object),
            json!({"enablePartitionDiscovery": true})
        );
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut extra = JsonObject::new();
        extra.insert("wildcardFolderPath".to_string(), json!("in"));
        extra.insert("wildcardFileName".to_string(), json!("*.csv"));

        let object = ObjectBuilder::typed("FileServerReadSettings")
            .merge(extra)
            .insert("recursive", true)
            .build();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["type", "wildcardFolderPath", "wildcardFileName", "recursive"]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already set")]
    fn test_insert_twice_is_a_defect() {
        let _ = ObjectBuilder::new().insert("recursive", true).insert("recursive", false);
    }

    #[test]
    fn test_fragment_accessors() {
        let dataset = ObjectBuilder::typed("Json")
            .insert(
                "typeProperties",
                ObjectBuilder::new().insert(
                    "location",
                    ObjectBuilder::typed("AmazonS3Location").insert("bucketName", "b"),
                ),
            )
            .build();
        let fragment = FragmentBuilder::new("JsonSource")
            .store_settings(ObjectBuilder::typed("AmazonS3ReadSettings").build())
            .format_settings(None)
            .dataset_settings(dataset)
            .additional_columns(&[])
            .build();

        assert_eq!(fragment.type_name(), "JsonSource");
        assert!(fragment.store_settings().is_some());
        assert!(fragment.format_settings().is_none());
        assert!(!fragment.contains("additionalColumns"));
        assert_eq!(fragment.location().unwrap()["bucketName"], "b");
    }

    #[test]
    fn test_additional_columns_pass_through() {
        let fragment = FragmentBuilder::new("MySqlSource")
            .additional_columns(&[AdditionalColumn::new("total", "$$COLUMN:sum")])
            .build();
        assert_eq!(
            fragment.get("additionalColumns").unwrap(),
            &json!([{"name": "total", "value": "$$COLUMN:sum"}])
        );
    }
}
