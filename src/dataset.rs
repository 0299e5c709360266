//! Dataset settings assembly
//!
//! Every compiled fragment points at a dataset: a type, connector-specific
//! `typeProperties`, a schema placeholder, and a reference to the
//! connection. Most connectors reference a connection id through
//! `externalReferences`; Lakehouse datasets embed a `linkedService` instead.

use crate::config::LakehouseReference;
use crate::format::{DelimitedTextOptions, FileFormat};
use crate::fragment::ObjectBuilder;
use crate::types::{JsonObject, JsonValue, RootFolder};

/// How a dataset reaches its store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetReference {
    /// `externalReferences.connection`
    Connection(String),
    /// Embedded Lakehouse linked service
    Lakehouse {
        /// Lakehouse identity
        lakehouse: LakehouseReference,
        /// Root folder the dataset lives under
        root_folder: RootFolder,
    },
}

impl DatasetReference {
    /// Reference a connection by id
    pub fn connection(connection_id: impl Into<String>) -> Self {
        Self::Connection(connection_id.into())
    }
}

/// Builder for `datasetSettings`
#[derive(Debug, Clone)]
pub struct DatasetSettings {
    dataset_type: String,
    type_properties: Option<JsonObject>,
    schema: Option<JsonValue>,
    reference: DatasetReference,
}

impl DatasetSettings {
    /// Start a dataset of the given type
    pub fn new(dataset_type: impl Into<String>, reference: DatasetReference) -> Self {
        Self {
            dataset_type: dataset_type.into(),
            type_properties: None,
            schema: None,
            reference,
        }
    }

    /// Set `typeProperties`
    #[must_use]
    pub fn type_properties(mut self, properties: JsonObject) -> Self {
        self.type_properties = Some(properties);
        self
    }

    /// Set the `schema` placeholder
    #[must_use]
    pub fn schema(mut self, schema: JsonValue) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Finish the dataset settings object
    pub fn build(self) -> JsonObject {
        let mut dataset = ObjectBuilder::new().insert("annotations", JsonValue::Array(Vec::new()));

        if let DatasetReference::Lakehouse {
            lakehouse,
            root_folder,
        } = &self.reference
        {
            dataset = dataset.insert("linkedService", lakehouse_linked_service(lakehouse, *root_folder));
        }

        dataset = dataset
            .insert("type", self.dataset_type)
            .insert_opt("typeProperties", self.type_properties)
            .insert_opt("schema", self.schema);

        if let DatasetReference::Connection(connection_id) = self.reference {
            dataset = dataset.insert(
                "externalReferences",
                ObjectBuilder::new().insert("connection", connection_id),
            );
        }

        dataset.build()
    }
}

/// `linkedService` object for a Lakehouse
fn lakehouse_linked_service(lakehouse: &LakehouseReference, root_folder: RootFolder) -> JsonValue {
    ObjectBuilder::new()
        .insert("name", lakehouse.lakehouse_name.as_str())
        .insert(
            "properties",
            ObjectBuilder::new()
                .insert("annotations", JsonValue::Array(Vec::new()))
                .insert("type", "Lakehouse")
                .insert(
                    "typeProperties",
                    ObjectBuilder::new()
                        .insert("workspaceId", lakehouse.workspace_id.as_str())
                        .insert("artifactId", lakehouse.artifact_id.as_str())
                        .insert("rootFolder", root_folder.as_str()),
                ),
        )
        .into()
}

/// `typeProperties` of a file dataset: the location plus format properties
pub fn file_type_properties(
    location: JsonObject,
    format: FileFormat,
    delimited: &DelimitedTextOptions,
) -> ObjectBuilder {
    let properties = ObjectBuilder::new().insert("location", location);
    if format.is_delimited_text() {
        delimited.apply(properties)
    } else {
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_connection_dataset() {
        let dataset = DatasetSettings::new("MySqlTable", DatasetReference::connection("conn-1"))
            .type_properties(ObjectBuilder::new().insert("tableName", "`t`").build())
            .schema(json!([]))
            .build();

        assert_eq!(
            JsonValue::Object(dataset),
            json!({
                "annotations": [],
                "type": "MySqlTable",
                "typeProperties": {"tableName": "`t`"},
                "schema": [],
                "externalReferences": {"connection": "conn-1"}
            })
        );
    }

    #[test]
    fn test_lakehouse_dataset() {
        let reference = DatasetReference::Lakehouse {
            lakehouse: LakehouseReference::new("Sales", "ws-1", "lh-1"),
            root_folder: RootFolder::Tables,
        };
        let dataset = DatasetSettings::new("LakehouseTable", reference)
            .schema(json!([]))
            .build();

        assert_eq!(
            JsonValue::Object(dataset.clone()),
            json!({
                "annotations": [],
                "linkedService": {
                    "name": "Sales",
                    "properties": {
                        "annotations": [],
                        "type": "Lakehouse",
                        "typeProperties": {
                            "workspaceId": "ws-1",
                            "artifactId": "lh-1",
                            "rootFolder": "Tables"
                        }
                    }
                },
                "type": "LakehouseTable",
                "schema": []
            })
        );
        assert!(!dataset.contains_key("externalReferences"));
        assert!(!dataset.contains_key("typeProperties"));
    }

    #[test]
    fn test_file_type_properties_only_adds_delimiters_for_delimited_text() {
        let location = ObjectBuilder::typed("FileServerLocation").build();
        let options = DelimitedTextOptions::default();

        let delimited = file_type_properties(location.clone(), FileFormat::DelimitedText, &options).build();
        assert!(delimited.contains_key("columnDelimiter"));

        let json = file_type_properties(location, FileFormat::Json, &options).build();
        assert_eq!(JsonValue::Object(json), json!({"location": {"type": "FileServerLocation"}}));
    }
}
