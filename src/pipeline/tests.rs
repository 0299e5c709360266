//! Tests for pipeline assembly

use super::*;
use crate::config::{LakehouseReference, TableConfiguration};
use crate::connectors::ConnectorKind;
use crate::sink::{LakehouseSink, SinkModel};
use crate::source::{MySqlSource, SourceModel};
use crate::types::{JsonObject, JsonValue, TableActionOption};
use base64::Engine as _;
use pretty_assertions::assert_eq;
use serde_json::json;

fn mysql_to_lakehouse(config: &CopyActivityConfig) -> PipelineDefinition {
    let source = MySqlSource::new("mysql-conn", "`orders`");
    let sink = LakehouseSink::table(
        LakehouseReference::new("Sales", "ws-1", "lh-1"),
        TableConfiguration::new("orders"),
        TableActionOption::Overwrite,
    );
    compile_pipeline(&source, &sink, config, None)
}

fn translator() -> JsonObject {
    match json!({
        "mappings": [{"source": {"name": "id"}, "sink": {"name": "order_id"}}],
        "typeConversion": false
    }) {
        JsonValue::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn test_activity_defaults() {
    let definition = mysql_to_lakehouse(&CopyActivityConfig::default());
    let activity = &definition.properties.activities[0];

    assert_eq!(activity["name"], "Copy Activity");
    assert_eq!(activity["type"], "Copy");
    assert_eq!(activity["dependsOn"], json!([]));
    assert!(activity.get("description").is_none());
    assert_eq!(
        activity["policy"],
        json!({
            "timeout": "0.12:00:00",
            "retry": 0,
            "retryIntervalInSeconds": 30,
            "secureOutput": false,
            "secureInput": false
        })
    );
    assert_eq!(activity["typeProperties"]["source"]["type"], "MySqlSource");
    assert_eq!(activity["typeProperties"]["sink"]["type"], "LakehouseTableSink");
    assert_eq!(activity["typeProperties"]["enableStaging"], false);
    assert!(activity["typeProperties"].get("translator").is_none());
}

#[test]
fn test_translator_requires_schema_mapping() {
    let config = CopyActivityConfig {
        translator: Some(translator()),
        ..CopyActivityConfig::default()
    };
    assert!(config.effective_translator().is_none());
}

#[test]
fn test_translator_merges_over_defaults() {
    let config = CopyActivityConfig::new("Copy orders")
        .with_translator(translator())
        .with_retry(2, 60);
    let definition = mysql_to_lakehouse(&config);
    let activity = &definition.properties.activities[0];

    assert_eq!(activity["name"], "Copy orders");
    assert_eq!(activity["policy"]["retry"], 2);
    assert_eq!(
        activity["typeProperties"]["translator"],
        json!({
            "type": "TabularTranslator",
            "typeConversion": false,
            "typeConversionSettings": {
                "allowDataTruncation": true,
                "treatBooleanAsNumber": false
            },
            "mappings": [{"source": {"name": "id"}, "sink": {"name": "order_id"}}]
        })
    );
}

#[test]
fn test_pipeline_properties() {
    let definition = mysql_to_lakehouse(&CopyActivityConfig::default());
    let properties = &definition.properties;

    assert_eq!(properties.description, "Universal copy pipeline: MySQL to Lakehouse");
    assert_eq!(properties.concurrency, 1);
    assert_eq!(properties.annotations, vec!["Universal", "CopyData", "MySQLToLakehouse"]);
    assert_eq!(properties.folder.name, "Universal Copy Pipelines");
}

#[test]
fn test_pipeline_description_override() {
    let definition = PipelineDefinition::new(
        ConnectorKind::S3,
        ConnectorKind::GoogleCloudStorage,
        Vec::new(),
        Some("Nightly archive".to_string()),
    );
    assert_eq!(definition.properties.description, "Nightly archive");
    assert_eq!(definition.properties.annotations[2], "S3ToGoogleCloudStorage");
}

#[test]
fn test_definition_part_round_trips_document() {
    let definition = mysql_to_lakehouse(&CopyActivityConfig::default());
    let part = definition.to_definition_part().unwrap();

    assert_eq!(part.path, "pipeline-content.json");
    assert_eq!(part.payload_type, "InlineBase64");

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&part.payload)
        .unwrap();
    let document: PipelineDefinition = serde_json::from_slice(&decoded).unwrap();
    assert_eq!(document, definition);

    let wire = serde_json::to_value(&part).unwrap();
    assert!(wire.get("payloadType").is_some());
}

#[test]
fn test_compile_from_models_is_deterministic() {
    let source = SourceModel::from_config(
        "GoogleCloudStorage",
        json!({
            "connection_id": "gcs-conn",
            "bucket_name": "bucket",
            "file_path_config": {"file_list_path": "bucket/folder"}
        }),
    )
    .unwrap();
    let sink = SinkModel::from_config(
        "Lakehouse",
        json!({
            "lakehouse_name": "Sales",
            "workspace_id": "ws-1",
            "artifact_id": "lh-1",
            "root_folder": "Tables",
            "table_config": {"table_name": "customer_segments"},
            "table_action_option": "Append"
        }),
    )
    .unwrap();

    let config = CopyActivityConfig::default();
    let first = compile_pipeline(&source, &sink, &config, None);
    let second = compile_pipeline(&source, &sink, &config, None);
    assert_eq!(
        first.to_json_string(false).unwrap(),
        second.to_json_string(false).unwrap()
    );
    assert_eq!(
        first.properties.annotations[2],
        "GoogleCloudStorageToLakehouse"
    );
}
