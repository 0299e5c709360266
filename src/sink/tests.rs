//! Tests for sink connector models

use super::*;
use crate::config::{FileConfiguration, LakehouseReference, TableConfiguration};
use crate::connectors::ConnectorKind;
use crate::error::Error;
use crate::format::FileFormat;
use crate::types::{CopyBehavior, JsonFilePattern, PartitionOption, TableActionOption};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn lakehouse() -> LakehouseReference {
    LakehouseReference::new("Analytics", "ws-1", "lh-2")
}

// ============================================================================
// Google Cloud Storage
// ============================================================================

#[test]
fn test_gcs_binary_sink() {
    let sink = GoogleCloudStorageSink::new(
        "gcs-conn",
        "bucket",
        FileConfiguration::new("out", "blob.bin", FileFormat::Binary),
    );

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.type_name(), "BinarySink");
    assert!(!fragment.contains("formatSettings"));

    let dataset = fragment.dataset_settings().unwrap();
    assert_eq!(dataset["type"], "Binary");
    assert_eq!(dataset["schema"], json!([]));
    assert_eq!(
        Value::Object(fragment.store_settings().unwrap().clone()),
        json!({
            "type": "GoogleCloudStorageWriteSettings",
            "maxConcurrentConnections": 1,
            "copyBehavior": "PreserveHierarchy"
        })
    );
}

#[test]
fn test_gcs_json_sink_options() {
    let sink: GoogleCloudStorageSink = serde_json::from_value(json!({
        "connection_id": "gcs-conn",
        "bucket_name": "bucket",
        "folder_path": "exports",
        "file_format": "JSON",
        "json_file_pattern": "arrayOfObjects",
        "compression_codec": "gzip",
        "block_size_mb": 100,
        "copy_behavior": "MergeFiles",
        "metadata": [{"name": "owner", "value": "etl"}]
    }))
    .unwrap();

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.type_name(), "JsonSink");
    assert_eq!(
        Value::Object(fragment.format_settings().unwrap().clone()),
        json!({"type": "JsonWriteSettings", "filePattern": "arrayOfObjects"})
    );

    let store = fragment.store_settings().unwrap();
    assert_eq!(store["blockSizeInMB"], 100);
    assert_eq!(store["copyBehavior"], "MergeFiles");
    assert_eq!(store["metadata"], json!([{"name": "owner", "value": "etl"}]));

    let properties = fragment.type_properties().unwrap();
    assert_eq!(properties["compression"], json!({"type": "gzip"}));
    assert_eq!(
        properties["location"],
        json!({"type": "GoogleCloudStorageLocation", "bucketName": "bucket", "folderPath": "exports"})
    );
    assert_eq!(fragment.dataset_settings().unwrap()["schema"], json!({}));
}

#[test_case(FileFormat::DelimitedText, Some(json!({"type": "DelimitedTextWriteSettings", "fileExtension": ".txt"})))]
#[test_case(FileFormat::Json, Some(json!({"type": "JsonWriteSettings", "filePattern": "setOfObjects"})))]
#[test_case(FileFormat::Parquet, Some(json!({"type": "ParquetWriteSettings"})))]
#[test_case(FileFormat::Avro, Some(json!({"type": "AvroWriteSettings"})))]
#[test_case(FileFormat::Binary, None)]
fn test_gcs_format_settings_by_format(format: FileFormat, expected: Option<Value>) {
    let fragment = GoogleCloudStorageSink::new(
        "gcs-conn",
        "bucket",
        FileConfiguration::new("out", "data", format),
    )
    .to_copy_activity_sink();

    assert_eq!(fragment.get("formatSettings").cloned(), expected);
    assert_eq!(fragment.type_name(), format.sink_type());
}

// ============================================================================
// Lakehouse
// ============================================================================

#[test]
fn test_lakehouse_table_sink() {
    let sink = LakehouseSink::table(
        lakehouse(),
        TableConfiguration::new("customer_segments"),
        TableActionOption::Append,
    );

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.type_name(), "LakehouseTableSink");
    assert_eq!(fragment.get("tableActionOption").unwrap(), "Append");
    assert!(!fragment.contains("partitionOption"));
    assert!(fragment.store_settings().is_none());
    assert!(fragment.format_settings().is_none());

    let dataset = fragment.dataset_settings().unwrap();
    assert_eq!(dataset["type"], "LakehouseTable");
    assert_eq!(dataset["typeProperties"], json!({"table": "customer_segments"}));
    assert_eq!(dataset["linkedService"]["name"], "Analytics");
}

#[test]
fn test_lakehouse_table_sink_partitioned() {
    let mut sink = LakehouseSink::table(
        lakehouse(),
        TableConfiguration::new("events"),
        TableActionOption::Overwrite,
    );
    sink.partition_option = PartitionOption::PartitionByKey;

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.get("tableActionOption").unwrap(), "Overwrite");
    assert_eq!(fragment.get("partitionOption").unwrap(), "PartitionByKey");
}

#[test]
fn test_lakehouse_files_sink_from_config() {
    let sink: LakehouseSink = serde_json::from_value(json!({
        "lakehouse_name": "Analytics",
        "workspace_id": "ws-1",
        "artifact_id": "lh-2",
        "file_config": {"folder_path": "landing", "file_format": "DelimitedText"}
    }))
    .unwrap();

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.type_name(), "DelimitedTextSink");
    assert_eq!(
        Value::Object(fragment.store_settings().unwrap().clone()),
        json!({
            "type": "LakehouseWriteSettings",
            "maxConcurrentConnections": 1,
            "copyBehavior": "PreserveHierarchy",
            "blockSizeInMB": 50
        })
    );
    assert_eq!(fragment.format_settings().unwrap()["fileExtension"], ".txt");
    assert_eq!(
        Value::Object(fragment.location().unwrap().clone()),
        json!({"type": "LakehouseLocation", "folderPath": "landing"})
    );
    let dataset = fragment.dataset_settings().unwrap();
    assert_eq!(dataset["linkedService"]["properties"]["typeProperties"]["rootFolder"], "Files");
    assert!(!dataset.contains_key("externalReferences"));
}

#[test]
fn test_lakehouse_sink_defaults_to_files_root() {
    let err = SinkModel::from_config(
        "Lakehouse",
        json!({
            "lakehouse_name": "Analytics",
            "workspace_id": "ws-1",
            "artifact_id": "lh-2",
            "table_config": {"table_name": "t"}
        }),
    )
    .unwrap_err();
    assert!(err.is_configuration_error());
}

// ============================================================================
// S3 / File Share / REST
// ============================================================================

#[test]
fn test_s3_sink() {
    let mut sink = S3Sink::new(
        "s3-conn",
        "archive",
        FileConfiguration::new("daily", "orders.csv", FileFormat::DelimitedText),
    );
    sink.copy_behavior = CopyBehavior::FlattenHierarchy;

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.type_name(), "DelimitedTextSink");
    assert_eq!(
        Value::Object(fragment.store_settings().unwrap().clone()),
        json!({
            "type": "AmazonS3CompatibleWriteSettings",
            "maxConcurrentConnections": 1,
            "copyBehavior": "FlattenHierarchy"
        })
    );
    assert_eq!(fragment.format_settings().unwrap()["fileExtension"], ".csv");
    assert_eq!(
        Value::Object(fragment.location().unwrap().clone()),
        json!({
            "type": "AmazonS3CompatibleLocation",
            "bucketName": "archive",
            "folderPath": "daily",
            "fileName": "orders.csv"
        })
    );
}

#[test]
fn test_s3_sink_top_level_format_type() {
    let sink = SinkModel::from_config(
        "S3",
        json!({
            "connection_id": "s3-conn",
            "bucket_name": "archive",
            "sink_type": "BinarySink",
            "format_type": "Binary",
            "file_config": {"folder_path": "out", "file_name": "x.bin"}
        }),
    )
    .unwrap();

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.type_name(), "BinarySink");
    assert!(fragment.format_settings().is_none());
    assert_eq!(fragment.dataset_settings().unwrap()["type"], "Binary");
    assert!(!fragment
        .type_properties()
        .unwrap()
        .contains_key("columnDelimiter"));
}

#[test_case(json!({"file_config": {"folder_path": "out"}}), "BinarySink" ; "defaults to binary")]
#[test_case(json!({"format_type": "Json", "file_config": {"folder_path": "out"}}), "JsonSink" ; "format type")]
#[test_case(json!({"file_format": "Parquet", "file_config": {"folder_path": "out"}}), "ParquetSink" ; "file format")]
#[test_case(json!({"file_config": {"folder_path": "out", "file_format": "DelimitedText"}}), "DelimitedTextSink" ; "nested format")]
fn test_s3_sink_format_resolution(config: Value, expected: &str) {
    let mut config = config;
    config["connection_id"] = json!("s3-conn");
    config["bucket_name"] = json!("archive");

    let sink: S3Sink = serde_json::from_value(config).unwrap();
    assert_eq!(sink.to_copy_activity_sink().type_name(), expected);
}

#[test]
fn test_s3_sink_rejects_unknown_format() {
    let err = SinkModel::from_config(
        "S3",
        json!({
            "connection_id": "s3-conn",
            "bucket_name": "archive",
            "format_type": "Excel",
            "file_config": {"folder_path": "out"}
        }),
    )
    .unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_s3_sink_rejects_conflicting_formats() {
    let err = SinkModel::from_config(
        "S3",
        json!({
            "connection_id": "s3-conn",
            "bucket_name": "archive",
            "format_type": "Json",
            "file_config": {"folder_path": "out", "file_format": "Binary"}
        }),
    )
    .unwrap_err();
    assert!(err.is_configuration_error());
}

#[test_case("GoogleCloudStorage", json!({"connection_id": "c", "bucket_name": "b", "block_size": 8}) ; "gcs")]
#[test_case("FileSystem", json!({"connection_id": "c", "folder_path": "out", "copy_behaviour": "MergeFiles"}) ; "filesystem")]
#[test_case("REST", json!({"connection_id": "c", "batch_size": 100}) ; "rest")]
#[test_case("S3", json!({"connection_id": "c", "bucket_name": "b", "file_config": {}, "overwrite": true}) ; "s3")]
#[test_case("Lakehouse", json!({"lakehouse_name": "l", "workspace_id": "w", "artifact_id": "a", "root_folder": "Files", "file_config": {}, "partition": "x"}) ; "lakehouse")]
fn test_sink_unknown_keys_rejected(tag: &str, config: Value) {
    let err = SinkModel::from_config(tag, config).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_filesystem_sink() {
    let sink: FileSystemSink = serde_json::from_value(json!({
        "connection_id": "fs-conn",
        "folder_path": "exports",
        "file_format": "DelimitedText",
        "file_extension": ".csv",
        "column_delimiter": "|"
    }))
    .unwrap();

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(
        fragment.into_value(),
        json!({
            "type": "DelimitedTextSink",
            "storeSettings": {"type": "FileServerWriteSettings", "copyBehavior": "PreserveHierarchy"},
            "formatSettings": {"type": "DelimitedTextWriteSettings", "fileExtension": ".csv"},
            "datasetSettings": {
                "annotations": [],
                "type": "DelimitedText",
                "typeProperties": {
                    "location": {"type": "FileServerLocation", "folderPath": "exports"},
                    "columnDelimiter": "|",
                    "escapeChar": "\\",
                    "firstRowAsHeader": true,
                    "quoteChar": "\""
                },
                "schema": [],
                "externalReferences": {"connection": "fs-conn"}
            }
        })
    );
}

#[test]
fn test_filesystem_sink_json_pattern() {
    let mut sink = FileSystemSink::new(
        "fs-conn",
        FileConfiguration::new("exports", "out.json", FileFormat::Json),
    );
    sink.json_file_pattern = JsonFilePattern::ArrayOfObjects;
    sink.max_concurrent_connections = Some(2);

    let fragment = sink.to_copy_activity_sink();
    assert_eq!(fragment.format_settings().unwrap()["filePattern"], "arrayOfObjects");
    assert_eq!(fragment.store_settings().unwrap()["maxConcurrentConnections"], 2);
}

#[test]
fn test_rest_sink_defaults() {
    let fragment = RestSink::new("rest-conn")
        .with_relative_url("/ingest")
        .to_copy_activity_sink();

    assert_eq!(fragment.type_name(), "RestSink");
    assert_eq!(fragment.get("httpRequestTimeout").unwrap(), "00:05:00");
    assert_eq!(fragment.get("requestInterval").unwrap(), 10);
    assert_eq!(fragment.get("requestMethod").unwrap(), "POST");
    assert_eq!(fragment.get("writeBatchSize").unwrap(), 10000);
    assert_eq!(fragment.get("httpCompressionType").unwrap(), "none");
    assert!(!fragment.contains("additionalHeaders"));
    assert_eq!(
        fragment.type_properties().unwrap()["relativeUrl"],
        "/ingest"
    );
}

// ============================================================================
// Dispatch
// ============================================================================

#[test_case("MySQL")]
#[test_case("SharePoint")]
#[test_case("http")]
fn test_read_only_connectors_are_capability_gaps(tag: &str) {
    let err = SinkModel::from_config(tag, json!({"connection_id": "c"})).unwrap_err();
    assert!(err.is_capability_gap());
    assert!(!err.is_configuration_error());
    assert!(matches!(err, Error::UnsupportedCapability { ref capability, .. } if capability == "sink"));
}

#[test]
fn test_unknown_sink_tag() {
    let err = SinkModel::from_config("Kafka", json!({})).unwrap_err();
    assert!(matches!(err, Error::UnknownConnector { .. }));
    assert!(!err.is_capability_gap());
}

#[test]
fn test_sink_dispatch_by_tag() {
    let model = SinkModel::from_config(
        "googlecloudstorage",
        json!({
            "connection_id": "gcs-conn",
            "bucket_name": "bucket",
            "file_format": "Binary"
        }),
    )
    .unwrap();
    assert_eq!(model.kind(), ConnectorKind::GoogleCloudStorage);
    assert_eq!(model.to_copy_activity_sink().type_name(), "BinarySink");
}
