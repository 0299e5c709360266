//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: copy job YAML → pipeline document → items API

use base64::Engine as _;
use fabric_copy::client::{FabricClient, FabricClientConfig, PipelineClient};
use fabric_copy::loader::{load_copy_job, load_copy_job_from_str};
use fabric_copy::{Error, PipelineDefinition};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GCS_TO_LAKEHOUSE: &str = r"
workspace_id: ws-1
pipeline_name: segments-copy
source:
  type: GoogleCloudStorage
  config:
    connection_id: gcs-conn
    bucket_name: marketing
    file_format: DelimitedText
    file_path_config:
      file_list_path: marketing/lists/segments.txt
sink:
  type: Lakehouse
  config:
    lakehouse_name: Analytics
    workspace_id: ws-1
    artifact_id: lh-2
    root_folder: Tables
    table_config:
      table_name: customer_segments
    table_action_option: Append
";

fn client_for(server: &MockServer) -> FabricClient {
    let config = FabricClientConfig::builder()
        .base_url(server.uri())
        .token("test-token")
        .build();
    FabricClient::with_config(config).unwrap()
}

fn definition() -> PipelineDefinition {
    load_copy_job_from_str(GCS_TO_LAKEHOUSE)
        .unwrap()
        .compile()
        .unwrap()
}

async fn mount_item_list(server: &MockServer, items: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/workspaces/ws-1/items"))
        .and(query_param("type", "DataPipeline"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": items })))
        .mount(server)
        .await;
}

// ============================================================================
// Compilation
// ============================================================================

#[test]
fn test_compile_job_from_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(GCS_TO_LAKEHOUSE.as_bytes()).unwrap();

    let job = load_copy_job(file.path()).unwrap();
    let definition = job.compile().unwrap();
    let document = serde_json::to_value(&definition).unwrap();
    let activity = &document["properties"]["activities"][0];

    let source = &activity["typeProperties"]["source"];
    assert_eq!(source["type"], "DelimitedTextSource");
    assert_eq!(
        source["storeSettings"],
        json!({
            "type": "GoogleCloudStorageReadSettings",
            "maxConcurrentConnections": 1,
            "fileListPath": "marketing/lists/segments.txt"
        })
    );
    assert_eq!(
        source["datasetSettings"]["typeProperties"]["location"],
        json!({
            "type": "GoogleCloudStorageLocation",
            "bucketName": "marketing",
            "folderPath": "marketing/lists"
        })
    );

    let sink = &activity["typeProperties"]["sink"];
    assert_eq!(sink["type"], "LakehouseTableSink");
    assert_eq!(sink["tableActionOption"], "Append");
    assert_eq!(
        sink["datasetSettings"]["typeProperties"],
        json!({"table": "customer_segments"})
    );

    assert_eq!(
        document["properties"]["annotations"],
        json!(["Universal", "CopyData", "GoogleCloudStorageToLakehouse"])
    );
    assert_eq!(
        document["properties"]["folder"],
        json!({"name": "Universal Copy Pipelines"})
    );
}

#[test]
fn test_compile_is_byte_identical() {
    let first = definition().to_json_string(true).unwrap();
    let second = definition().to_json_string(true).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Publishing
// ============================================================================

#[tokio::test]
async fn test_create_pipeline_when_absent() {
    let server = MockServer::start().await;
    mount_item_list(
        &server,
        json!([{"id": "other", "displayName": "unrelated", "type": "DataPipeline"}]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/v1/workspaces/ws-1/items"))
        .and(body_partial_json(json!({
            "displayName": "segments-copy",
            "type": "DataPipeline",
            "description": "Universal copy pipeline: GoogleCloudStorage to Lakehouse"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "new-id",
            "displayName": "segments-copy",
            "type": "DataPipeline",
            "workspaceId": "ws-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let definition = definition();
    let id = client_for(&server)
        .create_or_update("ws-1", "segments-copy", &definition)
        .await
        .unwrap();
    assert_eq!(id.as_str(), "new-id");

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: Value = serde_json::from_slice(&create.body).unwrap();
    let part = &body["definition"]["parts"][0];
    assert_eq!(part["path"], "pipeline-content.json");
    assert_eq!(part["payloadType"], "InlineBase64");

    let payload = base64::engine::general_purpose::STANDARD
        .decode(part["payload"].as_str().unwrap())
        .unwrap();
    let published: PipelineDefinition = serde_json::from_slice(&payload).unwrap();
    assert_eq!(published, definition);
}

#[tokio::test]
async fn test_update_pipeline_when_present() {
    let server = MockServer::start().await;
    mount_item_list(
        &server,
        json!([{"id": "existing", "displayName": "segments-copy", "type": "DataPipeline"}]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/v1/workspaces/ws-1/items/existing/updateDefinition"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/workspaces/ws-1/items"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let id = client_for(&server)
        .create_or_update("ws-1", "segments-copy", &definition())
        .await
        .unwrap();
    assert_eq!(id.as_str(), "existing");

    let requests = server.received_requests().await.unwrap();
    let update = requests
        .iter()
        .find(|r| r.url.path().ends_with("/updateDefinition"))
        .unwrap();
    let body: Value = serde_json::from_slice(&update.body).unwrap();
    assert!(body.get("displayName").is_none());
    assert_eq!(body["definition"]["parts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_accepted_without_item_is_pending() {
    let server = MockServer::start().await;
    mount_item_list(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/v1/workspaces/ws-1/items"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", "https://api.test/v1/operations/op-1"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_or_update("ws-1", "segments-copy", &definition())
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::OperationPending { ref location } if location == "https://api.test/v1/operations/op-1")
    );
}

#[tokio::test]
async fn test_list_failure_is_remote_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/workspaces/ws-1/items"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_or_update("ws-1", "segments-copy", &definition())
        .await
        .unwrap_err();
    match err {
        Error::RemoteApi {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "token expired");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_create_failure_is_remote_api_error() {
    let server = MockServer::start().await;
    mount_item_list(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/v1/workspaces/ws-1/items"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorCode": "InvalidDefinition",
            "message": "Pipeline content is invalid"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_or_update("ws-1", "segments-copy", &definition())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RemoteApi { status_code: 400, ref message } if message.contains("InvalidDefinition")));
    assert!(!err.is_configuration_error());
}
