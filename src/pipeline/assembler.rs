//! Copy activity and pipeline assembly

use super::types::{
    CopyActivityConfig, PipelineDefinition, PipelineFolder, PipelineProperties, PIPELINE_FOLDER,
};
use crate::connectors::ConnectorKind;
use crate::fragment::{CompiledActivityFragment, ObjectBuilder};
use crate::sink::CopySink;
use crate::source::CopySource;
use crate::types::{JsonObject, JsonValue};
use tracing::{debug, info};

/// Wrap a compiled source and sink into a copy activity
pub fn build_copy_activity(
    source: CompiledActivityFragment,
    sink: CompiledActivityFragment,
    config: &CopyActivityConfig,
) -> JsonObject {
    let policy = ObjectBuilder::new()
        .insert("timeout", config.timeout.as_str())
        .insert("retry", config.retry_count)
        .insert("retryIntervalInSeconds", config.retry_interval_seconds)
        .insert("secureOutput", config.secure_output)
        .insert("secureInput", config.secure_input);

    let type_properties = ObjectBuilder::new()
        .insert("source", source)
        .insert("sink", sink)
        .insert("enableStaging", config.enable_staging)
        .insert_opt("translator", config.effective_translator());

    ObjectBuilder::new()
        .insert("name", config.activity_name.as_str())
        .insert("type", "Copy")
        .insert_opt("description", config.description.as_deref())
        .insert("dependsOn", JsonValue::Array(Vec::new()))
        .insert("policy", policy)
        .insert("typeProperties", type_properties)
        .build()
}

impl PipelineDefinition {
    /// Wrap activities copying from `source` to `sink` into a pipeline document
    pub fn new(
        source: ConnectorKind,
        sink: ConnectorKind,
        activities: Vec<JsonValue>,
        description: Option<String>,
    ) -> Self {
        let description =
            description.unwrap_or_else(|| format!("Universal copy pipeline: {source} to {sink}"));
        Self {
            properties: PipelineProperties {
                activities,
                description,
                concurrency: 1,
                annotations: vec![
                    "Universal".to_string(),
                    "CopyData".to_string(),
                    format!("{source}To{sink}"),
                ],
                folder: PipelineFolder {
                    name: PIPELINE_FOLDER.to_string(),
                },
            },
        }
    }
}

/// Compile a source and sink into a single-activity pipeline document
pub fn compile_pipeline<S, K>(
    source: &S,
    sink: &K,
    config: &CopyActivityConfig,
    description: Option<String>,
) -> PipelineDefinition
where
    S: CopySource + ?Sized,
    K: CopySink + ?Sized,
{
    debug!(
        source = %source.kind(),
        sink = %sink.kind(),
        activity = %config.activity_name,
        "Compiling copy activity"
    );

    let activity = build_copy_activity(
        source.to_copy_activity_source(),
        sink.to_copy_activity_sink(),
        config,
    );
    let definition = PipelineDefinition::new(
        source.kind(),
        sink.kind(),
        vec![JsonValue::Object(activity)],
        description,
    );

    info!(
        "Compiled copy pipeline: {} to {}",
        source.kind(),
        sink.kind()
    );
    definition
}
