//! Pipeline assembly
//!
//! Wraps compiled source and sink fragments into a copy activity, the
//! activity into a pipeline document, and the document into the base64
//! definition part the orchestration API accepts.

mod assembler;
mod types;

pub use assembler::{build_copy_activity, compile_pipeline};
pub use types::{
    CopyActivityConfig, DefinitionPart, ItemDefinition, PipelineDefinition, PipelineFolder,
    PipelineProperties, PIPELINE_CONTENT_PATH, PIPELINE_FOLDER,
};

#[cfg(test)]
mod tests;
