//! Orchestration client
//!
//! Publishes compiled pipeline documents to a workspace. [`PipelineClient`]
//! is the seam callers depend on; [`FabricClient`] implements it over the
//! workspace items REST API.

mod fabric;
mod types;

pub use fabric::FabricClient;
pub use types::{
    CreateItemRequest, FabricClientConfig, FabricClientConfigBuilder, ItemEntity, ItemList,
    PipelineClient, PipelineId, UpdateDefinitionRequest, DEFAULT_BASE_URL, PIPELINE_ITEM_TYPE,
};
