//! Orchestration client types

use crate::error::Result;
use crate::pipeline::{ItemDefinition, PipelineDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Item type pipelines are stored as
pub const PIPELINE_ITEM_TYPE: &str = "DataPipeline";

/// Default orchestration API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.fabric.microsoft.com";

// ============================================================================
// Client Trait
// ============================================================================

/// Publishes compiled pipelines to a workspace
#[async_trait]
pub trait PipelineClient: Send + Sync {
    /// Create the named pipeline, or replace its definition if it exists
    async fn create_or_update(
        &self,
        workspace_id: &str,
        pipeline_name: &str,
        definition: &PipelineDefinition,
    ) -> Result<PipelineId>;
}

/// Identifier of a pipeline item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineId(pub String);

impl PipelineId {
    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Client Configuration
// ============================================================================

/// Configuration for the orchestration client
#[derive(Debug, Clone)]
pub struct FabricClientConfig {
    /// API root, without the `/v1` segment
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl Default for FabricClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: format!("fabric-copy/{}", env!("CARGO_PKG_VERSION")),
            token: None,
        }
    }
}

impl FabricClientConfig {
    /// Create a new config builder
    pub fn builder() -> FabricClientConfigBuilder {
        FabricClientConfigBuilder::default()
    }
}

/// Builder for orchestration client config
#[derive(Default)]
pub struct FabricClientConfigBuilder {
    config: FabricClientConfig,
}

impl FabricClientConfigBuilder {
    /// Set the API root
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Build the config
    pub fn build(self) -> FabricClientConfig {
        self.config
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// A workspace item as returned by the items API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEntity {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub workspace_id: Option<String>,

    #[serde(rename = "type", default)]
    pub item_type: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// One page of a list-items response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    #[serde(default)]
    pub value: Vec<ItemEntity>,

    #[serde(default)]
    pub continuation_token: Option<String>,
}

/// Body of a create-item request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub display_name: String,

    #[serde(rename = "type")]
    pub item_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub definition: ItemDefinition,
}

impl CreateItemRequest {
    /// Request creating a pipeline item
    pub fn pipeline(
        display_name: impl Into<String>,
        description: Option<String>,
        definition: ItemDefinition,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            item_type: PIPELINE_ITEM_TYPE.to_string(),
            description,
            definition,
        }
    }
}

/// Body of an update-definition request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateDefinitionRequest {
    pub definition: ItemDefinition,
}
