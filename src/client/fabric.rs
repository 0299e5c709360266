//! Orchestration API client
//!
//! Publishes pipeline documents through the workspace items API. A pipeline
//! is matched by display name: an existing item gets its definition
//! replaced, otherwise a new item is created.

use super::types::{
    CreateItemRequest, FabricClientConfig, ItemEntity, ItemList, PipelineClient, PipelineId,
    UpdateDefinitionRequest, PIPELINE_ITEM_TYPE,
};
use crate::error::{Error, Result};
use crate::pipeline::PipelineDefinition;
use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the workspace items API
pub struct FabricClient {
    client: Client,
    base_url: Url,
    config: FabricClientConfig,
}

impl FabricClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(FabricClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: FabricClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &FabricClientConfig {
        &self.config
    }

    /// List every item of `item_type` in a workspace, following continuation tokens
    pub async fn list_items(&self, workspace_id: &str, item_type: &str) -> Result<Vec<ItemEntity>> {
        let url = self.endpoint(&format!("v1/workspaces/{workspace_id}/items"))?;
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self.client.get(url.clone()).query(&[("type", item_type)]);
            if let Some(token) = continuation.as_deref() {
                request = request.query(&[("continuationToken", token)]);
            }

            let response = self.send(request).await?;
            let page: ItemList = response.json().await?;
            debug!(
                workspace = workspace_id,
                count = page.value.len(),
                "Listed workspace items"
            );
            items.extend(page.value);

            match page.continuation_token {
                Some(token) if !token.is_empty() => continuation = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Find a pipeline item by display name
    pub async fn find_pipeline(
        &self,
        workspace_id: &str,
        pipeline_name: &str,
    ) -> Result<Option<ItemEntity>> {
        let items = self.list_items(workspace_id, PIPELINE_ITEM_TYPE).await?;
        Ok(items
            .into_iter()
            .find(|item| item.display_name.as_deref() == Some(pipeline_name)))
    }

    /// Create a pipeline item
    pub async fn create_pipeline(
        &self,
        workspace_id: &str,
        pipeline_name: &str,
        definition: &PipelineDefinition,
    ) -> Result<PipelineId> {
        let url = self.endpoint(&format!("v1/workspaces/{workspace_id}/items"))?;
        let body = CreateItemRequest::pipeline(
            pipeline_name,
            Some(definition.properties.description.clone()),
            definition.to_item_definition()?,
        );

        let response = self.send_json(self.client.post(url), &body).await?;
        let status = response.status();
        let location = location_header(&response);
        let text = response.text().await?;

        let created = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<ItemEntity>(&text)?.id
        };

        match created {
            Some(id) => {
                info!(workspace = workspace_id, id = %id, "Created pipeline '{pipeline_name}'");
                Ok(PipelineId(id))
            }
            None if status == StatusCode::ACCEPTED => {
                info!(
                    workspace = workspace_id,
                    "Pipeline '{pipeline_name}' creation accepted, not yet complete"
                );
                Err(Error::OperationPending {
                    location: location.unwrap_or_default(),
                })
            }
            None => Err(Error::remote_api(
                status.as_u16(),
                "Create response did not include an item id",
            )),
        }
    }

    /// Replace the definition of an existing pipeline item
    pub async fn update_pipeline_definition(
        &self,
        workspace_id: &str,
        item_id: &str,
        definition: &PipelineDefinition,
    ) -> Result<()> {
        let url = self.endpoint(&format!(
            "v1/workspaces/{workspace_id}/items/{item_id}/updateDefinition"
        ))?;
        let body = UpdateDefinitionRequest {
            definition: definition.to_item_definition()?,
        };

        let response = self.send_json(self.client.post(url), &body).await?;
        if response.status() == StatusCode::ACCEPTED {
            debug!(
                item = item_id,
                location = ?location_header(&response),
                "Definition update accepted"
            );
        }
        info!(workspace = workspace_id, id = item_id, "Updated pipeline definition");
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        request: RequestBuilder,
        body: &T,
    ) -> Result<Response> {
        self.send(request.json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        debug!("Orchestration API responded {} for {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Orchestration API request failed with {}", status.as_u16());
        Err(Error::remote_api(status.as_u16(), body))
    }
}

#[async_trait]
impl PipelineClient for FabricClient {
    async fn create_or_update(
        &self,
        workspace_id: &str,
        pipeline_name: &str,
        definition: &PipelineDefinition,
    ) -> Result<PipelineId> {
        let existing = self.find_pipeline(workspace_id, pipeline_name).await?;

        match existing.and_then(|item| item.id) {
            Some(id) => {
                debug!(id = %id, "Pipeline '{pipeline_name}' exists, replacing definition");
                self.update_pipeline_definition(workspace_id, &id, definition)
                    .await?;
                Ok(PipelineId(id))
            }
            None => {
                self.create_pipeline(workspace_id, pipeline_name, definition)
                    .await
            }
        }
    }
}

fn location_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
