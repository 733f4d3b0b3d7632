//! Tags API.

use crate::api::EntityRequest;
use crate::client::TurboClient;
use crate::error::Result;
use crate::request::{CommonRequestParams, RequestDescriptor};
use crate::types::Tag;

/// Tags to add to an entity.
#[derive(Debug, Clone, Default)]
pub struct TagEntityRequest {
    pub uuid: String,
    pub tags: Vec<Tag>,
    pub params: CommonRequestParams,
}

impl TagEntityRequest {
    pub fn new(uuid: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            uuid: uuid.into(),
            tags,
            params: CommonRequestParams::default(),
        }
    }

    pub fn with_params(mut self, params: CommonRequestParams) -> Self {
        self.params = params;
        self
    }
}

/// Tags API client.
pub struct TagsApi {
    client: TurboClient,
}

impl TagsApi {
    pub(crate) fn new(client: TurboClient) -> Self {
        Self { client }
    }

    /// List the tags of an entity.
    pub async fn get(&self, request: &EntityRequest) -> Result<Vec<Tag>> {
        let descriptor = RequestDescriptor::get(format!("{}/tags", request.path()))
            .with_params(&request.params);
        self.client.request_json(descriptor).await
    }

    /// Add tags to an entity. Returns the entity's tags after the update.
    pub async fn tag(&self, request: &TagEntityRequest) -> Result<Vec<Tag>> {
        let descriptor = RequestDescriptor::post(format!("/entities/{}/tags", request.uuid))
            .with_json(&request.tags)?
            .with_params(&request.params);
        self.client.request_json(descriptor).await
    }
}
