//! Entities API.

use crate::client::TurboClient;
use crate::error::Result;
use crate::request::{CommonRequestParams, RequestDescriptor};
use crate::types::Entity;

/// Identifies a single entity.
#[derive(Debug, Clone, Default)]
pub struct EntityRequest {
    pub uuid: String,
    pub params: CommonRequestParams,
}

impl EntityRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            params: CommonRequestParams::default(),
        }
    }

    pub fn with_params(mut self, params: CommonRequestParams) -> Self {
        self.params = params;
        self
    }

    pub(crate) fn path(&self) -> String {
        format!("/entities/{}", self.uuid)
    }
}

/// Entities API client.
pub struct EntitiesApi {
    client: TurboClient,
}

impl EntitiesApi {
    pub(crate) fn new(client: TurboClient) -> Self {
        Self { client }
    }

    /// Get an entity by UUID.
    pub async fn get(&self, request: &EntityRequest) -> Result<Entity> {
        let descriptor = RequestDescriptor::get(request.path()).with_params(&request.params);
        self.client.request_json(descriptor).await
    }
}
