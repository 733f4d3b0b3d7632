//! Actions API.

use crate::client::TurboClient;
use crate::error::Result;
use crate::request::{CommonRequestParams, RequestDescriptor};
use crate::types::{Action, ActionsCriteria};

/// Filters for the actions of one entity.
#[derive(Debug, Clone, Default)]
pub struct ActionsRequest {
    pub uuid: String,
    /// e.g. `READY`, `ACCEPTED`.
    pub action_states: Vec<String>,
    /// e.g. `RESIZE`, `MOVE`.
    pub action_types: Vec<String>,
    /// `STANDARD` or `EXECUTION`; omitted when empty.
    pub detail_level: String,
    pub params: CommonRequestParams,
}

impl ActionsRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_detail_level(mut self, level: impl Into<String>) -> Self {
        self.detail_level = level.into();
        self
    }

    pub fn with_params(mut self, params: CommonRequestParams) -> Self {
        self.params = params;
        self
    }

    /// The request body.
    pub fn criteria(&self) -> ActionsCriteria {
        ActionsCriteria {
            action_state_list: self.action_states.clone(),
            action_type_list: self.action_types.clone(),
            detail_level: self.detail_level.clone(),
        }
    }
}

/// Actions API client.
pub struct ActionsApi {
    client: TurboClient,
}

impl ActionsApi {
    pub(crate) fn new(client: TurboClient) -> Self {
        Self { client }
    }

    /// List the actions of an entity matching the request's filters.
    pub async fn by_uuid(&self, request: &ActionsRequest) -> Result<Vec<Action>> {
        let descriptor = RequestDescriptor::post(format!("/entities/{}/actions", request.uuid))
            .with_json(&request.criteria())?
            .with_params(&request.params);
        self.client.request_json(descriptor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_from_request() {
        let request = ActionsRequest::new("75941320319680")
            .with_states(["READY"])
            .with_types(["RESIZE"])
            .with_detail_level("EXECUTION");
        let criteria = request.criteria();

        assert_eq!(criteria.action_state_list, vec!["READY".to_string()]);
        assert_eq!(criteria.action_type_list, vec!["RESIZE".to_string()]);
        assert_eq!(criteria.detail_level, "EXECUTION");
    }
}
