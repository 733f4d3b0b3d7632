//! Search API.

use crate::client::TurboClient;
use crate::error::{Error, Result};
use crate::request::{CommonRequestParams, RequestDescriptor};
use crate::types::{Criteria, SearchCriteria, SearchResult};

/// Look up a single entity by exact name.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub name: String,
    /// Class name such as `VirtualMachine`; selects the name filter.
    pub entity_type: String,
    pub environment_type: String,
    pub cloud_type: String,
    pub case_sensitive: bool,
    pub params: CommonRequestParams,
}

impl SearchRequest {
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            ..Default::default()
        }
    }

    pub fn with_environment_type(mut self, environment_type: impl Into<String>) -> Self {
        self.environment_type = environment_type.into();
        self
    }

    pub fn with_cloud_type(mut self, cloud_type: impl Into<String>) -> Self {
        self.cloud_type = cloud_type.into();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_params(mut self, params: CommonRequestParams) -> Self {
        self.params = params;
        self
    }

    /// Build the search body: one `EQ` criterion, combined with `OR`.
    pub fn criteria(&self) -> Result<SearchCriteria> {
        Ok(SearchCriteria {
            criteria_list: vec![Criteria {
                case_sensitive: self.case_sensitive,
                exp_type: "EQ".to_string(),
                exp_val: self.name.clone(),
                filter_type: filter_type(&self.entity_type)?.to_string(),
            }],
            logical_operator: "OR".to_string(),
            class_name: self.entity_type.clone(),
            scope: String::new(),
            environment_type: self.environment_type.clone(),
            cloud_type: self.cloud_type.clone(),
        })
    }
}

/// Name filter for an entity type.
pub fn filter_type(entity_type: &str) -> Result<&'static str> {
    match entity_type {
        "VirtualMachine" => Ok("vmsByName"),
        "VirtualVolume" => Ok("virtualVolumeByName"),
        "DatabaseServer" => Ok("databaseByName"),
        other => Err(Error::UnsupportedEntityType(other.to_string())),
    }
}

/// Search API client.
pub struct SearchApi {
    client: TurboClient,
}

impl SearchApi {
    pub(crate) fn new(client: TurboClient) -> Self {
        Self { client }
    }

    /// Run an arbitrary search.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        params: &CommonRequestParams,
    ) -> Result<Vec<SearchResult>> {
        let descriptor = RequestDescriptor::post("/search")
            .with_json(criteria)?
            .with_params(params);
        self.client.request_json(descriptor).await
    }

    /// Find entities of one type by name.
    ///
    /// Fails with [`Error::UnsupportedEntityType`] before any request when
    /// the type has no name filter.
    pub async fn by_name(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let criteria = request.criteria()?;
        self.search(&criteria, &request.params).await
    }
}
