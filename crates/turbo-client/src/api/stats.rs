//! Statistics API.

use crate::client::TurboClient;
use crate::error::Result;
use crate::request::{CommonRequestParams, RequestDescriptor};
use crate::types::{EntityStats, StatisticRequest, StatsRequestBody};

/// Statistics to fetch for one entity.
#[derive(Debug, Clone, Default)]
pub struct StatsRequest {
    pub entity_uuid: String,
    /// Start of the window, e.g. `-1d` or an ISO timestamp; empty for current.
    pub start_date: String,
    pub end_date: String,
    pub statistics: Vec<StatisticRequest>,
    pub params: CommonRequestParams,
}

impl StatsRequest {
    pub fn new(entity_uuid: impl Into<String>, statistics: Vec<StatisticRequest>) -> Self {
        Self {
            entity_uuid: entity_uuid.into(),
            statistics,
            ..Default::default()
        }
    }

    pub fn with_window(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_params(mut self, params: CommonRequestParams) -> Self {
        self.params = params;
        self
    }

    fn body(&self) -> StatsRequestBody {
        StatsRequestBody {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            statistics: self.statistics.clone(),
        }
    }
}

/// Statistics API client.
pub struct StatsApi {
    client: TurboClient,
}

impl StatsApi {
    pub(crate) fn new(client: TurboClient) -> Self {
        Self { client }
    }

    /// Fetch statistics for an entity.
    pub async fn get(&self, request: &StatsRequest) -> Result<Vec<EntityStats>> {
        let descriptor = RequestDescriptor::post(format!("/stats/{}", request.entity_uuid))
            .with_json(&request.body())?
            .with_params(&request.params);
        self.client.request_json(descriptor).await
    }
}
