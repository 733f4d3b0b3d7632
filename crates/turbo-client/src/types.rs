//! Request and response payloads for the Turbonomic API.
//!
//! Response types default every field; the platform omits fields freely
//! depending on entity type and detail level.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Shared
// ─────────────────────────────────────────────────────────────────────────────

/// Minimal reference to another entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityRef {
    pub uuid: String,
    pub display_name: String,
    pub class_name: String,
}

/// Target (probe) that discovered an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveredBy {
    pub uuid: String,
    pub display_name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub target_type: String,
    pub readonly: bool,
    pub is_probe_registered: bool,
}

/// Template an entity is provisioned from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub uuid: String,
    pub display_name: String,
    pub class_name: String,
    pub price: f64,
    pub discovered: bool,
    pub enable_match: bool,
}

/// Statistic filter, used both in requests and responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatFilter {
    #[serde(rename = "type")]
    pub filter_type: String,
    pub value: String,
    /// Free-form; the platform sends strings, numbers or null.
    pub display_name: serde_json::Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Entities
// ─────────────────────────────────────────────────────────────────────────────

/// Count of actions per severity on an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityBreakdown {
    #[serde(rename = "UNKNOWN")]
    pub unknown: i64,
    #[serde(rename = "NORMAL")]
    pub normal: i64,
    #[serde(rename = "MINOR")]
    pub minor: i64,
    #[serde(rename = "MAJOR")]
    pub major: i64,
    #[serde(rename = "CRITICAL")]
    pub critical: i64,
}

/// A service entity as returned by `GET /entities/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    pub uuid: String,
    pub display_name: String,
    pub class_name: String,
    pub environment_type: String,
    pub discovered_by: DiscoveredBy,
    pub vendor_ids: HashMap<String, String>,
    pub state: String,
    pub severity: String,
    pub cost_price: f64,
    pub severity_breakdown: SeverityBreakdown,
    pub providers: Vec<EntityRef>,
    pub consumers: Vec<EntityRef>,
    pub template: Template,
    /// Tag key to values.
    pub tags: HashMap<String, Vec<String>>,
    pub staleness: String,
    /// Type-specific aspects, left undecoded.
    pub aspects: serde_json::Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tags
// ─────────────────────────────────────────────────────────────────────────────

/// A tag key with its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub key: String,
    pub values: Vec<String>,
}

impl Tag {
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /entities/{uuid}/actions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsCriteria {
    pub action_state_list: Vec<String>,
    pub action_type_list: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail_level: String,
}

/// Why an action was generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Risk {
    pub sub_category: String,
    pub description: String,
    pub severity: String,
    pub importance: f64,
}

/// Entity touched by an action, with its discovery details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionEntity {
    pub uuid: String,
    pub display_name: String,
    pub class_name: String,
    pub environment_type: String,
    pub discovered_by: DiscoveredBy,
    pub vendor_ids: HashMap<String, String>,
    pub state: String,
    pub aspects: serde_json::Value,
    pub tags: HashMap<String, Vec<String>>,
}

/// Statistic attached to an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionStat {
    pub name: String,
    pub filters: Vec<StatFilter>,
    pub units: String,
    pub value: f64,
}

/// A recommended or executed action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Action {
    pub uuid: String,
    pub display_name: String,
    #[serde(rename = "actionImpactID")]
    pub action_impact_id: i64,
    #[serde(rename = "marketID")]
    pub market_id: i64,
    pub create_time: Option<DateTime<Utc>>,
    pub action_type: String,
    pub action_state: String,
    pub action_mode: String,
    pub details: String,
    pub importance: f64,
    pub target: ActionEntity,
    pub current_entity: ActionEntity,
    pub new_entity: ActionEntity,
    pub current_value: String,
    pub new_value: String,
    pub template: Template,
    pub risk: Risk,
    pub stats: Vec<ActionStat>,
    pub current_location: EntityRef,
    pub new_location: EntityRef,
    pub compound_actions: Vec<serde_json::Value>,
    pub source: String,
    #[serde(rename = "actionID")]
    pub action_id: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// One filter expression of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub case_sensitive: bool,
    pub exp_type: String,
    pub exp_val: String,
    pub filter_type: String,
}

/// Body of `POST /search`.
///
/// `scope`, `environmentType` and `cloudType` are only sent when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub criteria_list: Vec<Criteria>,
    pub logical_operator: String,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud_type: String,
}

/// A search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub uuid: String,
    pub display_name: String,
    pub class_name: String,
    pub environment_type: String,
    pub discovered_by: DiscoveredBy,
    pub vendor_ids: HashMap<String, String>,
    pub state: String,
    pub severity: String,
    pub cost_price: f64,
    pub template: Template,
    pub aspects: serde_json::Value,
    pub tags: HashMap<String, Vec<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

/// One statistic to fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub related_entity_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<StatFilter>,
}

impl StatisticRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `POST /stats/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequestBody {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub end_date: String,
    pub statistics: Vec<StatisticRequest>,
}

/// Aggregates of a statistic over the requested window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatValues {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    pub total: f64,
    pub total_max: Option<f64>,
    pub total_min: Option<f64>,
}

/// Historical utilization of a commodity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistUtilization {
    #[serde(rename = "type")]
    pub utilization_type: String,
    pub usage: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedEntity {
    pub uuid: String,
}

/// One statistic value for an entity at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistic {
    pub name: String,
    pub capacity: StatValues,
    pub reserved: StatValues,
    pub filters: Vec<StatFilter>,
    pub related_entity: Option<RelatedEntity>,
    pub units: String,
    pub values: StatValues,
    pub value: f64,
    pub commodity_source: HashMap<String, serde_json::Value>,
    pub hist_utilizations: Vec<HistUtilization>,
}

/// Statistics of one entity at one timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityStats {
    pub display_name: String,
    pub date: Option<DateTime<Utc>>,
    pub statistics: Vec<Statistic>,
    pub epoch: String,
}
