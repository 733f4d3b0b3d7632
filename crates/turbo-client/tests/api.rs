//! Domain API tests: entities, tags, actions, search, stats.

mod common;

use common::*;
use turbo_client::{
    ActionsRequest, CommonRequestParams, EntityRequest, Error, SearchCriteria, SearchRequest,
    StatisticRequest, StatsRequest, Tag, TagEntityRequest, TurboClient,
};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn oauth_then_actions_end_to_end() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("admin_token")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v3/entities/{ENTITY_UUID}/actions")))
        .and(header("authorization", "Bearer admin_token"))
        .and(header("content-type", "application/json"))
        .and(body_string(
            r#"{"actionStateList":["READY"],"actionTypeList":["RESIZE"],"detailLevel":"EXECUTION"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACTIONS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let client = TurboClient::connect(&oauth_params(&server)).await?;
    let actions = client
        .actions()
        .by_uuid(
            &ActionsRequest::new(ENTITY_UUID)
                .with_states(["READY"])
                .with_types(["RESIZE"])
                .with_detail_level("EXECUTION"),
        )
        .await?;

    assert_eq!(actions.len(), 1);
    let action = &actions[0];
    assert_eq!(action.uuid, ACTION_UUID);
    assert_eq!(action.target.uuid, ENTITY_UUID);
    assert_eq!(action.action_type, "RESIZE");
    assert_eq!(action.market_id, 777777);
    assert_eq!(action.risk.severity, "CRITICAL");
    assert_eq!(action.stats[0].units, "$/h");
    assert!(action.create_time.is_some());
    Ok(())
}

#[tokio::test]
async fn get_entity() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v3/entities/{ENTITY_UUID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(ENTITY_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let entity = session_client(&server)
        .entities()
        .get(&EntityRequest::new(ENTITY_UUID))
        .await?;

    assert_eq!(entity.uuid, ENTITY_UUID);
    assert_eq!(entity.display_name, "test-vm");
    assert_eq!(entity.class_name, "VirtualMachine");
    assert_eq!(entity.severity_breakdown.critical, 1);
    assert_eq!(entity.providers[0].display_name, "t3.small");
    Ok(())
}

#[tokio::test]
async fn get_entity_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/entities/0"))
        .respond_with(ResponseTemplate::new(404).set_body_string("entity 0 not found"))
        .mount(&server)
        .await;

    let err = session_client(&server)
        .entities()
        .get(&EntityRequest::new("0"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "entity 0 not found");
}

#[tokio::test]
async fn get_entity_tags() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v3/entities/{ENTITY_UUID}/tags")))
        .respond_with(ResponseTemplate::new(200).set_body_string(TAGS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let tags = session_client(&server)
        .tags()
        .get(&EntityRequest::new(ENTITY_UUID))
        .await?;

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].key, "Turbo_Team");
    assert_eq!(tags[0].values, ["AppInfra_Integrations", "AppInfra_Integrations A"]);
    assert_eq!(tags[1].key, "Turbo_Owner");
    assert_eq!(tags[1].values[0], "Turbonomic_Appinfra_Integrations");
    Ok(())
}

#[tokio::test]
async fn tag_entity_posts_tags() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v3/entities/{ENTITY_UUID}/tags")))
        .and(body_json(serde_json::json!([
            {"key": "Turbo_Team", "values": ["AppInfra_Integrations"]}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_string(TAGS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let request = TagEntityRequest::new(
        ENTITY_UUID,
        vec![Tag::new("Turbo_Team", ["AppInfra_Integrations"])],
    );
    let tags = session_client(&server).tags().tag(&request).await?;

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].values[1], "AppInfra_Integrations A");
    Ok(())
}

#[tokio::test]
async fn search_by_name() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/search"))
        .and(query_param("limit", "1"))
        .and(body_json(serde_json::json!({
            "criteriaList": [{
                "caseSensitive": false,
                "expType": "EQ",
                "expVal": "test-vm",
                "filterType": "vmsByName"
            }],
            "logicalOperator": "OR",
            "className": "VirtualMachine",
            "environmentType": "CLOUD"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest::new("test-vm", "VirtualMachine")
        .with_environment_type("CLOUD")
        .with_params(CommonRequestParams::new().with_query("limit", "1"));
    let results = session_client(&server).search().by_name(&request).await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].uuid, ENTITY_UUID);
    assert_eq!(results[0].discovered_by.target_type, "AWS");
    assert_eq!(results[0].aspects["virtualMachineAspect"]["numVCPUs"], 2);
    Ok(())
}

#[tokio::test]
async fn search_with_scope() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/search"))
        .and(body_string(
            r#"{"criteriaList":[],"logicalOperator":"AND","className":"VirtualMachine","scope":"null"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let criteria = SearchCriteria {
        logical_operator: "AND".to_string(),
        class_name: "VirtualMachine".to_string(),
        scope: "null".to_string(),
        ..Default::default()
    };
    let results = session_client(&server)
        .search()
        .search(&criteria, &CommonRequestParams::default())
        .await?;
    assert!(results.is_empty());
    Ok(())
}

#[tokio::test]
async fn search_by_name_unsupported_type_sends_nothing() {
    let server = MockServer::start().await;

    let err = session_client(&server)
        .search()
        .by_name(&SearchRequest::new("host-1", "PhysicalMachine"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedEntityType(ref t) if t == "PhysicalMachine"));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn get_stats() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v3/stats/{ENTITY_UUID}")))
        .and(body_json(serde_json::json!({
            "startDate": "-1d",
            "endDate": "0",
            "statistics": [{"name": "VMem"}, {"name": "CPU", "relatedEntityType": "ComputeTier"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let cpu = StatisticRequest {
        related_entity_type: "ComputeTier".to_string(),
        ..StatisticRequest::new("CPU")
    };
    let request =
        StatsRequest::new(ENTITY_UUID, vec![StatisticRequest::new("VMem"), cpu]).with_window("-1d", "0");
    let stats = session_client(&server).stats().get(&request).await?;

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].display_name, "test-vm");
    assert_eq!(stats[0].epoch, "HISTORICAL");

    let vmem = &stats[0].statistics[0];
    assert_eq!(vmem.name, "VMem");
    assert_eq!(vmem.values.total_max, Some(3984588.8));
    assert_eq!(vmem.hist_utilizations[0].utilization_type, "percentile");
    assert!(vmem.related_entity.is_none());

    let cpu = &stats[0].statistics[1];
    assert_eq!(cpu.related_entity.as_ref().map(|e| e.uuid.as_str()), Some("75941320319812"));
    assert_eq!(cpu.values.total_min, None);
    Ok(())
}
