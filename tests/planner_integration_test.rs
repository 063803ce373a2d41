use httpmock::prelude::*;
use meetplanner::adapters::VWorldSettings;
use meetplanner::{
    MeetError, MeetingPlanner, ParticipantRequest, RecommendationEngine, VWorldResolver,
    VenueCatalog,
};
use std::sync::Arc;
use std::time::Duration;

fn vworld_planner(server: &MockServer) -> anyhow::Result<MeetingPlanner> {
    let settings = VWorldSettings {
        address_endpoint: server.url("/req/address"),
        search_endpoint: server.url("/req/search"),
        api_key: "test-key".to_string(),
        timeout: Duration::from_secs(5),
        retry_attempts: 0,
        retry_delay: Duration::from_millis(1),
    };
    let resolver = Arc::new(VWorldResolver::new(settings)?);
    let engine = RecommendationEngine::new(Arc::new(VenueCatalog::seoul()));
    Ok(MeetingPlanner::new(resolver, engine))
}

fn not_found() -> serde_json::Value {
    serde_json::json!({ "response": { "status": "NOT_FOUND" } })
}

#[tokio::test]
async fn test_plan_resolves_addresses_through_vworld() -> anyhow::Result<()> {
    let server = MockServer::start();

    let gangnam = server.mock(|when, then| {
        when.method(GET)
            .path("/req/address")
            .query_param("address", "Gangnam-daero 396")
            .query_param("type", "road");
        then.status(200).json_body(serde_json::json!({
            "response": {
                "status": "OK",
                "result": { "point": { "x": "127.0276", "y": "37.4979" } }
            }
        }));
    });

    // 道路名與地號皆查無 → 改用地點搜尋
    let hongdae_address = server.mock(|when, then| {
        when.method(GET)
            .path("/req/address")
            .query_param("address", "Hongdae");
        then.status(200).json_body(not_found());
    });
    let hongdae_search = server.mock(|when, then| {
        when.method(GET)
            .path("/req/search")
            .query_param("query", "Hongdae")
            .query_param("type", "place");
        then.status(200).json_body(serde_json::json!({
            "response": {
                "status": "OK",
                "result": { "items": [ { "point": { "x": "126.9244", "y": "37.5571" } } ] }
            }
        }));
    });

    let planner = vworld_planner(&server)?;
    let report = planner
        .plan(
            &[
                ParticipantRequest::from_text("A", "Gangnam-daero 396"),
                ParticipantRequest::from_text("B", "Hongdae"),
            ],
            "cafe_talk",
        )
        .await?;

    gangnam.assert();
    hongdae_address.assert_hits(2);
    hongdae_search.assert();

    assert_eq!(report.purpose, "cafe_talk");
    assert_eq!(report.participants["A"].lat, 37.4979);
    assert_eq!(report.participants["B"].lng, 126.9244);
    assert_eq!(report.recommendations.len(), 5);
    assert_eq!(report.recommendations[0].label, "Itaewon Station");
    Ok(())
}

#[tokio::test]
async fn test_plan_fails_when_an_origin_is_not_found() -> anyhow::Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/req/address");
        then.status(200).json_body(not_found());
    });
    server.mock(|when, then| {
        when.method(GET).path("/req/search");
        then.status(200).json_body(serde_json::json!({
            "response": { "status": "OK", "result": { "items": [] } }
        }));
    });

    let planner = vworld_planner(&server)?;
    let result = planner
        .plan(
            &[
                ParticipantRequest::from_text("A", "Atlantis"),
                ParticipantRequest::from_text("B", "El Dorado"),
            ],
            "date",
        )
        .await;

    match result {
        Err(MeetError::UnresolvedAddress { participant, .. }) => assert_eq!(participant, "A"),
        other => panic!("expected UnresolvedAddress, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_plan_rejects_invalid_requests_without_calling_resolver() -> anyhow::Result<()> {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(not_found());
    });

    let planner = vworld_planner(&server)?;
    let result = planner
        .plan(&[ParticipantRequest::from_text("A", "Gangnam")], "cafe_talk")
        .await;

    assert!(matches!(result, Err(MeetError::InvalidInput { .. })));
    any_request.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_resolver_outage_surfaces_as_http_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/req/address");
        then.status(500);
    });

    let planner = vworld_planner(&server)?;
    let result = planner
        .plan(
            &[
                ParticipantRequest::from_text("A", "Gangnam"),
                ParticipantRequest::from_text("B", "Hongdae"),
            ],
            "cafe_talk",
        )
        .await;

    let err = result.expect_err("resolver is down");
    assert!(matches!(err, MeetError::HttpError(_)));
    assert!(err.is_retryable());
    Ok(())
}
