// ABOUTME: Integration tests for the lending API client against a mocked server
// ABOUTME: Verifies credential forwarding, record fabrication and status classification

use std::time::Duration;

use chrono::DateTime;
use lendflow_config::Endpoint;
use lendflow_core::{
    AiInsights, Credential, DealStore, ExternalDealUpdate, FallbackReason, GeneratedDeal,
};
use lendflow_store::{ListQuery, StoreClient, StoreError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> StoreClient {
    let endpoint = Endpoint::new(server.uri(), Duration::from_secs(5));
    StoreClient::new(Some(endpoint), Duration::from_secs(5)).unwrap()
}

fn credential() -> Credential {
    Credential::new("Bearer caller-token").unwrap()
}

fn generated_deal() -> GeneratedDeal {
    GeneratedDeal {
        client_name: "Oakwood Development Ltd".to_string(),
        amount: 2_500_000.0,
        loan_type: "Bridging Loan".to_string(),
        status: String::new(),
        next_step: String::new(),
        short_summary: "Bridge for acquisition".to_string(),
        credit_paper_draft: "# Paper".to_string(),
        ai_insights: AiInsights::default(),
        ai_red_flags: vec![],
        connected_data_sources: vec!["Local Text Extraction".to_string()],
    }
}

fn record_body(id: i64) -> serde_json::Value {
    json!({
        "Id": id,
        "ClientName": "Oakwood Development Ltd",
        "Amount": 2500000.0,
        "Type": "Bridging Loan",
        "NextSteps": "Initial Review",
        "Status": "Under Review",
        "DateCreated": "2024-01-15T09:30:00Z",
        "DateUpdated": "2024-01-15T09:30:00Z"
    })
}

#[tokio::test]
async fn test_persist_forwards_credential_and_pascal_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deals"))
        .and(header("authorization", "Bearer caller-token"))
        .and(body_partial_json(json!({
            "ClientName": "Oakwood Development Ltd",
            "Type": "Bridging Loan",
            "NextSteps": "Initial Review",
            "Status": "Under Review",
            "LtvRatio": "N/A",
            "ExitProbability": "Unknown",
            "AiRedFlags": "[]",
            "ConnectedDataSources": "[\"Local Text Extraction\"]"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(record_body(981)))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).persist(&generated_deal(), &credential()).await;

    assert!(!result.is_synthesized());
    assert_eq!(result.data().id, Some(981));
}

#[tokio::test]
async fn test_persist_server_error_fabricates_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .mount(&server)
        .await;

    let result = client_for(&server).persist(&generated_deal(), &credential()).await;

    assert_eq!(result.reason(), Some(&FallbackReason::UpstreamStatus(500)));
    let record = result.into_data();
    assert!(record.id.is_some_and(|id| id > 0));
    let created = record.date_created.unwrap();
    let updated = record.date_updated.unwrap();
    assert!(DateTime::parse_from_rfc3339(&created).is_ok());
    assert!(DateTime::parse_from_rfc3339(&updated).is_ok());
    assert_eq!(record.client_name.as_deref(), Some("Oakwood Development Ltd"));
    assert_eq!(record.risk_rating.as_deref(), Some("Unknown"));
}

#[tokio::test]
async fn test_persist_timeout_fabricates_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(record_body(1))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let endpoint = Endpoint::new(server.uri(), Duration::from_millis(200));
    let client = StoreClient::new(Some(endpoint), Duration::from_millis(200)).unwrap();

    let result = client.persist(&generated_deal(), &credential()).await;
    assert_eq!(result.reason(), Some(&FallbackReason::Timeout));
}

#[tokio::test]
async fn test_persist_unconfigured_makes_no_call() {
    let client = StoreClient::new(None, Duration::from_secs(10)).unwrap();

    let result = client.persist(&generated_deal(), &credential()).await;

    assert_eq!(result.reason(), Some(&FallbackReason::NotConfigured));
    assert!(result.data().id.is_some());
}

#[tokio::test]
async fn test_list_forwards_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deals"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("stage", "Underwriting"))
        .and(header("authorization", "Bearer caller-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [record_body(1), record_body(2)],
            "total": 12,
            "currentPage": 2,
            "totalPages": 2,
            "start": false,
            "end": true
        })))
        .mount(&server)
        .await;

    let query = ListQuery {
        page: 2,
        limit: 10,
        stage: Some("Underwriting".to_string()),
        status: None,
    };
    let page = client_for(&server).list_deals(&query, &credential()).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 12);
    assert_eq!(page.current_page, 2);
    assert!(page.end);
}

#[tokio::test]
async fn test_status_classification() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deals/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/deals/401"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/deals/403"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/deals/422"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "Amount invalid"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let credential = credential();

    assert!(matches!(
        client.get_deal("404", &credential).await,
        Err(StoreError::NotFound(_))
    ));
    match client.get_deal("401", &credential).await {
        Err(StoreError::Unauthorized(message)) => assert_eq!(message, "expired"),
        other => panic!("expected unauthorized, got {:?}", other),
    }
    assert!(matches!(
        client.update_deal("403", &ExternalDealUpdate::default(), &credential).await,
        Err(StoreError::Forbidden(_))
    ));
    match client.get_deal("422", &credential).await {
        Err(StoreError::Http { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Amount invalid");
        }
        other => panic!("expected http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_sends_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/deals/7"))
        .and(body_partial_json(json!({"Status": "Approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let update = ExternalDealUpdate {
        status: Some("Approved".to_string()),
        ..Default::default()
    };
    let record = client_for(&server)
        .update_deal("7", &update, &credential())
        .await
        .unwrap();

    assert_eq!(record.id, Some(7));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let endpoint = Endpoint::new("http://127.0.0.1:1", Duration::from_secs(2));
    let client = StoreClient::new(Some(endpoint), Duration::from_secs(2)).unwrap();

    let result = client.get_deal("1", &credential()).await;
    assert!(result.is_err_and(|e| e.is_network_error()));
}
