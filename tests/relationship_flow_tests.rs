// End-to-end tests for the term relationship flow against a mocked backend.
//
// Covers:
// - Empty store renders the empty state
// - Read-after-write for relate / unrelate
// - Recommendation panel rendering (confidence label + reason)
// - Transport and backend failures degrade visibly without crashing
// - Blank focal name never hits the search endpoint

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use termhub::client::http::ApiClient;
use termhub::client::relationships::HttpRelationshipStore;
use termhub::client::search::HttpRecommender;
use termhub::config::config::{BackendConfig, SearchConfig};
use termhub::models::outcome::{FailureReason, FetchOutcome};
use termhub::models::recommendation::Recommendation;
use termhub::observability::ClientMetrics;
use termhub::services::relationship_flow::{FocalTerm, MutationKind, RelationshipFlow};

fn api_for(uri: &str) -> Arc<ApiClient> {
    let config = BackendConfig {
        base_url: uri.to_string(),
        request_timeout: 5,
        connect_timeout: 5,
    };
    Arc::new(ApiClient::new(&config, Arc::new(ClientMetrics::default())).unwrap())
}

fn flow_for(uri: &str, focal: FocalTerm) -> RelationshipFlow {
    let api = api_for(uri);
    RelationshipFlow::new(
        focal,
        Arc::new(HttpRelationshipStore::new(api.clone())),
        Arc::new(HttpRecommender::new(api)),
        SearchConfig::default(),
    )
}

fn payment_status() -> Recommendation {
    Recommendation {
        id: "t4".to_string(),
        name: "Payment Status".to_string(),
        definition: "Enumerated field indicating transaction state".to_string(),
        aliases: String::new(),
        score: 0.92,
        reason: "Payment information commonly associated with customer entities".to_string(),
    }
}

#[tokio::test]
async fn empty_related_list_renders_the_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fetch-relations/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let flow = flow_for(&server.uri(), FocalTerm::new("t1", "Customer ID"));
    flow.refresh_related().await;

    assert!(flow.related().is_empty());
    assert_eq!(flow.related_count(), 0);
}

#[tokio::test]
async fn related_term_is_visible_after_relate_and_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upsert-term"))
        .and(body_partial_json(json!({"id": "t4", "name": "Payment Status"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/relate"))
        .and(body_partial_json(
            json!({"source_term_id": "er1", "related_term_id": "t4"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "rel1",
            "source_term_id": "er1",
            "related_term_id": "t4",
            "created_at": "2026-08-06T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/fetch-relations/er1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "t4", "name": "Payment Status", "definition": "Enumerated field indicating transaction state"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server.uri(), FocalTerm::new("er1", "Customer Entity"));
    let receipt = flow.relate_then_refresh(&payment_status()).await.unwrap();

    assert_eq!(receipt.operation, MutationKind::Relate);
    assert_eq!(receipt.term_id, "t4");
    let related = flow.related();
    assert!(related.loaded().unwrap().iter().any(|t| t.id == "t4"));
}

#[tokio::test]
async fn unrelated_term_is_gone_after_the_refresh() {
    let server = MockServer::start().await;
    // The list endpoint answers once with t3 present, then with the
    // post-delete state.
    Mock::given(method("GET"))
        .and(path("/api/fetch-relations/er1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "t3", "name": "Product SKU", "definition": "Stock Keeping Unit identifier"}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/unrelate/er1/t3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/fetch-relations/er1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let flow = flow_for(&server.uri(), FocalTerm::new("er1", "Customer Entity"));
    flow.refresh_related().await;
    assert_eq!(flow.related_count(), 1);

    let receipt = flow.unrelate_then_refresh("t3").await.unwrap();
    assert_eq!(receipt.operation, MutationKind::Unrelate);
    assert!(flow.related().is_empty());
}

#[tokio::test]
async fn recommendation_panel_shows_confidence_and_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_partial_json(json!({"query": "Customer Entity"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "t4",
                "name": "Payment Status",
                "definition": "",
                "score": 0.92,
                "reason": "Payment information commonly associated with customer entities"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server.uri(), FocalTerm::new("er1", "Customer Entity"));
    flow.refresh_recommendations().await;

    let recommendations = flow.recommendations();
    let cards = recommendations.loaded().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].confidence_label(), "92% confidence");
    assert_eq!(
        cards[0].reason,
        "Payment information commonly associated with customer entities"
    );
    assert!(!flow.is_loading_recommendations());
}

#[tokio::test]
async fn loader_transport_failure_degrades_to_a_visible_failure() {
    // Unroutable endpoint: the request dies at the transport layer.
    let flow = flow_for("http://127.0.0.1:9", FocalTerm::new("t1", "Customer ID"));
    flow.refresh_related().await;

    match flow.related() {
        FetchOutcome::Failed(FailureReason::Transport(_)) => {}
        other => panic!("expected a transport failure, got {other:?}"),
    }
    assert_eq!(flow.related_count(), 0);
}

#[tokio::test]
async fn recommendation_backend_error_clears_the_spinner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("embedding backend down"))
        .mount(&server)
        .await;

    let flow = flow_for(&server.uri(), FocalTerm::new("er1", "Customer Entity"));
    flow.refresh_recommendations().await;

    assert!(!flow.is_loading_recommendations());
    match flow.recommendations() {
        FetchOutcome::Failed(FailureReason::Store(detail)) => {
            assert!(detail.contains("HTTP 500"));
        }
        other => panic!("expected a store failure, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_focal_name_never_hits_the_search_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;

    let flow = flow_for(&server.uri(), FocalTerm::new("t1", ""));
    flow.refresh_recommendations().await;

    assert!(flow.recommendations().is_empty());
}

#[tokio::test]
async fn mount_load_runs_loader_and_fetcher() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fetch-relations/er1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "t1", "name": "Customer ID", "definition": ""}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "t4", "name": "Payment Status", "score": 0.92, "reason": "related"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server.uri(), FocalTerm::new("er1", "Customer Entity"));
    flow.load().await;

    assert_eq!(flow.related_count(), 1);
    assert!(flow.recommendations().is_loaded());
}
