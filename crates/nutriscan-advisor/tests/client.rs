//! Integration tests for `AdvisorClient` using wiremock HTTP mocks.

use nutriscan_advisor::{AdvisorClient, AdvisorError};
use nutriscan_core::{
    NutrientEffect, NutrientFacts, NutrientLimit, NutrientUnits, Preferences, ProductFacts,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AdvisorClient {
    AdvisorClient::with_base_url("test-key", "test/model-1", 30, base_url)
        .expect("client construction should not fail")
}

fn test_facts() -> ProductFacts {
    ProductFacts {
        barcode: "3017620422003".to_string(),
        name: "Hazelnut spread".to_string(),
        ingredients_text: "sugar, palm oil, hazelnuts".to_string(),
        serving_size: "15 g".to_string(),
        ecoscore_grade: "d".to_string(),
        food_groups: "en:sweets".to_string(),
        nutrients: NutrientFacts {
            sugars: 56.3,
            ..NutrientFacts::default()
        },
        units: NutrientUnits::default(),
    }
}

fn test_preferences() -> Preferences {
    Preferences {
        limits: vec![NutrientLimit {
            name: "sugars".to_string(),
            effect: NutrientEffect::Below,
            limit: 20.0,
            unit: "g".to_string(),
        }],
        diets: vec![],
    }
}

#[tokio::test]
async fn assess_product_returns_completion_text() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": "gen-1",
        "choices": [
            { "message": { "role": "assistant", "content": "  High in sugar; a poor fit for your limit.  " } }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({ "model": "test/model-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let assessment = client
        .assess_product(&test_facts(), &test_preferences())
        .await
        .expect("should return assessment");

    assert_eq!(assessment, "High in sugar; a poor fit for your limit.");
}

#[tokio::test]
async fn non_2xx_response_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .assess_product(&test_facts(), &test_preferences())
        .await;

    assert!(
        matches!(result, Err(AdvisorError::ApiError { status: 401, ref body }) if body == "invalid key"),
        "expected ApiError(401), got: {result:?}"
    );
}

#[tokio::test]
async fn empty_choices_map_to_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .assess_product(&test_facts(), &test_preferences())
        .await;

    assert!(matches!(result, Err(AdvisorError::EmptyResponse)));
}

#[tokio::test]
async fn blank_completion_maps_to_empty_response() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "choices": [ { "message": { "role": "assistant", "content": "   " } } ]
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .assess_product(&test_facts(), &test_preferences())
        .await;

    assert!(matches!(result, Err(AdvisorError::EmptyResponse)));
}

#[tokio::test]
async fn malformed_body_surfaces_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .assess_product(&test_facts(), &test_preferences())
        .await;

    assert!(matches!(result, Err(AdvisorError::Deserialize { .. })));
}
