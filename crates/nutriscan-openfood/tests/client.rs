//! Integration tests for `OpenFoodClient` using wiremock HTTP mocks.

use nutriscan_openfood::{OpenFoodClient, OpenFoodError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OpenFoodClient {
    OpenFoodClient::with_base_url(10, "nutriscan-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn get_product_returns_normalized_facts() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": 1,
        "status_verbose": "product found",
        "product": {
            "product_name": "Nutella",
            "ingredients_text": "Sugar, palm oil, hazelnuts 13%, skimmed milk powder",
            "serving_size": "15 g",
            "ecoscore_grade": "d",
            "food_groups": "en:sweets",
            "nutriments": {
                "energy-kcal_100g": 539,
                "fat_100g": 30.9,
                "saturated-fat_100g": 10.6,
                "sugars_100g": 56.3,
                "potassium_100g": 0.407,
                "potassium_serving": 0.061,
                "salt_100g": 0.107,
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/product/3017620422003.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let facts = client
        .get_product("3017620422003")
        .await
        .expect("should parse product");

    assert_eq!(facts.barcode, "3017620422003");
    assert_eq!(facts.name, "Nutella");
    assert_eq!(facts.ecoscore_grade, "d");
    assert_eq!(facts.food_groups, "en:sweets");
    assert!((facts.nutrients.energy_kcal - 539.0).abs() < f64::EPSILON);
    assert!((facts.nutrients.saturated_fat - 10.6).abs() < f64::EPSILON);
    // Per-100g key wins over per-serving.
    assert!((facts.nutrients.potassium - 0.407).abs() < f64::EPSILON);
    // Absent fields resolve to the documented defaults.
    assert!((facts.nutrients.iron - 0.0).abs() < f64::EPSILON);
    assert_eq!(facts.units.iron, "g");
    assert_eq!(facts.units.energy_kcal, "kcal");
}

#[tokio::test]
async fn status_zero_envelope_maps_to_not_found() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": 0,
        "status_verbose": "product not found",
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/product/0000000000000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_product("0000000000000").await;

    assert!(
        matches!(result, Err(OpenFoodError::NotFound { ref barcode }) if barcode == "0000000000000"),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn http_404_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_product("42").await;

    assert!(matches!(result, Err(OpenFoodError::NotFound { .. })));
}

#[tokio::test]
async fn server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_product("42").await;

    assert!(matches!(result, Err(OpenFoodError::Http(_))));
}

#[tokio::test]
async fn malformed_body_surfaces_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_product("42").await;

    assert!(matches!(result, Err(OpenFoodError::Deserialize { .. })));
}

#[tokio::test]
async fn found_envelope_without_product_is_an_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": 1 });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_product("42").await;

    assert!(matches!(result, Err(OpenFoodError::ApiError(_))));
}
