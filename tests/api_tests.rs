//! API integration tests
//!
//! These run against a live server with a reachable database:
//!   API_KEY=test-key cargo run
//!   TEST_API_KEY=test-key cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000";

fn api_key() -> String {
    std::env::var("TEST_API_KEY").unwrap_or_else(|_| "test-key".to_string())
}

async fn create_book(client: &Client, title: &str, author: &str, year: i64) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("X-API-Key", api_key())
        .json(&json!({ "title": title, "author": author, "year": year }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse create response")
}

async fn delete_book(client: &Client, id: &str) {
    client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to send delete request");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check_requires_no_credentials() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert!(body["time"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_missing_api_key_is_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_wrong_api_key_is_rejected_without_side_effects() {
    let client = Client::new();

    let before: Value = client
        .get(format!("{}/books", BASE_URL))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse list");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("X-API-Key", "wrong-key")
        .json(&json!({ "title": "Intruder", "author": "Nobody", "year": 2024 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let after: Value = client
        .get(format!("{}/books", BASE_URL))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse list");

    assert_eq!(before, after);
}

#[tokio::test]
#[ignore]
async fn test_malformed_body_is_a_bad_request() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("X-API-Key", api_key())
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_get_unknown_book_is_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/no-such-id", BASE_URL))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_and_delete_of_unknown_book_are_not_found() {
    let client = Client::new();

    let response = client
        .put(format!("{}/books/no-such-id", BASE_URL))
        .header("X-API-Key", api_key())
        .json(&json!({ "title": "Ghost", "author": "Nobody", "year": 2024 }))
        .send()
        .await
        .expect("Failed to send update request");

    assert_eq!(response.status(), 404);

    let response = client
        .delete(format!("{}/books/no-such-id", BASE_URL))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to send delete request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_created_book_is_immediately_readable() {
    let client = Client::new();

    let created = create_book(&client, "Solaris", "Lem", 1961).await;
    let id = created["id"].as_str().expect("No id in response");
    assert!(!id.is_empty());
    assert!(created["regdate"].is_string());

    let fetched: Value = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to send get request")
        .json()
        .await
        .expect("Failed to parse get response");

    assert_eq!(fetched, created);

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_full_book_lifecycle() {
    let client = Client::new();

    // Create
    let created = create_book(&client, "Dune", "Herbert", 1965).await;
    let id = created["id"].as_str().expect("No id in response").to_string();
    assert_eq!(created["title"], "Dune");
    assert_eq!(created["author"], "Herbert");
    assert_eq!(created["year"], 1965);

    // Read back
    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to send get request");
    assert_eq!(response.status(), 200);
    let fetched: Value = response.json().await.expect("Failed to parse get response");
    assert_eq!(fetched["title"], "Dune");

    // Update; id and regdate must survive unchanged
    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .header("X-API-Key", api_key())
        .json(&json!({ "title": "Dune (rev)", "author": "Herbert", "year": 1965 }))
        .send()
        .await
        .expect("Failed to send update request");
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.expect("Failed to parse update response");
    assert_eq!(updated["title"], "Dune (rev)");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["regdate"], created["regdate"]);

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse delete response");
    assert!(body["message"].is_string());

    // Gone from both the get endpoint and the list
    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to send get request");
    assert_eq!(response.status(), 404);

    let list: Value = client
        .get(format!("{}/books", BASE_URL))
        .header("X-API-Key", api_key())
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse list");
    let ids: Vec<&str> = list
        .as_array()
        .expect("List is not an array")
        .iter()
        .filter_map(|book| book["id"].as_str())
        .collect();
    assert!(!ids.contains(&id.as_str()));
}
