//! API integration tests

use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready_reports_feed_state() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
    assert!(body["deck_loaded"].is_boolean());
    assert!(body["deck_size"].is_number());
    assert!(body["checkin"]["available"].is_boolean());
}

#[tokio::test]
#[ignore]
async fn test_get_display_frame() {
    let client = Client::new();

    let response = client
        .get(format!("{}/display", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["loading"].is_boolean());
    assert!(body["index"].is_number());
    assert!(body["total"].is_number());
    assert!(body["gallery_index"].is_number());
    assert!(body["video_index"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_display_navigation_round_trip() {
    let client = Client::new();

    let response = client
        .post(format!("{}/display/next", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let after_next: Value = response.json().await.expect("Failed to parse response");
    assert!(after_next["index"].is_number());

    let response = client
        .post(format!("{}/display/previous", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let after_previous: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(after_previous["total"], after_next["total"]);
}

#[tokio::test]
#[ignore]
async fn test_jump_clamps_out_of_range() {
    let client = Client::new();

    let response = client
        .post(format!("{}/display/jump", BASE_URL))
        .json(&serde_json::json!({ "index": 9999 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let index = body["index"].as_i64().expect("No index in frame");
    let total = body["total"].as_i64().expect("No total in frame");
    assert!(index < total.max(1));
}

#[tokio::test]
#[ignore]
async fn test_list_slides() {
    let client = Client::new();

    let response = client
        .get(format!("{}/slides", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_floor_session() {
    let client = Client::new();

    let response = client
        .get(format!("{}/floor/session", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_string());
    assert!(body["time"].is_string());
    assert!(body["color"].is_string());
    assert!(body["reservations"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_floor_platforms_always_ten() {
    let client = Client::new();

    for query in ["", "?large=true"] {
        let response = client
            .get(format!("{}/floor/platforms{}", BASE_URL, query))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());

        let body: Value = response.json().await.expect("Failed to parse response");
        let slots = body.as_array().expect("Platforms response is not an array");
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0]["platform"], 1);
        assert_eq!(slots[9]["platform"], 10);
        assert!(slots[0]["occupied"].is_boolean());
    }
}

#[tokio::test]
#[ignore]
async fn test_gallery_catalog() {
    let client = Client::new();

    let response = client
        .get(format!("{}/gallery", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let images = body.as_array().expect("Gallery response is not an array");
    assert!(!images.is_empty());
    assert!(images[0]["image"].is_string());
    assert!(images[0]["description"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_weekly_schedule() {
    let client = Client::new();

    let response = client
        .get(format!("{}/schedule", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let entries = body.as_array().expect("Schedule response is not an array");
    assert!(!entries.is_empty());
    assert!(entries[0]["workout_time"].is_string());
}
