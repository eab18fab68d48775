// tests/store_routes.rs
//
// Saved-article endpoints: save (scored on the way in), duplicates, filters, delete.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value as Json};

use common::{app_with, send, FakeNews};

fn post_body(url: &str, title: &str, published_at: &str) -> Json {
    json!({
        "source": { "id": null, "name": "CNN" },
        "title": title,
        "url": url,
        "publishedAt": published_at
    })
}

#[tokio::test]
async fn save_scores_unscored_articles_and_rejects_duplicates() {
    let app = app_with(FakeNews::failing());

    let (status, saved) = send(
        app.clone(),
        "POST",
        "/api/articles",
        Some(post_body("https://x/1", "Senate vote", "2024-03-01T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["biasRating"], -5);
    assert_eq!(saved["category"], "politics");
    assert!(saved["id"].as_str().is_some_and(|id| id.len() == 12));
    assert!(saved["savedAt"].is_string());

    let (status, err) = send(
        app.clone(),
        "POST",
        "/api/articles",
        Some(post_body("https://x/1", "Other title", "2024-03-02T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "Article already saved");

    let (status, _) = send(
        app,
        "POST",
        "/api/articles",
        Some(json!({ "title": "no url" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_keeps_client_supplied_score() {
    let app = app_with(FakeNews::failing());
    let mut body = post_body("https://x/2", "Senate vote", "2024-03-01T10:00:00Z");
    body["biasRating"] = json!(5);
    body["category"] = json!("business");

    let (status, saved) = send(app, "POST", "/api/articles", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["biasRating"], 5);
    assert_eq!(saved["biasDescription"], "Moderate right-wing bias");
    assert_eq!(saved["category"], "business");
}

#[tokio::test]
async fn list_filter_and_delete() {
    let app = app_with(FakeNews::failing());
    for (url, title, at) in [
        ("https://x/1", "Senate vote", "2024-03-01T10:00:00Z"),
        ("https://x/2", "NBA finals", "2024-03-05T10:00:00Z"),
        ("https://x/3", "NFL draft", "2024-04-10T10:00:00Z"),
    ] {
        let body = post_body(url, title, at);
        let (status, _) = send(app.clone(), "POST", "/api/articles", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, all) = send(app.clone(), "GET", "/api/articles", None).await;
    let all = all.as_array().expect("array").clone();
    assert_eq!(all.len(), 3);

    let (_, sports) = send(app.clone(), "GET", "/api/articles/category/Sports", None).await;
    assert_eq!(sports.as_array().map(Vec::len), Some(2));

    let (status, march) = send(
        app.clone(),
        "GET",
        "/api/articles/date?startDate=2024-03-01&endDate=2024-03-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = march
        .as_array()
        .expect("array")
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["NBA finals", "Senate vote"]);

    let uri = "/api/articles/date?startDate=yesterday";
    let (status, _) = send(app.clone(), "GET", uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = all[0]["id"].as_str().unwrap().to_string();
    let (status, msg) = send(app.clone(), "DELETE", &format!("/api/articles/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg["message"], "Article removed from saved list");

    let (status, _) = send(app.clone(), "DELETE", &format!("/api/articles/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(app, "GET", "/api/articles", None).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn description_always_follows_stored_rating() {
    let app = app_with(FakeNews::failing());

    let mut body = post_body("https://x/4", "Senate vote", "2024-03-01T10:00:00Z");
    body["biasDescription"] = json!("Strong right-wing bias");
    let (status, saved) = send(app.clone(), "POST", "/api/articles", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["biasRating"], -5);
    assert_eq!(saved["biasDescription"], "Moderate left-wing bias");

    let mut body = post_body("https://x/5", "Senate vote", "2024-03-01T10:00:00Z");
    body["biasRating"] = json!(40);
    body["biasDescription"] = json!("Minimal bias detected");
    let (_, saved) = send(app, "POST", "/api/articles", Some(body)).await;
    assert_eq!(saved["biasRating"], 10);
    assert_eq!(saved["biasDescription"], "Strong right-wing bias");
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = app_with(FakeNews::failing());

    let mut body = post_body("https://x/6", "Senate vote", "2024-03-01T10:00:00Z");
    body["category"] = json!("weather");
    let (status, err) = send(app.clone(), "POST", "/api/articles", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].as_str().unwrap().contains("weather"));

    let (_, hits) = send(app.clone(), "GET", "/api/articles/category/weather", None).await;
    assert_eq!(hits.as_array().map(Vec::len), Some(0));

    // Known categories are accepted case-insensitively and stored canonically.
    let mut body = post_body("https://x/6", "Senate vote", "2024-03-01T10:00:00Z");
    body["category"] = json!("Sports");
    let (status, saved) = send(app, "POST", "/api/articles", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["category"], "sports");
}
