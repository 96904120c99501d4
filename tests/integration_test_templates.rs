mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_defaults_are_listed_first_and_read_only() {
    let app = TestApp::new().await;
    let auth = app.signup("Template Fan").await;

    let templates = parse_body(app.request("GET", "/api/templates", Some(&auth), None).await).await;
    let templates = templates.as_array().unwrap();
    assert_eq!(templates.len(), 4);
    assert!(templates.iter().all(|t| t["is_default"] == true));
    let categories: Vec<&str> = templates.iter().map(|t| t["category"].as_str().unwrap()).collect();
    for category in ["SEO", "ADS", "SOCIAL", "CUSTOM"] {
        assert!(categories.contains(&category));
    }

    let update = app.request("PUT", "/api/templates/default-seo", Some(&auth), Some(json!({ "name": "Mine now", "category": "SEO" }))).await;
    assert_eq!(update.status(), StatusCode::FORBIDDEN);
    let delete = app.request("DELETE", "/api/templates/default-ads", Some(&auth), None).await;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_custom_template_crud() {
    let app = TestApp::new().await;
    let auth = app.signup("Custom Maker").await;

    let invalid = app.request("POST", "/api/templates", Some(&auth), Some(json!({ "name": "X", "category": "PRINT" }))).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let fields = parse_body(invalid).await["fields"].clone();
    assert!(fields["name"].is_string());
    assert!(fields["category"].is_string());

    let created = app.request("POST", "/api/templates", Some(&auth), Some(json!({
        "name": "Monthly Social Pulse",
        "description": "Engagement roll-up",
        "category": "social",
    }))).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = parse_body(created).await;
    assert_eq!(created["category"], "SOCIAL");
    assert_eq!(created["is_default"], false);
    assert_eq!(created["usage_count"], 0);
    let template_id = created["id"].as_str().unwrap();

    let listed = parse_body(app.request("GET", "/api/templates", Some(&auth), None).await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 5);
    assert_eq!(listed[4]["id"], template_id);

    let updated = app.request("PUT", &format!("/api/templates/{}", template_id), Some(&auth), Some(json!({
        "name": "Quarterly Social Pulse",
        "description": "",
        "category": "SOCIAL",
    }))).await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = parse_body(updated).await;
    assert_eq!(updated["name"], "Quarterly Social Pulse");
    assert!(updated["description"].is_null());

    // Other teams cannot see it at all.
    let other = app.signup("Other Team").await;
    let foreign = app.request("DELETE", &format!("/api/templates/{}", template_id), Some(&other), None).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    let other_list = parse_body(app.request("GET", "/api/templates", Some(&other), None).await).await;
    assert_eq!(other_list.as_array().unwrap().len(), 4);

    let deleted = app.request("DELETE", &format!("/api/templates/{}", template_id), Some(&auth), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let listed = parse_body(app.request("GET", "/api/templates", Some(&auth), None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 4);
}
