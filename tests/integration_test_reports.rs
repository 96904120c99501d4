mod common;

use axum::http::StatusCode;
use client_reporter::background::run_pending_jobs;
use common::{body_text, parse_body, AuthHeaders, TestApp};
use serde_json::{json, Value};

async fn create_report(app: &TestApp, auth: &AuthHeaders, client_id: &str, extra: Value) -> Value {
    let mut body = json!({
        "client_id": client_id,
        "template_id": "default-seo",
        "date_from": "2025-01-01",
        "date_to": "2025-01-31",
    });
    if let (Some(target), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }

    let response = app.request("POST", "/api/reports", Some(auth), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    parse_body(response).await
}

#[tokio::test]
async fn test_report_generation_and_delivery_lifecycle() {
    let app = TestApp::new().await;
    let auth = app.signup("Agency Owner").await;
    let client = app.create_client(&auth, json!({ "name": "Acme Corporation", "email": "cmo@acme.test" })).await;
    let client_id = client["id"].as_str().unwrap();

    app.request(
        "POST", &format!("/api/clients/{}/integrations", client_id), Some(&auth),
        Some(json!({ "provider": "SEARCH_CONSOLE", "account_id": "sc-domain:acme.test" })),
    ).await;

    let report = create_report(&app, &auth, client_id, json!({})).await;
    let report_id = report["id"].as_str().unwrap().to_string();
    assert_eq!(report["status"], "DRAFT");
    assert_eq!(report["name"], "Acme Corporation Report");
    assert!(report["pdf_url"].is_null());

    // Nothing to download or send before generation.
    let document = app.request("GET", &format!("/api/reports/{}/document", report_id), Some(&auth), None).await;
    assert_eq!(document.status(), StatusCode::NOT_FOUND);
    let early_send = app.request("POST", &format!("/api/reports/{}/send", report_id), Some(&auth), None).await;
    assert_eq!(early_send.status(), StatusCode::BAD_REQUEST);

    let generate = app.request("POST", &format!("/api/reports/{}/generate", report_id), Some(&auth), None).await;
    assert_eq!(generate.status(), StatusCode::ACCEPTED);
    assert_eq!(parse_body(generate).await["status"], "GENERATING");

    let again = app.request("POST", &format!("/api/reports/{}/generate", report_id), Some(&auth), None).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);

    assert_eq!(run_pending_jobs(&app.state).await, 1);

    let detail = parse_body(app.request("GET", &format!("/api/reports/{}", report_id), Some(&auth), None).await).await;
    assert_eq!(detail["status"], "COMPLETED");
    assert_eq!(detail["pdf_url"], format!("/api/reports/{}/document", report_id));
    assert_eq!(detail["client"]["name"], "Acme Corporation");
    assert_eq!(detail["template"]["id"], "default-seo");
    assert_eq!(detail["jobs"][0]["status"], "COMPLETED");
    assert!(detail.get("document_html").is_none());

    let document = app.request("GET", &format!("/api/reports/{}/document", report_id), Some(&auth), None).await;
    assert_eq!(document.status(), StatusCode::OK);
    let html = body_text(document).await;
    assert!(html.contains("Acme Corporation"));
    assert!(html.contains("Search Console"));
    assert!(html.contains("31 days"));

    let templates = parse_body(app.request("GET", "/api/templates", Some(&auth), None).await).await;
    let seo = templates.as_array().unwrap().iter().find(|t| t["id"] == "default-seo").unwrap();
    assert_eq!(seo["usage_count"], 1);

    let send = app.request("POST", &format!("/api/reports/{}/send", report_id), Some(&auth), None).await;
    assert_eq!(send.status(), StatusCode::ACCEPTED);
    assert_eq!(run_pending_jobs(&app.state).await, 1);

    let sent = parse_body(app.request("GET", &format!("/api/reports/{}", report_id), Some(&auth), None).await).await;
    assert_eq!(sent["status"], "SENT");
    assert!(sent["sent_at"].is_string());

    let mails = app.mailer.sent.lock().unwrap().clone();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].recipient, "cmo@acme.test");
    assert_eq!(mails[0].subject, "Acme Corporation Report for Acme Corporation");
    assert!(mails[0].html_body.contains("Acme Corporation"));
    assert!(mails[0].html_body.contains(&format!("http://localhost/api/reports/{}/document", report_id)));
    assert_eq!(mails[0].attachment_name.as_deref(), Some("report-2025-01-01-2025-01-31.html"));

    // A sent report is final.
    let regenerate = app.request("POST", &format!("/api/reports/{}/generate", report_id), Some(&auth), None).await;
    assert_eq!(regenerate.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_requires_client_email() {
    let app = TestApp::new().await;
    let auth = app.signup("No Inbox").await;
    let client = app.create_client(&auth, json!({ "name": "Quiet Client" })).await;
    let report = create_report(&app, &auth, client["id"].as_str().unwrap(), json!({ "name": "Q1" })).await;
    let report_id = report["id"].as_str().unwrap();
    assert_eq!(report["name"], "Q1");

    app.request("POST", &format!("/api/reports/{}/generate", report_id), Some(&auth), None).await;
    run_pending_jobs(&app.state).await;

    let send = app.request("POST", &format!("/api/reports/{}/send", report_id), Some(&auth), None).await;
    assert_eq!(send.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(send).await["error"], "Client has no email address");
    assert!(app.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_wizard_validation() {
    let app = TestApp::new().await;
    let auth = app.signup("Wizard").await;
    let client = app.create_client(&auth, json!({ "name": "Initech" })).await;
    let client_id = client["id"].as_str().unwrap();

    let backwards = app.request("POST", "/api/reports", Some(&auth), Some(json!({
        "client_id": client_id,
        "template_id": "default-ads",
        "date_from": "2025-02-01",
        "date_to": "2025-01-01",
    }))).await;
    assert_eq!(backwards.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(backwards).await["fields"]["date_to"], "End date must be on or after the start date");

    let empty = app.request("POST", "/api/reports", Some(&auth), Some(json!({}))).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    let fields = parse_body(empty).await["fields"].clone();
    assert!(fields["client_id"].is_string());
    assert!(fields["template_id"].is_string());
    assert!(fields["date_from"].is_string());

    let unknown_template = app.request("POST", "/api/reports", Some(&auth), Some(json!({
        "client_id": client_id,
        "template_id": "missing",
        "date_from": "2025-01-01",
        "date_to": "2025-01-31",
    }))).await;
    assert_eq!(unknown_template.status(), StatusCode::NOT_FOUND);

    let other = app.signup("Other Agency").await;
    let foreign_client = app.request("POST", "/api/reports", Some(&other), Some(json!({
        "client_id": client_id,
        "template_id": "default-seo",
        "date_from": "2025-01-01",
        "date_to": "2025-01-31",
    }))).await;
    assert_eq!(foreign_client.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_delete_and_dashboard_stats() {
    let app = TestApp::new().await;
    let auth = app.signup("Stats").await;
    let acme = app.create_client(&auth, json!({ "name": "Acme" })).await;
    let globex = app.create_client(&auth, json!({ "name": "Globex" })).await;
    let acme_id = acme["id"].as_str().unwrap();
    let globex_id = globex["id"].as_str().unwrap();

    app.request(
        "POST", &format!("/api/clients/{}/integrations", acme_id), Some(&auth),
        Some(json!({ "provider": "GOOGLE_ADS", "account_id": "123-456" })),
    ).await;

    let first = create_report(&app, &auth, acme_id, json!({})).await;
    create_report(&app, &auth, acme_id, json!({ "template_id": "default-social" })).await;
    let third = create_report(&app, &auth, globex_id, json!({})).await;

    app.request("POST", &format!("/api/reports/{}/generate", first["id"].as_str().unwrap()), Some(&auth), None).await;
    run_pending_jobs(&app.state).await;

    let completed = parse_body(app.request("GET", "/api/reports?status=completed", Some(&auth), None).await).await;
    assert_eq!(completed.as_array().unwrap().len(), 1);
    assert_eq!(completed[0]["id"], first["id"]);

    let for_acme = parse_body(app.request("GET", &format!("/api/reports?client_id={}", acme_id), Some(&auth), None).await).await;
    assert_eq!(for_acme.as_array().unwrap().len(), 2);

    let bad_status = app.request("GET", "/api/reports?status=archived", Some(&auth), None).await;
    assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);

    let stats = parse_body(app.request("GET", "/api/dashboard/stats", Some(&auth), None).await).await;
    assert_eq!(stats["total_clients"], 2);
    assert_eq!(stats["reports_generated"], 1);
    assert_eq!(stats["reports_this_month"], 3);
    assert_eq!(stats["active_integrations"], 1);
    assert_eq!(stats["recent_reports"].as_array().unwrap().len(), 3);

    let clients = parse_body(app.request("GET", "/api/clients", Some(&auth), None).await).await;
    let acme_row = clients.as_array().unwrap().iter().find(|c| c["id"] == acme["id"]).unwrap();
    assert_eq!(acme_row["_count"]["reports"], 2);

    let third_id = third["id"].as_str().unwrap();
    let deleted = app.request("DELETE", &format!("/api/reports/{}", third_id), Some(&auth), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let gone = app.request("GET", &format!("/api/reports/{}", third_id), Some(&auth), None).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let other = app.signup("Outsider").await;
    let outsider_stats = parse_body(app.request("GET", "/api/dashboard/stats", Some(&other), None).await).await;
    assert_eq!(outsider_stats["total_clients"], 0);
    assert_eq!(outsider_stats["reports_this_month"], 0);
}

#[tokio::test]
async fn test_worker_fails_job_for_deleted_report() {
    let app = TestApp::new().await;
    let auth = app.signup("Flaky").await;
    let client = app.create_client(&auth, json!({ "name": "Vanishing Co" })).await;
    let report = create_report(&app, &auth, client["id"].as_str().unwrap(), json!({})).await;
    let report_id = report["id"].as_str().unwrap();

    app.request("POST", &format!("/api/reports/{}/generate", report_id), Some(&auth), None).await;
    sqlx::query("DELETE FROM reports WHERE id = ?").bind(report_id).execute(&app.pool).await.unwrap();

    assert_eq!(run_pending_jobs(&app.state).await, 1);

    let status: String = sqlx::query_scalar("SELECT status FROM jobs WHERE json_extract(payload, '$.report_id') = ?")
        .bind(report_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(status, "FAILED");
}
