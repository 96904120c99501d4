mod common;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use client_reporter::domain::models::{team::{Team, TeamMember, TeamRole}, user::User};
use client_reporter::error::AppError;
use common::{cookie_value, parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_register_creates_user_with_owned_default_team() {
    let app = TestApp::new().await;

    let response = app.register("Ada Lovelace", "Ada@Agency.test", "analytical-engine").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;
    assert_eq!(body["message"], "User created successfully");
    let user_id = body["userId"].as_str().unwrap().to_string();

    // Email is matched case-insensitively on login.
    let auth = app.login("ada@agency.test", "analytical-engine").await;
    assert_eq!(auth.user_id, user_id);

    let session = parse_body(app.request("GET", "/api/auth/session", Some(&auth), None).await).await;
    assert_eq!(session["user"]["email"], "ada@agency.test");
    assert_eq!(session["role"], "OWNER");
    assert_eq!(session["team"]["name"], "Ada Lovelace's Team");
    assert_eq!(session["team"]["slug"], format!("team-{}", &user_id[..8]));
    assert_eq!(session["team"]["owner_id"], user_id.as_str());
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = TestApp::new().await;
    assert_eq!(app.register("Grace", "grace@agency.test", "compiler-1952").await.status(), StatusCode::CREATED);

    let response = app.register("Grace Again", "GRACE@agency.test", "compiler-1952").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "User with this email already exists");
}

#[tokio::test]
async fn test_concurrent_duplicate_registrations_are_rejected_as_validation_errors() {
    let app = TestApp::new().await;

    let (first, second) = tokio::join!(
        app.register("Racer One", "racer@agency.test", "photo-finish"),
        app.register("Racer Two", "racer@agency.test", "photo-finish"),
    );
    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let loser = if first.status() == StatusCode::BAD_REQUEST { first } else { second };
    assert_eq!(parse_body(loser).await["error"], "User with this email already exists");

    // The insert itself reports the taken address, even without the lookup in front of it.
    let user = User::new("Racer Three".into(), "racer@agency.test".into(), None);
    let team = Team::default_for(&user.id, &user.name);
    let owner = TeamMember::new(team.id.clone(), user.id.clone(), TeamRole::Owner);
    match app.state.user_repo.create_with_team(&user, &team, &owner).await {
        Err(AppError::Validation(message)) => assert_eq!(message, "User with this email already exists"),
        other => panic!("expected a validation error, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_malformed_json_bodies_return_json_errors() {
    let app = TestApp::new().await;

    let send = |content_type: Option<&'static str>, body: &'static str| {
        let mut builder = Request::builder().method("POST").uri("/api/auth/register");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        app.router.clone().oneshot(builder.body(Body::from(body)).unwrap())
    };

    let cases = [
        (Some("application/json"), r#"{"name":5,"email":"typed@agency.test","password":"long-enough"}"#),
        (Some("application/json"), r#"{"name":"Trunc"#),
        (None, r#"{"name":"No Type","email":"notype@agency.test","password":"long-enough"}"#),
    ];
    for (content_type, body) in cases {
        let response = send(content_type, body).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/json"));
        assert!(parse_body(response).await["error"].is_string());
    }

    // Authenticated endpoints go through the same extractor.
    let auth = app.signup("Typed Client").await;
    let response = app.request("POST", "/api/clients", Some(&auth), Some(json!({ "name": ["not", "a", "string"] }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(parse_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_register_validates_every_field() {
    let app = TestApp::new().await;

    let response = app.register("A", "not-an-email", "short").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Name must be at least 2 characters");
    assert_eq!(body["fields"]["name"], "Name must be at least 2 characters");
    assert_eq!(body["fields"]["email"], "Invalid email address");
    assert_eq!(body["fields"]["password"], "Password must be at least 8 characters");

    // Missing fields are validation failures too, not deserialization errors.
    let response = app.request("POST", "/api/auth/register", None, Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new().await;
    app.register("Linus", "linus@agency.test", "kernel-hacker").await;

    let wrong_password = app.request(
        "POST", "/api/auth/login", None,
        Some(json!({ "email": "linus@agency.test", "password": "wrong-password" })),
    ).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown = app.request(
        "POST", "/api/auth/login", None,
        Some(json!({ "email": "nobody@agency.test", "password": "kernel-hacker" })),
    ).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_session_and_csrf() {
    let app = TestApp::new().await;

    let anonymous = app.request("GET", "/api/auth/session", None, None).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let auth = app.signup("Margaret").await;

    let forged = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/clients")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", "not-the-token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "name": "Apollo" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(forged.status(), StatusCode::FORBIDDEN);

    let missing = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/clients")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "name": "Apollo" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);

    let tampered = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/clients")
            .header(header::COOKIE, format!("access_token={}x", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(tampered.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_revokes_family() {
    let app = TestApp::new().await;
    let auth = app.signup("Barbara").await;

    let refresh = |token: String| {
        let router = app.router.clone();
        async move {
            router.oneshot(
                Request::builder().method("POST").uri("/api/auth/refresh")
                    .header(header::COOKIE, format!("refresh_token={}", token))
                    .body(Body::empty()).unwrap()
            ).await.unwrap()
        }
    };

    let rotated = refresh(auth.refresh_token.clone()).await;
    assert_eq!(rotated.status(), StatusCode::OK);
    let next_refresh = cookie_value(&rotated, "refresh_token").unwrap();
    assert_ne!(next_refresh, auth.refresh_token);
    let body = parse_body(rotated).await;
    assert!(body["csrf_token"].as_str().is_some());

    // The burned token cannot be replayed.
    assert_eq!(refresh(auth.refresh_token.clone()).await.status(), StatusCode::UNAUTHORIZED);

    let logout = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/logout")
            .header(header::COOKIE, format!("refresh_token={}", next_refresh))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(logout.status(), StatusCode::OK);

    assert_eq!(refresh(next_refresh).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let auth = app.signup("Katherine").await;
    app.register("Dorothy", "dorothy@agency.test", "fortran-1961").await;

    let response = app.request(
        "PUT", "/api/users/me", Some(&auth),
        Some(json!({ "name": "Katherine Johnson", "image": "https://cdn.test/k.png" })),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["name"], "Katherine Johnson");
    assert_eq!(body["image"], "https://cdn.test/k.png");

    let taken = app.request("PUT", "/api/users/me", Some(&auth), Some(json!({ "email": "dorothy@agency.test" }))).await;
    assert_eq!(taken.status(), StatusCode::BAD_REQUEST);

    let invalid = app.request("PUT", "/api/users/me", Some(&auth), Some(json!({ "email": "nope" }))).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}
