#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use client_reporter::{
    api::router::create_router,
    config::Config,
    domain::ports::EmailService,
    error::AppError,
    infra::factory::bootstrap_state_with_email,
    state::AppState,
};
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub attachment_name: Option<String>,
}

/// Records outgoing mail instead of calling the gateway.
#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            attachment_name: attachment_name.map(str::to_string),
        });
        Ok(())
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
    pub refresh_token: String,
    pub user_id: String,
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: Arc<MockEmailService>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret-with-enough-entropy-for-hs256".to_string(),
            auth_issuer: "test-issuer".to_string(),
            app_url: "http://localhost".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            log_dir: "./logs".to_string(),
            cookie_secure: false,
        };

        let mailer = Arc::new(MockEmailService::default());
        let state = Arc::new(bootstrap_state_with_email(&config, mailer.clone()).await);

        let pool = SqlitePoolOptions::new()
            .connect_with(SqliteConnectOptions::from_str(&db_url).unwrap())
            .await
            .expect("Failed to connect to test db");

        let router = create_router(state.clone());

        Self { router, pool, db_filename, state, mailer }
    }

    pub async fn request(&self, method: &str, uri: &str, auth: Option<&AuthHeaders>, body: Option<Value>) -> Response {
        self.request_for_team(method, uri, auth, None, body).await
    }

    /// Same as `request`, acting on the team named in `X-Team-Id`.
    pub async fn request_for_team(
        &self,
        method: &str,
        uri: &str,
        auth: Option<&AuthHeaders>,
        team_id: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(team_id) = team_id {
            builder = builder.header("X-Team-Id", team_id);
        }
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Response {
        self.request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": password })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let response = self.request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let access_token = cookie_value(&response, "access_token").expect("No access_token cookie returned");
        let refresh_token = cookie_value(&response, "refresh_token").expect("No refresh_token cookie returned");

        let body = parse_body(response).await;
        AuthHeaders {
            access_token,
            refresh_token,
            csrf_token: body["csrf_token"].as_str().expect("No csrf_token in body").to_string(),
            user_id: body["user"]["id"].as_str().expect("No user id in body").to_string(),
        }
    }

    /// Registers a fresh account and signs it in.
    pub async fn signup(&self, name: &str) -> AuthHeaders {
        let email = format!("{}-{}@agency.test", name.to_lowercase().replace(' ', "."), &Uuid::new_v4().to_string()[..8]);
        let response = self.register(name, &email, "correct-horse-battery").await;
        assert_eq!(response.status(), StatusCode::CREATED);
        self.login(&email, "correct-horse-battery").await
    }

    pub async fn team_id_of(&self, user_id: &str) -> String {
        sqlx::query_scalar("SELECT team_id FROM team_members WHERE user_id = ? AND role = 'OWNER'")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn create_client(&self, auth: &AuthHeaders, body: Value) -> Value {
        let response = self.request("POST", "/api/clients", Some(auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        parse_body(response).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with(&prefix))
        .map(|c| c[prefix.len()..].split(';').next().unwrap_or_default().to_string())
}

pub async fn parse_body(response: Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes)),
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}
