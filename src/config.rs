use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub app_url: String,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub log_dir: String,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "client-reporter".to_string()),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_default(),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
            cookie_secure: env::var("COOKIE_SECURE").map(|v| v != "false" && v != "0").unwrap_or(true),
        }
    }
}

/// Settings for the learning-path docs site binary.
#[derive(Clone)]
pub struct SiteConfig {
    pub docs_root: String,
    pub port: u16,
    pub log_dir: String,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            docs_root: env::var("DOCS_ROOT").unwrap_or_else(|_| "..".to_string()),
            port: env::var("DOCS_PORT").unwrap_or_else(|_| "3001".to_string()).parse().expect("DOCS_PORT must be a number"),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
        }
    }
}
