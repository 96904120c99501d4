use std::sync::Arc;
use crate::domain::{
    models::{auth::{Claims, RefreshTokenRecord, TokenPair, ACCESS_AUDIENCE}, user::User},
    ports::AuthRepository
};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Sha256, Digest};

pub const ACCESS_TOKEN_MINUTES: i64 = 15;
pub const REFRESH_TOKEN_DAYS: i64 = 7;

pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, config: Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self { repo, config, encoding_key, decoding_key }
    }

    pub async fn login(&self, user: &User) -> Result<TokenPair, AppError> {
        let family_id = Uuid::new_v4().to_string();
        self.issue_token_pair(user, family_id, 1).await
    }

    /// Rotates a refresh token: the presented token is burned and a new pair is issued in the same family.
    pub async fn refresh(&self, raw_refresh_token: &str, user: &User) -> Result<TokenPair, AppError> {
        let token_hash = self.hash_token(raw_refresh_token);

        let record = self.repo.find_refresh_token(&token_hash).await?
            .ok_or(AppError::Unauthorized)?;

        if record.expires_at < Utc::now() {
            self.repo.delete_refresh_token(&token_hash).await?;
            return Err(AppError::Unauthorized);
        }

        self.repo.delete_refresh_token(&token_hash).await?;
        self.issue_token_pair(user, record.family_id, record.generation_id + 1).await
    }

    /// Signs the whole token family out, not just the presented token.
    pub async fn logout(&self, raw_refresh_token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(raw_refresh_token);
        match self.repo.find_refresh_token(&token_hash).await? {
            Some(record) => self.repo.delete_refresh_family(&record.family_id).await,
            None => Ok(()),
        }
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[ACCESS_AUDIENCE]);
        validation.set_issuer(&[self.config.auth_issuer.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    async fn issue_token_pair(&self, user: &User, family_id: String, generation_id: i32) -> Result<TokenPair, AppError> {
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();
        let exp = (now + Duration::minutes(ACCESS_TOKEN_MINUTES)).timestamp() as usize;

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: user.id.clone(),
            aud: ACCESS_AUDIENCE.to_string(),
            exp,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            csrf: csrf_token.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        let refresh_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect();

        let refresh_record = RefreshTokenRecord {
            token_hash: self.hash_token(&refresh_token),
            user_id: user.id.clone(),
            family_id,
            generation_id,
            expires_at: now + Duration::days(REFRESH_TOKEN_DAYS),
            created_at: now,
        };

        self.repo.create_refresh_token(&refresh_record).await?;
        Ok(TokenPair { access_token, refresh_token, csrf_token })
    }

    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
