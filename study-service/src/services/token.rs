use crate::config::TokenConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use service_core::error::AppError;

pub const ACCESS_TOKEN_COOKIE: &str = "token";

/// Signs caller-supplied claims into short-lived HS256 access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Result<Self, AppError> {
        if config.ttl_minutes <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Access token TTL must be positive, got {} minutes",
                config.ttl_minutes
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            ttl: Duration::minutes(config.ttl_minutes),
        })
    }

    /// Signs `payload` with `iat` and `exp` claims added. Payloads that set
    /// their own `exp` are refused.
    pub fn issue(&self, payload: Map<String, Value>) -> Result<String, AppError> {
        if payload.contains_key("exp") {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payload must not carry an \"exp\" claim"
            )));
        }

        let now = Utc::now();
        let mut claims = payload;
        claims.insert("iat".to_string(), Value::from(now.timestamp()));
        claims.insert("exp".to_string(), Value::from((now + self.ttl).timestamp()));

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to sign access token: {}", e))
        })
    }
}
