//! JWT access-token validation and issuance.
//!
//! Tokens are HS256-signed and carry a [`Claims`] payload. Claims this
//! service does not know about are kept in [`Claims::extra`] rather than
//! rejected.

use std::collections::HashMap;

use georecord_core::access::Principal;
use georecord_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    pub login: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    #[serde(default)]
    pub jti: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            is_admin: self.is_admin,
        }
    }
}

/// Configuration for JWT validation and issuance.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Lifetime of tokens issued by [`JwtChecker::issue`] (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Validates bearer tokens into [`Claims`]. Built once at startup.
#[derive(Clone)]
pub struct JwtChecker {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_mins: i64,
}

impl JwtChecker {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            // HS256, validates exp.
            validation: Validation::default(),
            expiry_mins: config.access_token_expiry_mins,
        }
    }

    /// Validate signature and expiry, returning the embedded claims.
    pub fn check(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    /// Issue a fresh token for a user.
    pub fn issue(
        &self,
        user_id: DbId,
        login: &str,
        is_admin: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        self.sign(&Claims {
            sub: user_id,
            login: login.to_string(),
            is_admin,
            exp: now + self.expiry_mins * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
            extra: HashMap::new(),
        })
    }
}
