use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::config::JwtConfig;
use crate::models::{Admin, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Invalid token type")]
    InvalidTokenType,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenType::Access),
            "refresh" => Ok(TokenType::Refresh),
            _ => Err(TokenError::InvalidTokenType),
        }
    }
}

/// Decoded, verified token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub token_type: TokenType,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// On-the-wire claim set. `token_type` stays a string so an unknown
/// discriminator surfaces as a type mismatch rather than a decode failure.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    user_id: i64,
    username: String,
    role: Role,
    token_type: String,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// Access + refresh tokens minted together at login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

/// Issues and validates HS256 tokens for admin identities.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("JWT service initialized with HS256 secret");

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_token_lifetime: Duration::hours(config.access_token_expiry_hours),
            refresh_token_lifetime: Duration::hours(config.refresh_token_expiry_hours),
        }
    }

    pub fn lifetime(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access_token_lifetime,
            TokenType::Refresh => self.refresh_token_lifetime,
        }
    }

    pub fn issue(&self, admin: &Admin, token_type: TokenType) -> Result<String, TokenError> {
        self.issue_at(admin, token_type, Utc::now())
    }

    /// Sign a token whose validity window starts at `now`.
    pub fn issue_at(
        &self,
        admin: &Admin,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = WireClaims {
            user_id: admin.id,
            username: admin.username.clone(),
            role: admin.role,
            token_type: token_type.as_str().to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + self.lifetime(token_type)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn issue_pair(&self, admin: &Admin) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        Ok(TokenPair {
            access_token: self.issue_at(admin, TokenType::Access, now)?,
            refresh_token: self.issue_at(admin, TokenType::Refresh, now)?,
            access_expires_in: self.access_token_lifetime.num_seconds(),
            refresh_expires_in: self.refresh_token_lifetime.num_seconds(),
        })
    }

    pub fn validate(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        self.validate_at(token, expected, Utc::now())
    }

    /// Signature and structure first, then the type discriminator, then
    /// expiry. Nothing from an unverified payload is inspected.
    pub fn validate_at(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;

        let wire = decode::<WireClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::TokenInvalid)?
            .claims;

        let token_type: TokenType = wire.token_type.parse()?;
        if token_type != expected {
            return Err(TokenError::InvalidTokenType);
        }

        if now.timestamp() >= wire.exp {
            return Err(TokenError::TokenExpired);
        }

        Ok(Claims {
            user_id: wire.user_id,
            username: wire.username,
            role: wire.role,
            token_type,
            iat: wire.iat,
            nbf: wire.nbf,
            exp: wire.exp,
        })
    }
}
