//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs. The codec owns its signing key, so tests and
//! services can run with distinct keys side by side.
//!
//! Expiry is checked by the codec itself against an explicit clock rather
//! than by `jsonwebtoken`, for two reasons visible to callers:
//!
//! - the boundary is exact: a token is expired *at* `exp`, with no leeway
//! - the signature is always checked first, so a forged token that also
//!   happens to be expired reports [`TokenError::Invalid`]
//!
//! # Example
//!
//! ```ignore
//! use sunyi_auth::{Role, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret", Duration::from_secs(3600))?;
//! let token = codec.issue(user_id, Role::Organizer)?;
//! let claims = codec.parse(&token)?;
//! assert_eq!(claims.sub, user_id);
//! ```

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sunyi_config::JwtConfig;
use sunyi_core::{AppError, UserId};
use thiserror::Error;

use crate::authorize::UNAUTHENTICATED_MESSAGE;
use crate::claims::Claims;
use crate::roles::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Undecodable, tampered with, or signed with another key.
    #[error("token is malformed or its signature does not match")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("invalid token configuration: {0}")]
    Config(&'static str),
}

impl TokenError {
    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Invalid => "invalid",
            TokenError::Expired => "expired",
            TokenError::Signing(_) => "signing",
            TokenError::Config(_) => "config",
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, TokenError::Invalid | TokenError::Expired)
    }

    /// Rejections collapse to one 401 so clients cannot tell an expired
    /// token from a forged one.
    pub fn into_app_error(self) -> AppError {
        if self.is_rejection() {
            AppError::unauthorized(UNAUTHENTICATED_MESSAGE.to_string())
        } else {
            AppError::internal(self)
        }
    }
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Builds a codec from a shared secret and a token lifetime.
    ///
    /// An empty secret or a lifetime under one second is refused: a codec
    /// must never mint tokens that cannot expire.
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Config("signing secret is empty"));
        }
        if ttl.as_secs() == 0 {
            return Err(TokenError::Config("token lifetime must be at least one second"));
        }
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| TokenError::Config("token lifetime is too large"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, TokenError> {
        Self::new(config.secret.as_bytes(), config.ttl)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs as u64)
    }

    pub fn issue(&self, subject: UserId, role: Role) -> Result<String, TokenError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issues a token as if the current time were `issued_at`.
    ///
    /// Identical inputs produce an identical token.
    pub fn issue_at(
        &self,
        subject: UserId,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = issued_at.timestamp();
        let exp = iat
            .checked_add(self.ttl_secs)
            .ok_or(TokenError::Config("token expiry overflows"))?;

        let claims = Claims {
            sub: subject,
            role,
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        self.parse_at(token, Utc::now())
    }

    /// Verifies `token` and checks its expiry against `now`.
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token failed verification");
                TokenError::Invalid
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
