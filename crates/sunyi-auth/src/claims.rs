//! Session token claims and the identity derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sunyi_core::UserId;
use utoipa::ToSchema;

use crate::roles::Role;

/// Claims carried by a session token.
///
/// The role is captured at issuance and never re-read from storage, so a
/// role change does not affect tokens already handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: UserId,
    pub role: Role,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub,
            role: self.role,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// The verified caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
