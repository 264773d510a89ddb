//! Registration and login payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use sunyi_auth::Role;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::users::User;

/// bcrypt only reads this many bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(alias = "handle")]
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 72,
        message = "Password must be between 8 and 72 characters"
    ))]
    #[schema(example = "longenoughpw")]
    pub password: String,
    pub role: Role,
}

impl RegisterRequest {
    /// Multi-byte characters can push a password past bcrypt's input limit
    /// while still passing the character-count rule.
    pub fn password_fits_hasher(&self) -> bool {
        self.password.len() <= MAX_PASSWORD_BYTES
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Login names the account by email, username, handle or a generic
/// identifier. Several keys may be sent at once; the first non-blank one in
/// that order is used.
#[derive(Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_login_identifier"))]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "alice")]
    pub username: Option<String>,
    pub handle: Option<String>,
    pub identifier: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "longenoughpw")]
    pub password: String,
}

impl LoginRequest {
    /// The value to look the account up by.
    pub fn identifier(&self) -> Option<&str> {
        [&self.email, &self.username, &self.handle, &self.identifier]
            .into_iter()
            .flatten()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }
}

fn validate_login_identifier(req: &LoginRequest) -> Result<(), ValidationError> {
    if req.identifier().is_none() {
        return Err(ValidationError::new("identifier_required")
            .with_message("Email or username is required".into()));
    }
    Ok(())
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier())
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returned by both registration and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
