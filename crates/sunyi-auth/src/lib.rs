//! # Sunyi Auth
//!
//! Session tokens, roles, and authorization checks for the Sunyi API.
//!
//! - [`roles`]: The two account roles, consumer and organizer
//! - [`claims`]: Token claims and the verified [`Identity`] derived from them
//! - [`jwt`]: [`TokenCodec`], which issues and verifies signed session tokens
//! - [`authorize`]: The role gate and the ownership check
//!
//! Tokens are self-contained. Validity is decided by signature and expiry
//! alone; there is no server-side session store and no revocation.
//!
//! # Example
//!
//! ```ignore
//! use sunyi_auth::{Role, TokenCodec, authorize_loaded, require_role};
//!
//! let codec = TokenCodec::from_config(&jwt_config)?;
//! let identity = codec.parse(&token)?.identity();
//!
//! require_role(Some(&identity), Role::Organizer)?;
//! let gig = authorize_loaded(identity.user_id, store.find(id).await?)?;
//! ```

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod roles;

// Re-export commonly used types at crate root
pub use authorize::{
    AuthzError, Owned, UNAUTHENTICATED_MESSAGE, authorize_loaded, authorize_mutation,
    require_role,
};
pub use claims::{Claims, Identity};
pub use jwt::{TokenCodec, TokenError};
pub use roles::{ParseRoleError, Role};
