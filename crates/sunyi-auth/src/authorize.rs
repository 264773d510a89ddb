//! Role and ownership checks.
//!
//! Both checks are pure: no IO, no panics. The role gate compares the
//! caller's role against a required one. The ownership check compares the
//! caller's id against the owner recorded on an already-loaded resource.

use anyhow::anyhow;
use sunyi_core::{AppError, UserId};
use thiserror::Error;

use crate::claims::Identity;
use crate::roles::Role;

/// Body of every 401 produced for a missing, malformed, forged or expired
/// credential.
pub const UNAUTHENTICATED_MESSAGE: &str = "Invalid or missing credentials";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("role `{actual}` cannot act where `{required}` is required")]
    RoleMismatch { required: Role, actual: Role },

    #[error("caller does not own the resource")]
    NotOwner,

    #[error("resource not found")]
    NotFound,
}

impl AuthzError {
    /// Short label used for logs and metrics.
    pub fn reason_code(&self) -> &'static str {
        match self {
            AuthzError::Unauthenticated => "unauthenticated",
            AuthzError::RoleMismatch { .. } => "role_mismatch",
            AuthzError::NotOwner => "not_owner",
            AuthzError::NotFound => "not_found",
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            AuthzError::Unauthenticated => {
                AppError::unauthorized(UNAUTHENTICATED_MESSAGE.to_string())
            }
            AuthzError::RoleMismatch { required, .. } => {
                AppError::forbidden(format!("Only {}s can perform this action", required))
            }
            AuthzError::NotOwner => {
                AppError::forbidden("You can only modify your own resources".to_string())
            }
            AuthzError::NotFound => AppError::not_found(anyhow!("Resource not found")),
        }
    }
}

/// A resource with a single owning account.
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

/// Passes only when an identity is present and carries `expected`.
///
/// A missing identity means the identity layer did not run in front of the
/// gate; it is reported as [`AuthzError::Unauthenticated`].
pub fn require_role(identity: Option<&Identity>, expected: Role) -> Result<&Identity, AuthzError> {
    let identity = identity.ok_or(AuthzError::Unauthenticated)?;
    if !identity.has_role(expected) {
        return Err(AuthzError::RoleMismatch {
            required: expected,
            actual: identity.role,
        });
    }
    Ok(identity)
}

/// Exact creator match. Nothing else grants write access.
pub fn authorize_mutation(subject: UserId, owner: UserId) -> Result<(), AuthzError> {
    if subject == owner {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}

/// Ownership check on the result of a lookup.
///
/// An absent resource is [`AuthzError::NotFound`] no matter who asks, so
/// the ownership of ids that do not exist is never revealed.
pub fn authorize_loaded<R: Owned>(subject: UserId, resource: Option<R>) -> Result<R, AuthzError> {
    let resource = resource.ok_or(AuthzError::NotFound)?;
    authorize_mutation(subject, resource.owner_id())?;
    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Listing {
        owner: UserId,
        title: &'static str,
    }

    impl Owned for Listing {
        fn owner_id(&self) -> UserId {
            self.owner
        }
    }

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: UserId::new(),
            role,
        }
    }

    #[test]
    fn test_require_role_passes_matching_role() {
        let organizer = identity(Role::Organizer);
        let passed = require_role(Some(&organizer), Role::Organizer).unwrap();
        assert_eq!(passed, &organizer);
    }

    #[test]
    fn test_require_role_forbids_other_role() {
        let consumer = identity(Role::Consumer);
        let err = require_role(Some(&consumer), Role::Organizer).unwrap_err();
        assert_eq!(
            err,
            AuthzError::RoleMismatch {
                required: Role::Organizer,
                actual: Role::Consumer
            }
        );
        assert_eq!(err.reason_code(), "role_mismatch");
        assert_eq!(err.into_app_error().status.as_u16(), 403);
    }

    #[test]
    fn test_require_role_is_generic_over_role() {
        let consumer = identity(Role::Consumer);
        assert!(require_role(Some(&consumer), Role::Consumer).is_ok());
        let organizer = identity(Role::Organizer);
        assert!(require_role(Some(&organizer), Role::Consumer).is_err());
    }

    #[test]
    fn test_require_role_without_identity_is_unauthenticated() {
        let err = require_role(None, Role::Organizer).unwrap_err();
        assert_eq!(err, AuthzError::Unauthenticated);
        assert_eq!(err.into_app_error().status.as_u16(), 401);
    }

    #[test]
    fn test_authorize_mutation() {
        let a = UserId::new();
        let b = UserId::new();
        assert!(authorize_mutation(a, a).is_ok());
        assert_eq!(authorize_mutation(a, b), Err(AuthzError::NotOwner));
        assert_eq!(authorize_mutation(b, a), Err(AuthzError::NotOwner));
    }

    #[test]
    fn test_denial_is_identical_whatever_else_differs() {
        let me = UserId::new();
        let first = Listing {
            owner: UserId::new(),
            title: "Jazz night",
        };
        let second = Listing {
            owner: UserId::new(),
            title: "Techno",
        };
        assert_eq!(
            authorize_loaded(me, Some(first)).unwrap_err(),
            authorize_loaded(me, Some(second)).unwrap_err()
        );
    }

    #[test]
    fn test_not_found_takes_precedence() {
        let err = authorize_loaded::<Listing>(UserId::new(), None).unwrap_err();
        assert_eq!(err, AuthzError::NotFound);
        assert_eq!(err.into_app_error().status.as_u16(), 404);
    }

    #[test]
    fn test_owner_gets_resource_back() {
        let me = UserId::new();
        let listing = Listing {
            owner: me,
            title: "Open mic",
        };
        let returned = authorize_loaded(me, Some(listing)).unwrap();
        assert_eq!(returned.title, "Open mic");
    }
}
