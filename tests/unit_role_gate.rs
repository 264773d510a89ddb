use sunyi_auth::{AuthzError, Identity, Owned, Role, authorize_loaded, require_role};
use sunyi_core::UserId;

#[derive(Debug)]
struct Listing {
    owner: UserId,
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
fn test_gate_status_codes() {
    let organizer = identity(Role::Organizer);
    let consumer = identity(Role::Consumer);

    assert!(require_role(Some(&organizer), Role::Organizer).is_ok());

    let denied = require_role(Some(&consumer), Role::Organizer).unwrap_err();
    assert_eq!(denied.into_app_error().status.as_u16(), 403);

    let missing = require_role(None, Role::Organizer).unwrap_err();
    assert_eq!(missing.into_app_error().status.as_u16(), 401);
}

#[test]
fn test_organizer_role_does_not_grant_other_owners_resources() {
    let alice = identity(Role::Organizer);
    let bob = identity(Role::Organizer);
    let listing = Listing {
        owner: alice.user_id,
    };

    assert!(require_role(Some(&bob), Role::Organizer).is_ok());
    assert!(matches!(
        authorize_loaded(bob.user_id, Some(listing)),
        Err(AuthzError::NotOwner)
    ));
}

#[test]
fn test_absent_resource_wins_over_ownership() {
    let anyone = identity(Role::Organizer);
    let err = authorize_loaded::<Listing>(anyone.user_id, None).unwrap_err();
    assert_eq!(err, AuthzError::NotFound);
    assert_eq!(err.into_app_error().status.as_u16(), 404);
}
