//! Postgres store checks. Run with a database:
//! `DATABASE_URL=postgres://... cargo test --test integration_postgres_store -- --ignored`

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use sunyi_auth::Role;
use sunyi_db::{CredentialStore, GigStore, PgCredentialStore, PgGigStore, StoreError, UniqueField};
use sunyi_models::{GigInput, NewUser};

fn new_user(username: &str, email: &str, role: Role) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholde".to_string(),
        role,
    }
}

fn input(title: &str) -> GigInput {
    GigInput {
        title: title.to_string(),
        description: "desc".to_string(),
        venue_name: "venue".to_string(),
        venue_address: "addr".to_string(),
        latitude: 51.5,
        longitude: -0.12,
        date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
        start_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        end_time: None,
        price: Some(10.0),
        image_url: None,
        genres: vec!["jazz".to_string()],
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_unique_constraints_map_to_conflicts(pool: PgPool) {
    let users = PgCredentialStore::new(pool);
    let alice = users
        .create(new_user("alice", "a@x.com", Role::Organizer))
        .await
        .unwrap();
    assert_eq!(alice.role, Role::Organizer);

    let err = users
        .create(new_user("alice", "other@x.com", Role::Consumer))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(UniqueField::Username)));

    let err = users
        .create(new_user("alice2", "a@x.com", Role::Consumer))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(UniqueField::Email)));

    let found = users.find_by_handle_or_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.user.id, alice.id);
    let found = users.find_by_handle_or_email("alice").await.unwrap().unwrap();
    assert_eq!(found.user.id, alice.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_gig_roundtrip_keeps_owner(pool: PgPool) {
    let users = PgCredentialStore::new(pool.clone());
    let gigs = PgGigStore::new(pool);
    let alice = users
        .create(new_user("alice", "a@x.com", Role::Organizer))
        .await
        .unwrap();

    let gig = gigs.create(alice.id, input("Jazz")).await.unwrap();
    assert_eq!(gig.organizer_id, alice.id);
    assert_eq!(gig.organizer.as_ref().unwrap().username, "alice");

    let updated = gigs.update(gig.id, input("Jazz II")).await.unwrap().unwrap();
    assert_eq!(updated.title, "Jazz II");
    assert_eq!(updated.organizer_id, alice.id);

    assert_eq!(gigs.list_by_organizer(alice.id).await.unwrap().len(), 1);
    assert!(gigs.delete(gig.id).await.unwrap());
    assert!(gigs.find_by_id(gig.id).await.unwrap().is_none());
}
