mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{gig_body, test_app};
use sunyi_auth::Role;
use sunyi_core::{GigId, UserId};

fn user_id(user: &serde_json::Value) -> UserId {
    user["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_owner_lifecycle_and_cross_account_denials() {
    let app = test_app();
    let (t1, alice) = app.register("alice", "a@x.com", "organizer").await;
    let (bob_token, _) = app.register("bob", "b@x.com", "organizer").await;

    let gig = app.create_gig(&t1, "Late night jazz").await;
    assert_eq!(gig["organizer_id"], alice["id"]);
    assert_eq!(gig["organizer"]["username"], "alice");
    let uri = format!("/api/gigs/{}", gig["id"].as_str().unwrap());

    // another organizer
    let (status, body) = app
        .request("PUT", &uri, Some(&bob_token), Some(gig_body("Hijacked")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only update your own gigs");

    let (status, body) = app.request("DELETE", &uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only delete your own gigs");

    // alice's token after its expiry
    let expired = app
        .tokens
        .issue_at(user_id(&alice), Role::Organizer, Utc::now() - Duration::hours(2))
        .unwrap();
    let (status, body) = app
        .request("PUT", &uri, Some(&expired), Some(gig_body("Too late")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or missing credentials");

    // nothing above changed the gig
    let (status, body) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Late night jazz");

    let (status, body) = app
        .request("PUT", &uri, Some(&t1), Some(gig_body("Jazz, renamed")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Jazz, renamed");
    assert_eq!(body["organizer_id"], alice["id"]);

    let (status, body) = app.request("DELETE", &uri, Some(&t1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Gig deleted successfully");

    let (status, _) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_gig_is_not_found_for_everyone() {
    let app = test_app();
    let (alice, _) = app.register("alice", "a@x.com", "organizer").await;
    let uri = format!("/api/gigs/{}", GigId::new());

    let (status, body) = app
        .request("PUT", &uri, Some(&alice), Some(gig_body("Ghost")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Gig not found");

    let (status, _) = app.request("DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("GET", "/api/gigs/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_consumer_cannot_write() {
    let app = test_app();
    let (consumer, _) = app.register("carol", "c@x.com", "user").await;

    let (status, body) = app
        .request("POST", "/api/gigs", Some(&consumer), Some(gig_body("Nope")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only organizers can perform this action");

    let (status, _) = app.request("GET", "/api/gigs", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_writes_require_a_credential() {
    let app = test_app();
    let (alice, _) = app.register("alice", "a@x.com", "organizer").await;
    let gig = app.create_gig(&alice, "Open mic").await;
    let uri = format!("/api/gigs/{}", gig["id"].as_str().unwrap());

    let (status, _) = app
        .request("POST", "/api/gigs", None, Some(gig_body("Anon")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request("PUT", &uri, None, Some(gig_body("Anon")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (head, signature) = alice.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let forged = format!("{}.{}{}", head, flipped, &signature[1..]);
    let (status, _) = app.request("DELETE", &uri, Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_owner_cannot_be_chosen_by_the_body() {
    let app = test_app();
    let (alice, alice_user) = app.register("alice", "a@x.com", "organizer").await;
    let (_, bob_user) = app.register("bob", "b@x.com", "organizer").await;

    let mut body = gig_body("Spoofed");
    body["organizer_id"] = bob_user["id"].clone();

    let (status, gig) = app
        .request("POST", "/api/gigs", Some(&alice), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(gig["organizer_id"], alice_user["id"]);
}

#[tokio::test]
async fn test_invalid_gig_body_is_rejected() {
    let app = test_app();
    let (alice, _) = app.register("alice", "a@x.com", "organizer").await;

    let mut body = gig_body("Off the map");
    body["latitude"] = serde_json::json!(95.0);
    let (status, _) = app
        .request("POST", "/api/gigs", Some(&alice), Some(body))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .request("POST", "/api/gigs", Some(&alice), Some(gig_body("")))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app.request("GET", "/api/gigs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_listing_by_organizer() {
    let app = test_app();
    let (alice, alice_user) = app.register("alice", "a@x.com", "organizer").await;
    let (bob, bob_user) = app.register("bob", "b@x.com", "organizer").await;

    app.create_gig(&alice, "A1").await;
    app.create_gig(&alice, "A2").await;
    app.create_gig(&bob, "B1").await;

    let (status, all) = app.request("GET", "/api/gigs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let uri = format!("/api/gigs/organizer/{}", alice_user["id"].as_str().unwrap());
    let (status, mine) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|g| g["organizer_id"] == alice_user["id"]));

    let uri = format!("/api/gigs/organizer/{}", bob_user["id"].as_str().unwrap());
    let (_, theirs) = app.request("GET", &uri, None, None).await;
    assert_eq!(theirs.as_array().unwrap().len(), 1);

    let (status, _) = app
        .request("GET", "/api/gigs/organizer/not-a-uuid", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
