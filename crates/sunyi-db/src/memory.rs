//! In-memory stores.
//!
//! Both stores share one [`MemoryStore`], so gigs can see their organizers.
//! Every write takes the single lock, which makes the uniqueness check and
//! the insert one atomic step.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sunyi_core::{GigId, UserId};
use sunyi_models::{Credentials, Gig, GigInput, NewUser, OrganizerSummary, User};

use crate::error::{StoreError, UniqueField};
use crate::store::{CredentialStore, GigStore};

#[derive(Default)]
struct Tables {
    users: Vec<Credentials>,
    gigs: Vec<Gig>,
}

impl Tables {
    fn organizer(&self, id: UserId) -> Option<OrganizerSummary> {
        self.users
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| OrganizerSummary::from(&c.user))
    }

    fn with_organizer(&self, mut gig: Gig) -> Gig {
        gig.organizer = self.organizer(gig.organizer_id);
        gig
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> MemoryCredentialStore {
        MemoryCredentialStore(self.clone())
    }

    pub fn gigs(&self) -> MemoryGigStore {
        MemoryGigStore(self.clone())
    }

    pub fn user_count(&self) -> usize {
        self.tables.read().users.len()
    }
}

#[derive(Clone)]
pub struct MemoryCredentialStore(MemoryStore);

#[derive(Clone)]
pub struct MemoryGigStore(MemoryStore);

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_handle_or_email(
        &self,
        value: &str,
    ) -> Result<Option<Credentials>, StoreError> {
        let tables = self.0.tables.read();
        let by_email = tables.users.iter().find(|c| c.user.email == value);
        let found = by_email.or_else(|| tables.users.iter().find(|c| c.user.username == value));
        Ok(found.cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let tables = self.0.tables.read();
        Ok(tables
            .users
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone()))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.0.tables.write();

        if tables.users.iter().any(|c| c.user.email == new_user.email) {
            return Err(StoreError::Conflict(UniqueField::Email));
        }
        if tables
            .users
            .iter()
            .any(|c| c.user.username == new_user.username)
        {
            return Err(StoreError::Conflict(UniqueField::Username));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: new_user.username,
            email: new_user.email,
            role: new_user.role,
            bio: None,
            profile_image: None,
            created_at: now,
            updated_at: now,
        };

        tables.users.push(Credentials {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });

        Ok(user)
    }
}

fn sort_latest_first(gigs: &mut [Gig]) {
    gigs.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.start_time.cmp(&a.start_time))
    });
}

#[async_trait]
impl GigStore for MemoryGigStore {
    async fn list(&self) -> Result<Vec<Gig>, StoreError> {
        let tables = self.0.tables.read();
        let mut gigs: Vec<Gig> = tables
            .gigs
            .iter()
            .cloned()
            .map(|g| tables.with_organizer(g))
            .collect();
        sort_latest_first(&mut gigs);
        Ok(gigs)
    }

    async fn list_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Gig>, StoreError> {
        let tables = self.0.tables.read();
        let mut gigs: Vec<Gig> = tables
            .gigs
            .iter()
            .filter(|g| g.organizer_id == organizer_id)
            .cloned()
            .map(|g| tables.with_organizer(g))
            .collect();
        sort_latest_first(&mut gigs);
        Ok(gigs)
    }

    async fn find_by_id(&self, id: GigId) -> Result<Option<Gig>, StoreError> {
        let tables = self.0.tables.read();
        Ok(tables
            .gigs
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .map(|g| tables.with_organizer(g)))
    }

    async fn create(&self, organizer_id: UserId, input: GigInput) -> Result<Gig, StoreError> {
        let mut tables = self.0.tables.write();

        if !tables.users.iter().any(|c| c.user.id == organizer_id) {
            return Err(StoreError::Other(anyhow::anyhow!(
                "organizer {} does not exist",
                organizer_id
            )));
        }

        let now = Utc::now();
        let gig = Gig {
            id: GigId::new(),
            title: input.title,
            description: input.description,
            venue_name: input.venue_name,
            venue_address: input.venue_address,
            latitude: input.latitude,
            longitude: input.longitude,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            price: input.price,
            image_url: input.image_url,
            organizer_id,
            genres: input.genres,
            created_at: now,
            updated_at: now,
            organizer: None,
        };

        tables.gigs.push(gig.clone());
        Ok(tables.with_organizer(gig))
    }

    async fn update(&self, id: GigId, input: GigInput) -> Result<Option<Gig>, StoreError> {
        let mut tables = self.0.tables.write();

        let Some(gig) = tables.gigs.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };

        gig.title = input.title;
        gig.description = input.description;
        gig.venue_name = input.venue_name;
        gig.venue_address = input.venue_address;
        gig.latitude = input.latitude;
        gig.longitude = input.longitude;
        gig.date = input.date;
        gig.start_time = input.start_time;
        gig.end_time = input.end_time;
        gig.price = input.price;
        gig.image_url = input.image_url;
        gig.genres = input.genres;
        gig.updated_at = Utc::now();

        let updated = gig.clone();
        Ok(Some(tables.with_organizer(updated)))
    }

    async fn delete(&self, id: GigId) -> Result<bool, StoreError> {
        let mut tables = self.0.tables.write();
        let before = tables.gigs.len();
        tables.gigs.retain(|g| g.id != id);
        Ok(tables.gigs.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use sunyi_auth::Role;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "digest".to_string(),
            role: Role::Organizer,
        }
    }

    fn input(title: &str, day: u32, hour: u32) -> GigInput {
        GigInput {
            title: title.to_string(),
            description: "desc".to_string(),
            venue_name: "venue".to_string(),
            venue_address: "addr".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            date: NaiveDate::from_ymd_opt(2026, 11, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: None,
            price: None,
            image_url: None,
            genres: vec![],
        }
    }

    #[tokio::test]
    async fn test_uniqueness_conflicts_name_the_field() {
        let users = MemoryStore::new().credentials();
        users.create(new_user("alice", "a@x.com")).await.unwrap();

        let err = users.create(new_user("alice", "b@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::Username)));

        let err = users.create(new_user("bob", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::Email)));
    }

    #[tokio::test]
    async fn test_concurrent_registrations_yield_one_success() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let users = store.credentials();
            handles.push(tokio::spawn(async move {
                users
                    .create(new_user("alice", &format!("a{}@x.com", i)))
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_handle_or_email() {
        let users = MemoryStore::new().credentials();
        let alice = users.create(new_user("alice", "a@x.com")).await.unwrap();

        let by_name = users.find_by_handle_or_email("alice").await.unwrap().unwrap();
        let by_email = users.find_by_handle_or_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_name.user.id, alice.id);
        assert_eq!(by_email.user.id, alice.id);
        assert!(users.find_by_handle_or_email("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_gig_lifecycle_and_ordering() {
        let store = MemoryStore::new();
        let alice = store
            .credentials()
            .create(new_user("alice", "a@x.com"))
            .await
            .unwrap();
        let gigs = store.gigs();

        let early = gigs.create(alice.id, input("early", 1, 20)).await.unwrap();
        let late = gigs.create(alice.id, input("late", 2, 18)).await.unwrap();
        assert_eq!(early.organizer.as_ref().unwrap().username, "alice");

        let listed = gigs.list().await.unwrap();
        assert_eq!(listed[0].id, late.id);
        assert_eq!(listed[1].id, early.id);

        let updated = gigs
            .update(early.id, input("renamed", 1, 21))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.organizer_id, alice.id);
        assert!(updated.updated_at >= early.updated_at);

        assert!(gigs.delete(early.id).await.unwrap());
        assert!(!gigs.delete(early.id).await.unwrap());
        assert!(gigs.find_by_id(early.id).await.unwrap().is_none());
        assert!(gigs.update(early.id, input("x", 1, 1)).await.unwrap().is_none());
    }
}
