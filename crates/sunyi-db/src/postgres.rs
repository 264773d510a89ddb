//! Postgres-backed stores.
//!
//! Uniqueness of usernames and emails is enforced by the `users_username_key`
//! and `users_email_key` constraints; a violated constraint surfaces as
//! [`StoreError::Conflict`] naming the column.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use sunyi_core::{GigId, UserId};
use sunyi_models::{Credentials, Gig, GigInput, NewUser, OrganizerSummary, User};
use tracing::instrument;

use crate::error::StoreError;
use crate::store::{CredentialStore, GigStore};

const USER_COLUMNS: &str =
    "id, username, email, role, bio, profile_image, created_at, updated_at";

const GIG_COLUMNS: &str = "id, title, description, venue_name, venue_address, \
     latitude, longitude, date, start_time, end_time, price, image_url, \
     organizer_id, genres, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self))]
    async fn find_by_handle_or_email(
        &self,
        value: &str,
    ) -> Result<Option<Credentials>, StoreError> {
        let query = format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users \
             WHERE email = $1 OR username = $1 \
             ORDER BY (email = $1) DESC \
             LIMIT 1"
        );

        let credentials = sqlx::query_as::<_, Credentials>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(credentials)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self, new_user), fields(username = %new_user.username, role = %new_user.role))]
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(new_user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_insert)
    }
}

#[derive(Debug, Clone)]
pub struct PgGigStore {
    pool: PgPool,
}

impl PgGigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the organizers of `gigs` in one query and attaches them.
    async fn attach_organizers(&self, mut gigs: Vec<Gig>) -> Result<Vec<Gig>, StoreError> {
        let ids: Vec<UserId> = gigs
            .iter()
            .map(|gig| gig.organizer_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if ids.is_empty() {
            return Ok(gigs);
        }

        let organizers = sqlx::query_as::<_, OrganizerSummary>(
            "SELECT id, username, bio, profile_image FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let by_id: HashMap<UserId, OrganizerSummary> =
            organizers.into_iter().map(|o| (o.id, o)).collect();

        for gig in &mut gigs {
            gig.organizer = by_id.get(&gig.organizer_id).cloned();
        }

        Ok(gigs)
    }

    async fn attach_organizer(&self, gig: Gig) -> Result<Gig, StoreError> {
        let mut gigs = self.attach_organizers(vec![gig]).await?;
        gigs.pop()
            .ok_or_else(|| StoreError::Other(anyhow::anyhow!("gig vanished while attaching organizer")))
    }
}

#[async_trait]
impl GigStore for PgGigStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Gig>, StoreError> {
        let query = format!("SELECT {GIG_COLUMNS} FROM gigs ORDER BY date DESC, start_time DESC");

        let gigs = sqlx::query_as::<_, Gig>(&query)
            .fetch_all(&self.pool)
            .await?;

        self.attach_organizers(gigs).await
    }

    #[instrument(skip(self))]
    async fn list_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Gig>, StoreError> {
        let query = format!(
            "SELECT {GIG_COLUMNS} FROM gigs WHERE organizer_id = $1 \
             ORDER BY date DESC, start_time DESC"
        );

        let gigs = sqlx::query_as::<_, Gig>(&query)
            .bind(organizer_id)
            .fetch_all(&self.pool)
            .await?;

        self.attach_organizers(gigs).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: GigId) -> Result<Option<Gig>, StoreError> {
        let query = format!("SELECT {GIG_COLUMNS} FROM gigs WHERE id = $1");

        let gig = sqlx::query_as::<_, Gig>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match gig {
            Some(gig) => Ok(Some(self.attach_organizer(gig).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create(&self, organizer_id: UserId, input: GigInput) -> Result<Gig, StoreError> {
        let query = format!(
            "INSERT INTO gigs (title, description, venue_name, venue_address, \
                 latitude, longitude, date, start_time, end_time, price, image_url, \
                 organizer_id, genres) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {GIG_COLUMNS}"
        );

        let gig = sqlx::query_as::<_, Gig>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.venue_name)
            .bind(&input.venue_address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(organizer_id)
            .bind(&input.genres)
            .fetch_one(&self.pool)
            .await?;

        self.attach_organizer(gig).await
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: GigId, input: GigInput) -> Result<Option<Gig>, StoreError> {
        let query = format!(
            "UPDATE gigs SET \
                 title = $2, description = $3, venue_name = $4, venue_address = $5, \
                 latitude = $6, longitude = $7, date = $8, start_time = $9, \
                 end_time = $10, price = $11, image_url = $12, genres = $13, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {GIG_COLUMNS}"
        );

        let gig = sqlx::query_as::<_, Gig>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.venue_name)
            .bind(&input.venue_address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(&input.genres)
            .fetch_optional(&self.pool)
            .await?;

        match gig {
            Some(gig) => Ok(Some(self.attach_organizer(gig).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: GigId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM gigs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
