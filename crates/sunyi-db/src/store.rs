//! Storage contracts consumed by the request handlers.
//!
//! Handlers only see `Arc<dyn CredentialStore>` and `Arc<dyn GigStore>`;
//! Postgres backs them in production and the in-memory stores (feature
//! `memory`) back them in tests.

use async_trait::async_trait;
use sunyi_core::{GigId, UserId};
use sunyi_models::{Credentials, Gig, GigInput, NewUser, User};

use crate::error::StoreError;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Looks an account up by email or by username. An email match wins
    /// when the value matches one account's email and another's username.
    async fn find_by_handle_or_email(&self, value: &str)
    -> Result<Option<Credentials>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Inserts an account. Username and email uniqueness is enforced here,
    /// atomically: of two racing inserts with the same username exactly one
    /// succeeds and the other gets [`StoreError::Conflict`].
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait GigStore: Send + Sync {
    /// Every gig, latest date first, with its organizer attached.
    async fn list(&self) -> Result<Vec<Gig>, StoreError>;

    async fn list_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Gig>, StoreError>;

    async fn find_by_id(&self, id: GigId) -> Result<Option<Gig>, StoreError>;

    async fn create(&self, organizer_id: UserId, input: GigInput) -> Result<Gig, StoreError>;

    /// Replaces the editable fields. `None` when the gig does not exist.
    async fn update(&self, id: GigId, input: GigInput) -> Result<Option<Gig>, StoreError>;

    /// `false` when the gig does not exist.
    async fn delete(&self, id: GigId) -> Result<bool, StoreError>;
}
