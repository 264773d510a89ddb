use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;
use sunyi_auth::{TokenCodec, TokenError};
use sunyi_config::{AppConfig, CorsConfig};
use sunyi_core::{HashingError, PasswordHasher};
use sunyi_db::{CredentialStore, GigStore, PgCredentialStore, PgGigStore};
use tokio::sync::OnceCell;

/// Shared handles passed to every handler.
///
/// Stores sit behind trait objects so the same router serves Postgres in
/// production and the in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn CredentialStore>,
    pub gigs: Arc<dyn GigStore>,
    pub tokens: Arc<TokenCodec>,
    pub passwords: PasswordHasher,
    pub cors_config: CorsConfig,
    dummy_digest: Arc<OnceCell<String>>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        gigs: Arc<dyn GigStore>,
        tokens: TokenCodec,
        passwords: PasswordHasher,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            users,
            gigs,
            tokens: Arc::new(tokens),
            passwords,
            cors_config,
            dummy_digest: Arc::new(OnceCell::new()),
        }
    }

    /// Wires the Postgres stores and the configured codec and hasher.
    pub fn from_pool(pool: PgPool, config: &AppConfig) -> Result<Self, TokenError> {
        Ok(Self::new(
            Arc::new(PgCredentialStore::new(pool.clone())),
            Arc::new(PgGigStore::new(pool)),
            TokenCodec::from_config(&config.jwt)?,
            PasswordHasher::new(config.password.bcrypt_cost),
            config.cors.clone(),
        ))
    }

    /// A digest at the configured cost, verified against when a login names
    /// an account that does not exist.
    pub async fn dummy_digest(&self) -> Result<String, HashingError> {
        let passwords = self.passwords;
        self.dummy_digest
            .get_or_try_init(|| async move {
                passwords
                    .hash_blocking("sunyi-placeholder-password".to_string())
                    .await
            })
            .await
            .cloned()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("passwords", &self.passwords)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
