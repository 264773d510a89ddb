//! # Sunyi DB
//!
//! Database pool, migrations, and the account and gig stores.
//!
//! - [`store`]: The [`CredentialStore`] and [`GigStore`] contracts
//! - [`postgres`]: sqlx-backed implementations
//! - `memory`: In-memory implementations (feature `memory`)
//!
//! # Example
//!
//! ```ignore
//! use sunyi_db::{PgCredentialStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database.url, config.database.max_connections).await?;
//! run_migrations(&pool).await?;
//! let users = PgCredentialStore::new(pool.clone());
//! ```

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod postgres;
pub mod store;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use error::{StoreError, UniqueField};
#[cfg(feature = "memory")]
pub use memory::{MemoryCredentialStore, MemoryGigStore, MemoryStore};
pub use postgres::{PgCredentialStore, PgGigStore};
pub use store::{CredentialStore, GigStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool.
pub async fn init_db_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!(max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the SQL migrations in `migrations/` at the workspace root.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
