//! Password hashing and verification.
//!
//! Digests are bcrypt strings (`$2b$<cost>$<salt><hash>`): the salt and the
//! cost factor travel inside the digest, so nothing else needs storing.
//! bcrypt compares in constant time.
//!
//! Hashing is deliberately slow. Request handlers use the `*_blocking`
//! variants, which move the work onto tokio's blocking pool.

use thiserror::Error;

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum HashingError {
    #[error("failed to hash password: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost, clamped to the range
    /// bcrypt supports.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produces a salted digest of `password`.
    ///
    /// Only fails when bcrypt itself cannot run (e.g. no randomness for the
    /// salt); the content of the password never causes an error.
    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Checks `password` against a stored digest.
    ///
    /// A malformed digest is reported as a mismatch, never as an error.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match bcrypt::verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password digest could not be parsed");
                false
            }
        }
    }

    pub async fn hash_blocking(&self, password: String) -> Result<String, HashingError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    pub async fn verify_blocking(&self, password: String, digest: String) -> bool {
        let hasher = *self;
        match tokio::task::spawn_blocking(move || hasher.verify(&password, &digest)).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}
