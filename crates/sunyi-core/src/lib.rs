//! # Sunyi Core
//!
//! Core types, errors, and utilities for the Sunyi API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`ids`]: Strongly-typed UUID newtypes for accounts and gigs
//! - [`password`]: Salted, adaptive password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use sunyi_core::{AppError, PasswordHasher};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Gig not found"));
//!
//! let hasher = PasswordHasher::new(12);
//! let digest = hasher.hash("longenoughpw")?;
//! assert!(hasher.verify("longenoughpw", &digest));
//! ```

pub mod errors;
pub mod ids;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use ids::{GigId, UserId};
pub use password::{HashingError, PasswordHasher};
