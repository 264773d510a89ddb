//! # Sunyi CLI
//!
//! Account administration and database seeding for development.
//!
//! ## Usage
//!
//! ```ignore
//! use sunyi_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(5).with_gigs_per_organizer(8);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
