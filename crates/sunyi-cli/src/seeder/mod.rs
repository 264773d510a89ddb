//! Database seeding for development.
//!
//! - [`users`] - Organizer and consumer accounts
//! - [`gigs`] - Gigs for the seeded organizers
//! - [`models`] - Seed rows and [`SeedConfig`]
//!
//! Seeded accounts use the [`SEED_EMAIL_DOMAIN`] email domain, which is how
//! [`clear_all`] finds them again. All of them share [`SEED_PASSWORD`].

pub mod gigs;
pub mod models;
pub mod users;

pub use models::SeedConfig;

use sqlx::PgPool;
use std::time::Instant;
use sunyi_auth::Role;

pub const SEED_EMAIL_DOMAIN: &str = "seed.sunyi.local";
pub const SEED_PASSWORD: &str = "password123";

/// Seeds organizers, consumers, and gigs for every organizer.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Organizers: {}", config.organizers);
    println!("   - Consumers: {}", config.consumers);
    println!("   - Gigs per organizer: {}", config.gigs_per_organizer);

    let organizer_ids = users::seed_users(db, config.organizers, Role::Organizer).await?;
    let consumer_ids = users::seed_users(db, config.consumers, Role::Consumer).await?;
    let gig_ids = gigs::seed_gigs(db, &organizer_ids, config.gigs_per_organizer).await?;

    println!(
        "\n✅ Seeding complete! Created {} accounts and {} gigs in {:?}",
        organizer_ids.len() + consumer_ids.len(),
        gig_ids.len(),
        start_time.elapsed()
    );
    println!("\n📝 Password for all seeded accounts: {}", SEED_PASSWORD);

    Ok(())
}

/// Removes every seeded account and, through the foreign key, their gigs.
pub async fn clear_all(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let deleted = users::clear_users(db).await?;
    println!("\n✅ Cleared seeded data");
    Ok(deleted)
}
