//! Account seeding.
//!
//! Every seeded account gets its own bcrypt digest of the shared seed
//! password; hashing runs across rayon's pool.

use fake::Fake;
use fake::faker::internet::en::Username;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use sunyi_auth::Role;
use sunyi_core::{HashingError, PasswordHasher, UserId};

use super::models::UserSeed;
use super::{SEED_EMAIL_DOMAIN, SEED_PASSWORD};

/// Lowest cost bcrypt accepts; seeded accounts are for development only.
const SEED_BCRYPT_COST: u32 = 4;

fn seed_username(index: usize, role: Role) -> String {
    let base: String = Username().fake();
    let base: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(30)
        .collect();
    format!("{}_{}{}", base, role.as_str(), index)
}

/// Builds `count` accounts of `role`, hashing in parallel.
pub fn generate_users(count: usize, role: Role) -> Result<Vec<UserSeed>, HashingError> {
    let hasher = PasswordHasher::new(SEED_BCRYPT_COST);

    (0..count)
        .into_par_iter()
        .map(|index| -> Result<UserSeed, HashingError> {
            let username = seed_username(index, role);
            let email = format!("{}@{}", username.to_lowercase(), SEED_EMAIL_DOMAIN);
            Ok(UserSeed {
                username,
                email,
                password_hash: hasher.hash(SEED_PASSWORD)?,
                role,
            })
        })
        .collect()
}

/// Seeds accounts of one role and returns their ids.
pub async fn seed_users(
    db: &PgPool,
    count: usize,
    role: Role,
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} {} accounts...", count, role);

    let users = generate_users(count, role)?;
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} accounts in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 4 params per user
    const BATCH_SIZE: usize = 1000;

    let mut all_ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (username, email, password_hash, role) VALUES ");

    for (i, _) in users.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar::<_, UserId>(&query);
    for user in users {
        q = q
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role);
    }

    let ids: Vec<UserId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes accounts on the seed email domain; their gigs cascade.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded accounts...");

    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(pattern)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} accounts in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_accounts_are_unique_and_verifiable() {
        let users = generate_users(6, Role::Organizer).unwrap();
        assert_eq!(users.len(), 6);

        let names: HashSet<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names.len(), 6);

        let hasher = PasswordHasher::new(SEED_BCRYPT_COST);
        for user in &users {
            assert!(user.username.len() <= 50);
            assert!(user.email.ends_with(SEED_EMAIL_DOMAIN));
            assert_eq!(user.role, Role::Organizer);
            assert!(hasher.verify(SEED_PASSWORD, &user.password_hash));
        }
    }
}
