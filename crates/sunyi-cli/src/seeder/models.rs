//! Seed rows and seeding configuration.

use chrono::{NaiveDate, NaiveTime};
use sunyi_auth::Role;
use sunyi_core::UserId;

/// Seed data for creating an account.
pub struct UserSeed {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Seed data for creating a gig.
pub struct GigSeed {
    pub title: String,
    pub description: String,
    pub venue_name: String,
    pub venue_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub price: Option<f64>,
    pub organizer_id: UserId,
    pub genres: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub organizers: usize,
    pub consumers: usize,
    pub gigs_per_organizer: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            organizers: 5,
            consumers: 10,
            gigs_per_organizer: 4,
        }
    }
}

impl SeedConfig {
    pub fn new(organizers: usize) -> Self {
        Self {
            organizers,
            ..Default::default()
        }
    }

    pub fn with_consumers(mut self, consumers: usize) -> Self {
        self.consumers = consumers;
        self
    }

    pub fn with_gigs_per_organizer(mut self, gigs: usize) -> Self {
        self.gigs_per_organizer = gigs;
        self
    }

    pub fn total_gigs(&self) -> usize {
        self.organizers * self.gigs_per_organizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_totals() {
        let config = SeedConfig::new(3)
            .with_consumers(0)
            .with_gigs_per_organizer(7);
        assert_eq!(config.organizers, 3);
        assert_eq!(config.consumers, 0);
        assert_eq!(config.total_gigs(), 21);
    }
}
