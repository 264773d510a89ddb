//! Gig seeding.

use chrono::{Duration, NaiveTime, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Paragraph, Words};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use sunyi_core::{GigId, UserId};

use super::models::GigSeed;

const GENRES: &[&str] = &[
    "jazz",
    "rock",
    "techno",
    "house",
    "folk",
    "hip-hop",
    "classical",
    "afrobeat",
    "indie",
    "soul",
];

fn generate_gig(organizer_id: UserId) -> GigSeed {
    let words: Vec<String> = Words(2..4).fake();
    let title = words.join(" ");

    let days_ahead: i64 = (1..180).fake();
    let date = (Utc::now() + Duration::days(days_ahead)).date_naive();

    let start_hour: u32 = (17..22).fake();
    let start_time = NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let end_time = NaiveTime::from_hms_opt(start_hour + 2, 30, 0);

    let free = (0..4).fake::<u8>() == 0;
    let price = if free {
        None
    } else {
        Some((500..4500).fake::<u32>() as f64 / 100.0)
    };

    let genre_count: usize = (1..3).fake();
    let genres = (0..genre_count)
        .map(|_| GENRES[(0..GENRES.len()).fake::<usize>()].to_string())
        .collect();

    GigSeed {
        title,
        description: Paragraph(1..3).fake(),
        venue_name: CompanyName().fake(),
        venue_address: format!(
            "{} {}, {}",
            (1..300).fake::<u32>(),
            StreetName().fake::<String>(),
            CityName().fake::<String>()
        ),
        latitude: (-60.0..70.0).fake(),
        longitude: (-170.0..170.0).fake(),
        date,
        start_time,
        end_time,
        price,
        organizer_id,
        genres,
    }
}

/// Builds `per_organizer` gigs for each organizer.
pub fn generate_gigs(organizer_ids: &[UserId], per_organizer: usize) -> Vec<GigSeed> {
    organizer_ids
        .par_iter()
        .flat_map(|&organizer_id| {
            (0..per_organizer)
                .map(|_| generate_gig(organizer_id))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_gigs(
    db: &PgPool,
    organizer_ids: &[UserId],
    per_organizer: usize,
) -> Result<Vec<GigId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🎸 Seeding {} gigs ({} per organizer)...",
        organizer_ids.len() * per_organizer,
        per_organizer
    );

    let gigs = generate_gigs(organizer_ids, per_organizer);

    let mut tx = db.begin().await?;

    // 12 params per gig
    const BATCH_SIZE: usize = 1000;

    let mut ids = Vec::with_capacity(gigs.len());
    for chunk in gigs.chunks(BATCH_SIZE) {
        ids.extend(insert_gigs_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} gigs in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

async fn insert_gigs_chunk(
    tx: &mut Transaction<'_, Postgres>,
    gigs: &[GigSeed],
) -> Result<Vec<GigId>, Box<dyn std::error::Error>> {
    if gigs.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO gigs (title, description, venue_name, venue_address, latitude, longitude, \
         date, start_time, end_time, price, organizer_id, genres) VALUES ",
    );

    for (i, _) in gigs.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let params: Vec<String> = (1..=12).map(|n| format!("${}", i * 12 + n)).collect();
        query.push('(');
        query.push_str(&params.join(", "));
        query.push(')');
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar::<_, GigId>(&query);
    for gig in gigs {
        q = q
            .bind(&gig.title)
            .bind(&gig.description)
            .bind(&gig.venue_name)
            .bind(&gig.venue_address)
            .bind(gig.latitude)
            .bind(gig.longitude)
            .bind(gig.date)
            .bind(gig.start_time)
            .bind(gig.end_time)
            .bind(gig.price)
            .bind(gig.organizer_id)
            .bind(&gig.genres);
    }

    let ids: Vec<GigId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}
