//! Gig listings.
//!
//! A gig's `organizer_id` is set from the caller's identity when the gig is
//! created and never changes afterwards; it is the only input to the
//! ownership check on update and delete.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sunyi_auth::Owned;
use sunyi_core::serde::{deserialize_optional_time_of_day, deserialize_time_of_day};
use sunyi_core::{GigId, UserId};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::OrganizerSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Gig {
    pub id: GigId,
    pub title: String,
    pub description: String,
    pub venue_name: String,
    pub venue_address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(value_type = String, format = Date, example = "2026-11-20")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "20:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = Option<String>, example = "23:30:00")]
    pub end_time: Option<NaiveTime>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub organizer_id: UserId,
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<OrganizerSummary>,
}

impl Owned for Gig {
    fn owner_id(&self) -> UserId {
        self.organizer_id
    }
}

/// Body of both create and update; an update replaces every editable field.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GigInput {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    #[schema(example = "Late night jazz")]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, max = 200, message = "Venue name is required"))]
    pub venue_name: String,
    #[validate(length(min = 1, message = "Venue address is required"))]
    pub venue_address: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
    #[schema(value_type = String, format = Date, example = "2026-11-20")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time_of_day")]
    #[schema(value_type = String, example = "20:00")]
    pub start_time: NaiveTime,
    #[serde(default, deserialize_with = "deserialize_optional_time_of_day")]
    #[schema(value_type = Option<String>, example = "23:30")]
    pub end_time: Option<NaiveTime>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}
