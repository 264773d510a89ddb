pub mod auth;
pub mod gigs;
