//! # Sunyi Models
//!
//! Domain models and DTOs for the Sunyi API.
//!
//! # Modules
//!
//! - [`auth`]: Registration and login payloads
//! - [`gigs`]: Gig listings and their input payload
//! - [`users`]: Accounts, stored credentials, organizer summaries
//!
//! Password digests only ever live in [`users::Credentials`] and
//! [`users::NewUser`], neither of which implements `Serialize`.

pub mod auth;
pub mod gigs;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
pub use gigs::{Gig, GigInput};
pub use users::{Credentials, NewUser, OrganizerSummary, User};
