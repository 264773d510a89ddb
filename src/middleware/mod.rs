//! Middleware modules for request processing.
//!
//! - [`auth`]: Identity middleware and the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: Role gate middleware
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`authenticate`](auth::authenticate) verifies the token and stores the
//!    caller's identity in the request extensions
//! 3. [`require_organizer`](role::require_organizer) checks the role on
//!    organizer-only routes
//! 4. Handlers read the identity through `AuthUser` and run ownership checks

pub mod auth;
pub mod role;
