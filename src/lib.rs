//! # Sunyi API
//!
//! Backend of a gig-listing service built with Axum and PostgreSQL.
//! Organizers publish gigs, consumers browse them, and an organizer can
//! change or remove only the gigs they created.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Identity middleware, role gate
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Registration, login, current account
//! │   └── gigs/        # Gig listings
//! ├── docs.rs          # OpenAPI document
//! ├── router.rs        # Route tree and global layers
//! ├── state.rs         # Shared stores, token codec, hasher
//! └── validator.rs     # Validated JSON extractor
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers), a
//! `service.rs` (business logic) and a `router.rs`. Domain types live in
//! `sunyi-models`, stores in `sunyi-db`, and the token codec plus the role
//! and ownership checks in `sunyi-auth`.
//!
//! ## Request pipeline for writes
//!
//! ```text
//! authenticate ─▶ require_organizer ─▶ handler ─▶ load ─▶ ownership ─▶ write
//!     401               403                        404        403
//! ```
//!
//! ## Tokens
//!
//! HS256 JWTs carrying the account id (`sub`), its role, `iat` and `exp`.
//! The lifetime comes from `JWT_EXPIRATION` (default `24h`). There is no
//! refresh or revocation: a token is good until it expires.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:8080/swagger-ui`
//! - Scalar: `http://localhost:8080/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use sunyi_auth;
pub use sunyi_config;
pub use sunyi_core;
pub use sunyi_db;
pub use sunyi_models;
