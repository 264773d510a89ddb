//! Role gate middleware.
//!
//! Runs after [`authenticate`](crate::middleware::auth::authenticate) and
//! lets the request through only when the caller holds the required role.
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::{auth::authenticate, role::require_organizer};
//!
//! let protected = Router::new()
//!     .route("/", post(create_gig))
//!     .route_layer(middleware::from_fn(require_organizer))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
//! ```

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sunyi_auth::{Identity, Role};
use sunyi_observability::track_authorization_denial;

/// Checks the identity in the request extensions against `expected`.
pub async fn require_role(expected: Role, req: Request, next: Next) -> Response {
    let identity = req.extensions().get::<Identity>();

    if let Err(denial) = sunyi_auth::require_role(identity, expected) {
        track_authorization_denial(denial.reason_code());
        tracing::warn!(
            user_id = ?identity.map(|i| i.user_id),
            required = %expected,
            reason = denial.reason_code(),
            "Role gate denied request"
        );
        return denial.into_app_error().into_response();
    }

    next.run(req).await
}

pub async fn require_organizer(req: Request, next: Next) -> Response {
    require_role(Role::Organizer, req, next).await
}
