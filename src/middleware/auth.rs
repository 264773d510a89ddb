use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sunyi_auth::{AuthzError, Identity};
use sunyi_core::AppError;
use sunyi_observability::track_token_rejection;

use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Pulls the token out of `Authorization: Bearer <token>`.
///
/// The header must split on spaces into exactly the scheme keyword and one
/// non-empty token; anything else counts as no credential at all.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Identity middleware.
///
/// Verifies the bearer token and stores the caller's [`Identity`] in the
/// request extensions. Missing, malformed, forged and expired credentials
/// all end the request with the same 401; only the rejection counter tells
/// them apart.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        track_token_rejection("missing");
        tracing::debug!("Rejected request without a bearer credential");
        return AuthzError::Unauthenticated.into_app_error().into_response();
    };

    let claims = match state.tokens.parse(token) {
        Ok(claims) => claims,
        Err(e) => {
            track_token_rejection(e.reason());
            tracing::debug!(reason = e.reason(), "Rejected bearer credential");
            return e.into_app_error().into_response();
        }
    };

    req.extensions_mut().insert(claims.identity());
    next.run(req).await
}

/// Extractor for the identity placed by [`authenticate`].
///
/// Only usable on routes behind the identity middleware; elsewhere it
/// rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| AuthzError::Unauthenticated.into_app_error())
    }
}
