use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sunyi_core::{AppError, GigId, UserId};
use sunyi_models::{Gig, GigInput, MessageResponse};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::GigService;

/// An id that is not a UUID cannot name an existing gig.
fn parse_gig_id(raw: &str) -> Result<GigId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(anyhow!("Gig not found")))
}

fn parse_organizer_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(anyhow!("Invalid organizer ID")))
}

/// List all gigs, latest first
#[utoipa::path(
    get,
    path = "/api/gigs",
    responses(
        (status = 200, description = "All gigs", body = Vec<Gig>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Gigs"
)]
#[instrument(skip(state))]
pub async fn list_gigs(State(state): State<AppState>) -> Result<Json<Vec<Gig>>, AppError> {
    let gigs = GigService::list_gigs(&state).await?;
    Ok(Json(gigs))
}

#[utoipa::path(
    get,
    path = "/api/gigs/{id}",
    params(("id" = String, Path, description = "Gig ID")),
    responses(
        (status = 200, description = "Gig found", body = Gig),
        (status = 404, description = "Gig not found", body = ErrorResponse)
    ),
    tag = "Gigs"
)]
#[instrument(skip(state))]
pub async fn get_gig(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Gig>, AppError> {
    let id = parse_gig_id(&id)?;
    let gig = GigService::get_gig(&state, id).await?;
    Ok(Json(gig))
}

#[utoipa::path(
    get,
    path = "/api/gigs/organizer/{organizer_id}",
    params(("organizer_id" = String, Path, description = "Organizer account ID")),
    responses(
        (status = 200, description = "Gigs of the organizer", body = Vec<Gig>),
        (status = 400, description = "Invalid organizer ID", body = ErrorResponse)
    ),
    tag = "Gigs"
)]
#[instrument(skip(state))]
pub async fn get_gigs_by_organizer(
    State(state): State<AppState>,
    Path(organizer_id): Path<String>,
) -> Result<Json<Vec<Gig>>, AppError> {
    let organizer_id = parse_organizer_id(&organizer_id)?;
    let gigs = GigService::list_by_organizer(&state, organizer_id).await?;
    Ok(Json(gigs))
}

#[utoipa::path(
    post,
    path = "/api/gigs",
    request_body = GigInput,
    responses(
        (status = 201, description = "Gig created", body = Gig),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid or missing credentials", body = ErrorResponse),
        (status = 403, description = "Only organizers can create gigs", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Gigs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, input))]
pub async fn create_gig(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(input): ValidatedJson<GigInput>,
) -> Result<(StatusCode, Json<Gig>), AppError> {
    let gig = GigService::create_gig(&state, identity, input).await?;
    Ok((StatusCode::CREATED, Json(gig)))
}

#[utoipa::path(
    put,
    path = "/api/gigs/{id}",
    params(("id" = String, Path, description = "Gig ID")),
    request_body = GigInput,
    responses(
        (status = 200, description = "Gig updated", body = Gig),
        (status = 401, description = "Invalid or missing credentials", body = ErrorResponse),
        (status = 403, description = "Not an organizer, or not the gig's organizer", body = ErrorResponse),
        (status = 404, description = "Gig not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Gigs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, input))]
pub async fn update_gig(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<GigInput>,
) -> Result<Json<Gig>, AppError> {
    let id = parse_gig_id(&id)?;
    let gig = GigService::update_gig(&state, identity, id, input).await?;
    Ok(Json(gig))
}

#[utoipa::path(
    delete,
    path = "/api/gigs/{id}",
    params(("id" = String, Path, description = "Gig ID")),
    responses(
        (status = 200, description = "Gig deleted", body = MessageResponse),
        (status = 401, description = "Invalid or missing credentials", body = ErrorResponse),
        (status = 403, description = "Not an organizer, or not the gig's organizer", body = ErrorResponse),
        (status = 404, description = "Gig not found", body = ErrorResponse)
    ),
    tag = "Gigs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_gig(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_gig_id(&id)?;
    let response = GigService::delete_gig(&state, identity, id).await?;
    Ok(Json(response))
}
