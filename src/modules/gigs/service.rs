use anyhow::anyhow;
use sunyi_auth::{AuthzError, Identity, authorize_loaded};
use sunyi_core::{AppError, GigId, UserId};
use sunyi_db::StoreError;
use sunyi_models::{Gig, GigInput, MessageResponse};
use sunyi_observability::{track_authorization_denial, track_gig_created};
use tracing::instrument;

use crate::state::AppState;

fn gig_not_found() -> AppError {
    AppError::not_found(anyhow!("Gig not found"))
}

/// Maps an ownership denial on `action` ("update", "delete") to a response.
fn denial(identity: Identity, gig_id: GigId, action: &str, err: AuthzError) -> AppError {
    match err {
        AuthzError::NotFound => gig_not_found(),
        AuthzError::NotOwner => {
            track_authorization_denial(err.reason_code());
            tracing::warn!(
                user_id = %identity.user_id,
                gig_id = %gig_id,
                action,
                "Ownership check denied gig mutation"
            );
            AppError::forbidden(format!("You can only {} your own gigs", action))
        }
        other => other.into_app_error(),
    }
}

pub struct GigService;

impl GigService {
    #[instrument(skip(state))]
    pub async fn list_gigs(state: &AppState) -> Result<Vec<Gig>, AppError> {
        state.gigs.list().await.map_err(StoreError::into_app_error)
    }

    #[instrument(skip(state))]
    pub async fn get_gig(state: &AppState, id: GigId) -> Result<Gig, AppError> {
        state
            .gigs
            .find_by_id(id)
            .await
            .map_err(StoreError::into_app_error)?
            .ok_or_else(gig_not_found)
    }

    #[instrument(skip(state))]
    pub async fn list_by_organizer(
        state: &AppState,
        organizer_id: UserId,
    ) -> Result<Vec<Gig>, AppError> {
        state
            .gigs
            .list_by_organizer(organizer_id)
            .await
            .map_err(StoreError::into_app_error)
    }

    /// The owner is always the caller; the body has no say in it.
    #[instrument(skip(state, input), fields(user_id = %identity.user_id))]
    pub async fn create_gig(
        state: &AppState,
        identity: Identity,
        input: GigInput,
    ) -> Result<Gig, AppError> {
        let gig = state
            .gigs
            .create(identity.user_id, input)
            .await
            .map_err(StoreError::into_app_error)?;

        track_gig_created();
        tracing::info!(gig_id = %gig.id, "Gig created");
        Ok(gig)
    }

    /// Load, then check ownership, then write. A missing gig is 404 for
    /// every caller.
    #[instrument(skip(state, input), fields(user_id = %identity.user_id))]
    pub async fn update_gig(
        state: &AppState,
        identity: Identity,
        id: GigId,
        input: GigInput,
    ) -> Result<Gig, AppError> {
        let existing = state
            .gigs
            .find_by_id(id)
            .await
            .map_err(StoreError::into_app_error)?;

        authorize_loaded(identity.user_id, existing)
            .map_err(|e| denial(identity, id, "update", e))?;

        let gig = state
            .gigs
            .update(id, input)
            .await
            .map_err(StoreError::into_app_error)?
            .ok_or_else(gig_not_found)?;

        tracing::info!(gig_id = %gig.id, "Gig updated");
        Ok(gig)
    }

    #[instrument(skip(state), fields(user_id = %identity.user_id))]
    pub async fn delete_gig(
        state: &AppState,
        identity: Identity,
        id: GigId,
    ) -> Result<MessageResponse, AppError> {
        let existing = state
            .gigs
            .find_by_id(id)
            .await
            .map_err(StoreError::into_app_error)?;

        authorize_loaded(identity.user_id, existing)
            .map_err(|e| denial(identity, id, "delete", e))?;

        let deleted = state
            .gigs
            .delete(id)
            .await
            .map_err(StoreError::into_app_error)?;

        if !deleted {
            return Err(gig_not_found());
        }

        tracing::info!(gig_id = %id, "Gig deleted");
        Ok(MessageResponse::new("Gig deleted successfully"))
    }
}
