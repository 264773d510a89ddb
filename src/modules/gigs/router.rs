use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::{auth::authenticate, role::require_organizer};
use crate::state::AppState;

use super::controller::{
    create_gig, delete_gig, get_gig, get_gigs_by_organizer, list_gigs, update_gig,
};

/// Reads are public. Writes pass the identity middleware first, then the
/// organizer gate; ownership is checked in the service.
pub fn init_gigs_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_gigs))
        .route("/{id}", get(get_gig))
        .route("/organizer/{organizer_id}", get(get_gigs_by_organizer));

    let protected = Router::new()
        .route("/", post(create_gig))
        .route("/{id}", put(update_gig).delete(delete_gig))
        .route_layer(middleware::from_fn(require_organizer))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    public.merge(protected)
}
