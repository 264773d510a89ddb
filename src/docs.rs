use sunyi_auth::Role;
use sunyi_models::{
    AuthResponse, Gig, GigInput, LoginRequest, MessageResponse, OrganizerSummary, RegisterRequest,
    User,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::gigs::controller::list_gigs,
        crate::modules::gigs::controller::get_gig,
        crate::modules::gigs::controller::get_gigs_by_organizer,
        crate::modules::gigs::controller::create_gig,
        crate::modules::gigs::controller::update_gig,
        crate::modules::gigs::controller::delete_gig,
    ),
    components(
        schemas(
            User,
            Role,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            Gig,
            GigInput,
            OrganizerSummary,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current account"),
        (name = "Gigs", description = "Gig listings; writes are limited to the organizer who created them"),
    ),
    info(
        title = "Sunyi API",
        version = "0.1.0",
        description = "Gig listing API: organizers publish events, consumers browse them.",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
