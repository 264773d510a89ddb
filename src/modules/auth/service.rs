use anyhow::anyhow;
use sunyi_auth::{Identity, TokenError};
use sunyi_core::AppError;
use sunyi_db::StoreError;
use sunyi_models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User};
use sunyi_observability::{
    track_token_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};
use tracing::instrument;

use crate::state::AppState;

const INVALID_LOGIN: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Creates the account, then signs a token for it.
    ///
    /// If signing fails after the insert, the account stays; a later login
    /// succeeds.
    #[instrument(skip_all, fields(username = %dto.username, role = %dto.role))]
    pub async fn register_user(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        if !dto.password_fits_hasher() {
            return Err(AppError::unprocessable(anyhow!(
                "Password must be at most 72 bytes"
            )));
        }

        let password_hash = state.passwords.hash_blocking(dto.password).await?;

        let user = state
            .users
            .create(NewUser {
                username: dto.username,
                email: dto.email,
                password_hash,
                role: dto.role,
            })
            .await
            .map_err(StoreError::into_app_error)?;

        track_user_registered(user.role.as_str());
        tracing::info!(user_id = %user.id, "Account registered");

        let token = Self::issue_token(state, &user)?;
        Ok(AuthResponse { token, user })
    }

    /// Unknown accounts and wrong passwords get the same 401, and both pay
    /// for one bcrypt verification.
    #[instrument(skip_all)]
    pub async fn login_user(state: &AppState, dto: LoginRequest) -> Result<AuthResponse, AppError> {
        let identifier = dto.identifier().unwrap_or_default().to_owned();
        let credentials = state
            .users
            .find_by_handle_or_email(&identifier)
            .await
            .map_err(StoreError::into_app_error)?;

        let Some(credentials) = credentials else {
            let digest = state.dummy_digest().await?;
            state.passwords.verify_blocking(dto.password, digest).await;
            track_user_login_failure("unknown_account");
            tracing::warn!("Login attempt for unknown account");
            return Err(AppError::unauthorized(INVALID_LOGIN.to_string()));
        };

        let matches = state
            .passwords
            .verify_blocking(dto.password, credentials.password_hash)
            .await;

        if !matches {
            track_user_login_failure("wrong_password");
            tracing::warn!(user_id = %credentials.user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_LOGIN.to_string()));
        }

        let user = credentials.user;
        track_user_login_success(user.role.as_str());
        tracing::info!(user_id = %user.id, "User logged in");

        let token = Self::issue_token(state, &user)?;
        Ok(AuthResponse { token, user })
    }

    #[instrument(skip(state))]
    pub async fn current_user(state: &AppState, identity: Identity) -> Result<User, AppError> {
        state
            .users
            .find_by_id(identity.user_id)
            .await
            .map_err(StoreError::into_app_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
        let token = state
            .tokens
            .issue(user.id, user.role)
            .map_err(TokenError::into_app_error)?;
        track_token_issued();
        Ok(token)
    }
}
