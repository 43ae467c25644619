//! Authentication extractors
//!
//! Resolve the admin identity behind the bearer token in the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use safari_common::{AppError, Identity};
use safari_core::Actor;

use crate::response::ApiError;
use crate::state::AppState;

async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

/// A caller holding the admin role or an admin group
///
/// Non-admin identities are rejected with 401, the same as a missing token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

impl AdminUser {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await.ok_or(ApiError::MissingAuth)?;
        let app_state = AppState::from_ref(state);

        let identity = app_state.identity().verify_admin(&token).map_err(|e| {
            match &e {
                AppError::InsufficientPermissions => tracing::warn!("Non-admin identity denied"),
                _ => tracing::warn!(error = %e, "Invalid identity token"),
            }
            ApiError::App(e)
        })?;

        Ok(AdminUser(identity))
    }
}
