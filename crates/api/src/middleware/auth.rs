//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use civiclink_core::access::Caller;
use civiclink_core::error::CoreError;
use civiclink_core::roles::Role;
use civiclink_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity extracted from a JWT Bearer token.
///
/// The role comes from the role registry at request time, never from the
/// token, so grants and revocations take effect immediately.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity UUID (from `claims.sub`).
    pub user_id: DbId,
    /// Effective role; `None` when the identity holds no grant.
    pub role: Option<Role>,
}

impl AuthUser {
    pub fn caller(&self) -> Caller {
        Caller::user(self.user_id, self.role)
    }

    /// Resolve the bearer token in `parts`, if any. A present but malformed
    /// or invalid token is an error, not an anonymous request.
    async fn from_parts_optional(
        parts: &Parts,
        state: &AppState,
    ) -> Result<Option<Self>, AppError> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let header = header.to_str().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization header".into(),
            ))
        })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let role = state.complaints.get_role(claims.sub).await?;
        Ok(Some(AuthUser {
            user_id: claims.sub,
            role,
        }))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::from_parts_optional(parts, state).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })
    }
}

/// The caller on routes where authentication is optional. No
/// `Authorization` header means [`Caller::Anonymous`].
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuth(pub Caller);

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_parts_optional(parts, state)
            .await?
            .map_or(Caller::Anonymous, |user| user.caller());
        Ok(MaybeAuth(caller))
    }
}
