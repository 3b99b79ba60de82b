//! Access-control gate: `AuthUser` and `AdminUser` extractors.
//!
//! The session token travels in the cookie named by `auth.cookie_name`.
//! A missing cookie and a bad token are both rejected with 403, with
//! different codes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use eventhub_core::error::AppError;
use eventhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Message when no session cookie is present.
pub const TOKEN_REQUIRED: &str = "Unauthorized, JWT token required";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(state.session_cookie.name())
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthenticated(TOKEN_REQUIRED))?;

        let claims = state.jwt_decoder.decode(&token)?;
        Ok(AuthUser(RequestContext::from_claims(&claims)))
    }
}

/// An authenticated caller whose token carries the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        ctx.require_admin()?;
        Ok(AdminUser(ctx))
    }
}
