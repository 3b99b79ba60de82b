//! Auth handlers: signup, login, logout, check, password reset, invitations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use eventhub_service::account::AuthSession;
use eventhub_service::invitation::InvitationReceipt;

use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SendInvitesRequest, SignupRequest,
};
use crate::dto::response::{ApiResponse, CurrentUserResponse, MessageResponse, SessionResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, AuthUser, ValidJson};
use crate::state::AppState;

/// Session body plus the jar carrying its token cookie.
type SessionReply = (StatusCode, CookieJar, Json<ApiResponse<SessionResponse>>);

fn session_reply(
    state: &AppState,
    jar: CookieJar,
    status: StatusCode,
    session: AuthSession,
) -> SessionReply {
    let jar = state.session_cookie.issue(jar, session.token.clone());
    let body = SessionResponse::new(session.token, &session.user);
    (status, jar, Json(ApiResponse::ok(body)))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(req): ValidJson<SignupRequest>,
) -> ApiResult<SessionReply> {
    let session = state.auth_service.signup(req.into()).await?;
    Ok(session_reply(&state, jar, StatusCode::CREATED, session))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<SessionReply> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(session_reply(&state, jar, StatusCode::OK, session))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    (
        state.session_cookie.clear(jar),
        Json(ApiResponse::ok(MessageResponse::new("Logged out successfully"))),
    )
}

/// GET /api/auth/check
pub async fn check(auth: AuthUser) -> Json<ApiResponse<CurrentUserResponse>> {
    Json(ApiResponse::ok(CurrentUserResponse::from(auth.context())))
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ForgotPasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.auth_service.forgot_password(&req.email).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password reset link sent to your email",
    ))))
}

/// POST /api/auth/reset-password/{token}
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ValidJson(req): ValidJson<ResetPasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .auth_service
        .reset_password(&token, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password has been reset successfully",
    ))))
}

/// POST /api/auth/send-invites
pub async fn send_invites(
    admin: AdminUser,
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SendInvitesRequest>,
) -> ApiResult<Json<ApiResponse<InvitationReceipt>>> {
    let receipt = state.invitation_service.send(&admin, req.into()).await?;
    Ok(Json(ApiResponse::ok(receipt)))
}
