//! Like, save, respond, comment, and attendance handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use eventhub_entity::comment::CommentWithAuthor;
use eventhub_entity::event::{EngagementKind, Event};

use crate::dto::request::{AttendanceRequest, CommentRequest, EngagementRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, AuthUser, OptionalJson, ValidJson, parse_uuid};
use crate::state::AppState;

/// A single named id list, e.g. `{"likedBy": [...]}`.
type MembersReply = ApiResult<Json<ApiResponse<HashMap<&'static str, Vec<Uuid>>>>>;

async fn toggle(
    state: &AppState,
    auth: &AuthUser,
    id: &str,
    kind: EngagementKind,
    req: EngagementRequest,
) -> MembersReply {
    let members = state
        .engagement_service
        .toggle(auth, parse_uuid(id)?, kind, req.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(HashMap::from([(kind.field(), members)]))))
}

/// POST /events/{id}/like
pub async fn like(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    OptionalJson(req): OptionalJson<EngagementRequest>,
) -> MembersReply {
    toggle(&state, &auth, &id, EngagementKind::Like, req).await
}

/// POST /events/{id}/save
pub async fn save(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    OptionalJson(req): OptionalJson<EngagementRequest>,
) -> MembersReply {
    toggle(&state, &auth, &id, EngagementKind::Save, req).await
}

/// POST /events/{id}/userresponse
pub async fn respond(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    OptionalJson(req): OptionalJson<EngagementRequest>,
) -> MembersReply {
    toggle(&state, &auth, &id, EngagementKind::Response, req).await
}

/// POST /events/{id}/comment
pub async fn comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<CommentRequest>,
) -> MembersReply {
    let comments = state
        .engagement_service
        .comment(&auth, parse_uuid(&id)?, req.user_id, &req.text)
        .await?;
    Ok(Json(ApiResponse::ok(HashMap::from([("comments", comments)]))))
}

/// GET /events/{id}/comments
pub async fn list_comments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<CommentWithAuthor>>>> {
    let comments = state
        .engagement_service
        .list_comments(parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// POST /events/{id}/attendance
pub async fn mark_attendance(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<AttendanceRequest>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let event = state
        .engagement_service
        .mark_attendance(&admin, parse_uuid(&id)?, &req.email)
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}
