//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use eventhub_entity::notification::Notification;
use eventhub_service::notification::NotificationList;

use crate::dto::request::CreateNotificationRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, AuthUser, ValidJson, parse_uuid};
use crate::state::AppState;

type ListReply = ApiResult<Json<ApiResponse<NotificationList>>>;

/// GET /api/notifications
pub async fn list_notifications(_auth: AuthUser, State(state): State<AppState>) -> ListReply {
    let list = state.notification_service.list_all().await?;
    Ok(Json(ApiResponse::ok(list)))
}

/// POST /api/notifications
pub async fn create_notification(
    admin: AdminUser,
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateNotificationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Notification>>)> {
    let notification = state
        .notification_service
        .create(&admin, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(notification))))
}

/// GET /api/notifications/user/{userId}
pub async fn user_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ListReply {
    let list = state
        .notification_service
        .list_for_user(&auth, parse_uuid(&user_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(list)))
}

/// GET /api/notifications/unread/{userId}
pub async fn unread_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ListReply {
    let list = state
        .notification_service
        .unread_for_user(&auth, parse_uuid(&user_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(list)))
}

/// POST /api/notifications/markAsRead/{id}
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Notification>>> {
    let notification = state
        .notification_service
        .mark_read(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Notification>>> {
    let notification = state.notification_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(notification)))
}
