//! User lookup and administration handlers.

use axum::Json;
use axum::extract::{Path, State};

use eventhub_entity::user::User;

use crate::dto::request::{DepartmentQuery, SearchQuery, UpdateUserRequest};
use crate::dto::response::{ApiResponse, DepartmentResponse, MessageResponse, UserIdResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ApiQuery, AuthUser, ValidJson, parse_uuid};
use crate::state::AppState;

/// GET /api/auth/getallusers
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DepartmentQuery>,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let users = state
        .user_service
        .list(query.department.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/auth/search-emails
pub async fn search_emails(
    admin: AdminUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let users = state
        .user_service
        .search_emails(&admin, &query.query)
        .await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/auth/getUserIdByEmail/{email}
pub async fn user_id_by_email(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<ApiResponse<UserIdResponse>>> {
    let user = state.user_service.get_by_email(&email).await?;
    Ok(Json(ApiResponse::ok(UserIdResponse { user_id: user.id })))
}

/// GET /api/auth/getUserDeptByEmail/{email}
pub async fn department_by_email(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<ApiResponse<DepartmentResponse>>> {
    let user = state.user_service.get_by_email(&email).await?;
    Ok(Json(ApiResponse::ok(DepartmentResponse {
        department: user.department,
    })))
}

/// PUT /api/auth/update/{id}
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = parse_uuid(&id)?;
    let user = state
        .user_service
        .update_profile(&auth, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /api/auth/deleteuser/{id}
pub async fn delete_user(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let id = parse_uuid(&id)?;
    state.user_service.delete(&admin, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User deleted successfully",
    ))))
}

/// GET /api/auth/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = parse_uuid(&id)?;
    let user = state.user_service.get(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}
