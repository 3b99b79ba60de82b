//! Admin analytics handlers.

use axum::Json;
use axum::extract::{Path, State};

use eventhub_entity::analytics::{CountBucket, EventEngagement};
use eventhub_entity::user::User;

use crate::dto::request::DepartmentQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ApiQuery, parse_uuid};
use crate::state::AppState;

/// GET /api/analytics/departments
pub async fn departments(
    admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CountBucket>>>> {
    let buckets = state.analytics_service.departments(&admin).await?;
    Ok(Json(ApiResponse::ok(buckets)))
}

/// GET /api/analytics/events
pub async fn events(
    admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<EventEngagement>>>> {
    let rows = state.analytics_service.events(&admin).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /api/analytics/event-types
pub async fn event_types(
    admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CountBucket>>>> {
    let buckets = state.analytics_service.event_types(&admin).await?;
    Ok(Json(ApiResponse::ok(buckets)))
}

/// GET /api/analytics/users
pub async fn users(
    admin: AdminUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DepartmentQuery>,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let users = state
        .analytics_service
        .users(&admin, query.department.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/analytics/users/{id}
pub async fn user(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.analytics_service.user(&admin, parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(user)))
}
