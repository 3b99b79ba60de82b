//! Event administration and listing handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;

use eventhub_core::error::AppError;
use eventhub_entity::event::{Event, EventStatus};
use eventhub_service::event::ResponseCheck;

use crate::dto::request::{
    AccessQuery, CreateEventRequest, DateQuery, DepartmentQuery, SoftDeleteRequest, StatusQuery,
    UpdateEventRequest, UserQuery,
};
use crate::dto::response::{ApiResponse, EventPageResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ApiQuery, AuthUser, PaginationParams, ValidJson, parse_uuid};
use crate::state::AppState;

type EventsReply = ApiResult<Json<ApiResponse<Vec<Event>>>>;

/// POST /events/create
pub async fn create_event(
    admin: AdminUser,
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Event>>)> {
    let event = state.event_service.create(&admin, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// GET /events/allevents
pub async fn upcoming_events(_auth: AuthUser, State(state): State<AppState>) -> EventsReply {
    let events = state.event_service.upcoming().await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /events/filter
pub async fn filter_events(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> EventsReply {
    let status = match query.status.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<EventStatus>()?,
        _ => EventStatus::All,
    };
    let events = state.event_service.list_by_status(status).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /events/eventaccess
pub async fn events_by_access(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AccessQuery>,
    ApiQuery(page): ApiQuery<PaginationParams>,
) -> ApiResult<Json<ApiResponse<EventPageResponse>>> {
    let events = state
        .event_service
        .list_by_access(query.event_access.as_deref(), page.page, page.limit)
        .await?;
    Ok(Json(ApiResponse::ok(events.into())))
}

/// GET /events/geteventbydate
pub async fn events_on_date(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> EventsReply {
    let date = parse_day(query.date.as_deref())?;
    let events = state
        .event_service
        .on_date(date, query.department.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /events/getalleventdates
pub async fn event_dates(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DepartmentQuery>,
) -> ApiResult<Json<ApiResponse<Vec<NaiveDate>>>> {
    let dates = state
        .event_service
        .start_dates(query.department.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(dates)))
}

/// GET /events/liked
pub async fn liked_events(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> EventsReply {
    let user_id = query.user_id.unwrap_or(auth.user_id);
    let events = state.event_service.liked_by(user_id).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /events/saved
pub async fn saved_events(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> EventsReply {
    let user_id = query.user_id.unwrap_or(auth.user_id);
    let events = state.event_service.saved_by(user_id).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /events/check-response/{eventId}/{userId}
pub async fn check_response(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((event_id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<ResponseCheck>>> {
    let check = state
        .event_service
        .check_response(parse_uuid(&event_id)?, parse_uuid(&user_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(check)))
}

/// PATCH /events/soft-delete/{id}
pub async fn soft_delete_event(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<SoftDeleteRequest>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let id = parse_uuid(&id)?;
    let event = state
        .event_service
        .soft_delete(&admin, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// GET /events/{id}
pub async fn get_event(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let event = state.event_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// PUT /events/{id}
pub async fn update_event(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateEventRequest>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let id = parse_uuid(&id)?;
    let event = state.event_service.update(&admin, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /events/{id}
pub async fn delete_event(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let event = state.event_service.delete(&admin, parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// A calendar day from `YYYY-MM-DD` or a timestamp that starts with one.
fn parse_day(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::validation("date parameter is required"))?;
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date: {raw}")))
}
