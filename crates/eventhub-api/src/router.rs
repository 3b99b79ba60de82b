//! Route definitions for the EventHub HTTP API.
//!
//! Account, notification, analytics, and health routes are mounted under
//! `/api`; event routes live under `/events`.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the route table and thread `AppState` through it.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(notification_routes())
        .merge(analytics_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .nest("/events", event_routes())
        .with_state(state)
}

/// Signup, login, reset, invitations, and user administration
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/check", get(handlers::auth::check))
        .route("/auth/forgot-password", post(handlers::auth::forgot_password))
        .route(
            "/auth/reset-password/{token}",
            post(handlers::auth::reset_password),
        )
        .route("/auth/send-invites", post(handlers::auth::send_invites))
        .route("/auth/getallusers", get(handlers::user::list_users))
        .route("/auth/search-emails", get(handlers::user::search_emails))
        .route(
            "/auth/getUserIdByEmail/{email}",
            get(handlers::user::user_id_by_email),
        )
        .route(
            "/auth/getUserDeptByEmail/{email}",
            get(handlers::user::department_by_email),
        )
        .route("/auth/update/{id}", put(handlers::user::update_user))
        .route("/auth/deleteuser/{id}", delete(handlers::user::delete_user))
        .route("/auth/{id}", get(handlers::user::get_user))
}

/// Event administration, listings, and engagement
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(handlers::event::create_event))
        .route("/allevents", get(handlers::event::upcoming_events))
        .route("/filter", get(handlers::event::filter_events))
        .route("/eventaccess", get(handlers::event::events_by_access))
        .route("/geteventbydate", get(handlers::event::events_on_date))
        .route("/getalleventdates", get(handlers::event::event_dates))
        .route("/liked", get(handlers::event::liked_events))
        .route("/saved", get(handlers::event::saved_events))
        .route(
            "/check-response/{event_id}/{user_id}",
            get(handlers::event::check_response),
        )
        .route("/soft-delete/{id}", patch(handlers::event::soft_delete_event))
        .route(
            "/{id}",
            get(handlers::event::get_event)
                .put(handlers::event::update_event)
                .delete(handlers::event::delete_event),
        )
        .route("/{id}/like", post(handlers::engagement::like))
        .route("/{id}/save", post(handlers::engagement::save))
        .route("/{id}/userresponse", post(handlers::engagement::respond))
        .route("/{id}/comment", post(handlers::engagement::comment))
        .route("/{id}/comments", get(handlers::engagement::list_comments))
        .route("/{id}/attendance", post(handlers::engagement::mark_attendance))
}

/// Notification reads, receipts, and broadcasts
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::create_notification),
        )
        .route(
            "/notifications/user/{id}",
            get(handlers::notification::user_notifications),
        )
        .route(
            "/notifications/unread/{id}",
            get(handlers::notification::unread_notifications),
        )
        .route(
            "/notifications/markAsRead/{id}",
            post(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification),
        )
}

/// Admin analytics
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/departments", get(handlers::analytics::departments))
        .route("/analytics/events", get(handlers::analytics::events))
        .route("/analytics/event-types", get(handlers::analytics::event_types))
        .route("/analytics/users", get(handlers::analytics::users))
        .route("/analytics/users/{id}", get(handlers::analytics::user))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
