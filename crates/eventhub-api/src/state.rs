//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use tracing::info;

use eventhub_auth::jwt::{JwtDecoder, JwtEncoder};
use eventhub_auth::password::{PasswordHasher, PasswordValidator};
use eventhub_core::config::AppConfig;
use eventhub_core::result::AppResult;
use eventhub_core::traits::MailTransport;
use eventhub_database::Stores;
use eventhub_service::{
    AnalyticsService, AuthService, EngagementService, EventService, InvitationService,
    NotificationService, UserService,
};

use crate::cookie::SessionCookie;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store backend (PostgreSQL or memory)
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token verifier
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Session cookie formatter
    pub session_cookie: Arc<SessionCookie>,

    // ── Services ─────────────────────────────────────────────
    /// Signup, login, password reset
    pub auth_service: Arc<AuthService>,
    /// User lookup and administration
    pub user_service: Arc<UserService>,
    /// Event administration and listings
    pub event_service: Arc<EventService>,
    /// Toggles, comments, attendance
    pub engagement_service: Arc<EngagementService>,
    /// Notification reads and receipts
    pub notification_service: Arc<NotificationService>,
    /// Admin analytics
    pub analytics_service: Arc<AnalyticsService>,
    /// Invitation mail
    pub invitation_service: Arc<InvitationService>,
}

impl AppState {
    /// Wire the credential helpers and services over `stores`.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        mailer: Arc<dyn MailTransport>,
    ) -> AppResult<Self> {
        // ── Step 1: Credential helpers ───────────────────────────────
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let session_cookie = Arc::new(SessionCookie::new(&config.auth));

        // ── Step 2: Services ─────────────────────────────────────────
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            password_hasher,
            password_validator,
            jwt_encoder,
            Arc::clone(&mailer),
            config.auth.clone(),
            config.app.clone(),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&stores.users)));
        let event_service = Arc::new(EventService::new(
            Arc::clone(&stores.events),
            config.events.clone(),
        ));
        let engagement_service = Arc::new(EngagementService::new(Arc::clone(&stores.events)));
        let notification_service = Arc::new(NotificationService::new(
            Arc::clone(&stores.notifications),
            Arc::clone(&stores.users),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.events),
        ));
        let invitation_service = Arc::new(InvitationService::new(
            Arc::clone(&stores.events),
            Arc::clone(&mailer),
            config.app.clone(),
        ));

        info!(mail_transport = mailer.name(), "Services initialized");

        Ok(Self {
            config: Arc::new(config),
            stores,
            jwt_decoder,
            session_cookie,
            auth_service,
            user_service,
            event_service,
            engagement_service,
            notification_service,
            analytics_service,
            invitation_service,
        })
    }
}
