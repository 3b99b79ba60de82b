//! Signup, login, and the password-reset flow.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use eventhub_auth::jwt::JwtEncoder;
use eventhub_auth::password::{PasswordHasher, PasswordValidator};
use eventhub_auth::reset::{self, ResetToken};
use eventhub_core::config::{AuthConfig, FrontendConfig};
use eventhub_core::error::AppError;
use eventhub_core::traits::{MailMessage, MailTransport};
use eventhub_database::UserStore;
use eventhub_entity::user::{CreateUser, User, UserRole};

use super::validation::{check_domain, normalize_department, normalize_email, normalize_name};

/// Message for every failed login.
pub const LOGIN_FAILED: &str = "Auth failed: incorrect email or password";
/// Message for every failed reset.
pub const RESET_FAILED: &str = "Invalid or expired token";

/// Signup form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Department tag.
    pub department: String,
    /// Requested role; `user` when absent.
    pub role: Option<UserRole>,
}

/// A signed-in user and their session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Signed session token.
    pub token: String,
    /// The account.
    pub user: User,
}

/// Handles credential checks and the reset-token lifecycle.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    mailer: Arc<dyn MailTransport>,
    config: AuthConfig,
    frontend: FrontendConfig,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        mailer: Arc<dyn MailTransport>,
        config: AuthConfig,
        frontend: FrontendConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            mailer,
            config,
            frontend,
        }
    }

    /// Register an account and sign it in.
    pub async fn signup(&self, input: SignupInput) -> Result<AuthSession, AppError> {
        let name = normalize_name(&input.name)?;
        let email = normalize_email(&input.email)?;
        check_domain(&email, &self.config.allowed_email_domains)?;
        self.validator.validate(&input.password)?;
        let department = normalize_department(&input.department)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User already exists, please login"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                name,
                email,
                password_hash,
                department,
                role: input.role.unwrap_or_default(),
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User signed up");
        self.start_session(user)
    }

    /// Check credentials and sign in.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AppError::unauthorized(LOGIN_FAILED));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(LOGIN_FAILED));
        }

        info!(user_id = %user.id, "User logged in");
        self.start_session(user)
    }

    fn start_session(&self, user: User) -> Result<AuthSession, AppError> {
        let issued = self.encoder.issue(&user, Utc::now())?;
        Ok(AuthSession {
            token: issued.token,
            user,
        })
    }

    /// Issue a reset token and mail its link.
    ///
    /// When delivery fails the stored token is withdrawn and the mail error
    /// is returned.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email)?;
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AppError::not_found("User not found"));
        };

        let token = ResetToken::generate(self.config.reset_token_ttl_minutes, Utc::now());
        self.users
            .set_reset_token(user.id, &token.digest, token.expires_at)
            .await?;

        let link = self
            .frontend
            .link(&format!("reset-password/{}", token.plaintext));
        let message = MailMessage {
            to: user.email.clone(),
            subject: "Password Reset Request".to_string(),
            html: reset_mail_html(&user.name, &link, self.config.reset_token_ttl_minutes),
        };

        if let Err(e) = self.mailer.send(&message).await {
            warn!(user_id = %user.id, error = %e, "Reset mail failed; withdrawing token");
            self.users.clear_reset_token(user.id).await?;
            return Err(e);
        }

        info!(user_id = %user.id, transport = self.mailer.name(), "Reset link sent");
        Ok(())
    }

    /// Consume a reset token and set a new password.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), AppError> {
        self.validator.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .users
            .consume_reset_token(&reset::digest(token.trim()), Utc::now(), &password_hash)
            .await?
            .ok_or_else(|| AppError::invalid_token(RESET_FAILED))?;

        info!(user_id = %user.id, "Password reset");
        Ok(())
    }
}

fn reset_mail_html(name: &str, link: &str, ttl_minutes: u64) -> String {
    format!(
        "<p>Hello {name},</p>\
         <p>We received a request to reset your password. \
         Use the link below within {ttl_minutes} minutes:</p>\
         <p><a href=\"{link}\">{link}</a></p>\
         <p>If you did not ask for this, you can ignore this email.</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingMailer, auth_config, memory_stores};
    use eventhub_core::error::ErrorKind;

    fn service_with(mailer: Arc<RecordingMailer>, config: AuthConfig) -> (AuthService, Arc<dyn UserStore>) {
        let users = memory_stores().users;
        let service = AuthService::new(
            users.clone(),
            Arc::new(PasswordHasher::new(&config).unwrap()),
            Arc::new(PasswordValidator::new(&config)),
            Arc::new(JwtEncoder::new(&config)),
            mailer,
            config,
            FrontendConfig::default(),
        );
        (service, users)
    }

    fn signup_input(email: &str) -> SignupInput {
        SignupInput {
            name: "Asha Rao".to_string(),
            email: email.to_string(),
            password: "pass1234".to_string(),
            department: "HR".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let (service, _) = service_with(Arc::new(RecordingMailer::default()), auth_config());
        let session = service.signup(signup_input("Asha@Example.com")).await.unwrap();
        assert_eq!(session.user.email, "asha@example.com");
        assert_eq!(session.user.role, UserRole::User);
        assert!(!session.token.is_empty());

        let login = service.login("asha@example.com", "pass1234").await.unwrap();
        assert_eq!(login.user.id, session.user.id);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicates_and_bad_input() {
        let (service, _) = service_with(Arc::new(RecordingMailer::default()), auth_config());
        service.signup(signup_input("asha@example.com")).await.unwrap();

        let err = service.signup(signup_input("asha@example.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "User already exists, please login");

        let err = service.signup(signup_input("asha@corp.io")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut short = signup_input("ravi@example.com");
        short.password = "abc".to_string();
        assert_eq!(service.signup(short).await.unwrap_err().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let (service, _) = service_with(Arc::new(RecordingMailer::default()), auth_config());
        service.signup(signup_input("asha@example.com")).await.unwrap();

        let wrong = service.login("asha@example.com", "nope").await.unwrap_err();
        let unknown = service.login("who@example.com", "pass1234").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong.message, LOGIN_FAILED);
        assert_eq!(unknown.message, LOGIN_FAILED);
    }

    fn token_from(mail: &MailMessage) -> String {
        let start = mail.html.find("reset-password/").unwrap() + "reset-password/".len();
        mail.html[start..start + 40].to_string()
    }

    #[tokio::test]
    async fn test_reset_token_is_single_use() {
        let mailer = Arc::new(RecordingMailer::default());
        let (service, _) = service_with(mailer.clone(), auth_config());
        service.signup(signup_input("asha@example.com")).await.unwrap();

        service.forgot_password("asha@example.com").await.unwrap();
        let token = token_from(&mailer.messages()[0]);

        service.reset_password(&token, "newpass").await.unwrap();
        service.login("asha@example.com", "newpass").await.unwrap();

        let err = service.reset_password(&token, "another").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert_eq!(err.message, RESET_FAILED);
    }

    #[tokio::test]
    async fn test_expired_reset_token_is_rejected() {
        let mailer = Arc::new(RecordingMailer::default());
        let config = AuthConfig {
            reset_token_ttl_minutes: 0,
            ..auth_config()
        };
        let (service, _) = service_with(mailer.clone(), config);
        service.signup(signup_input("asha@example.com")).await.unwrap();
        service.forgot_password("asha@example.com").await.unwrap();

        let token = token_from(&mailer.messages()[0]);
        let err = service.reset_password(&token, "newpass").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_failed_reset_mail_withdraws_token() {
        let mailer = Arc::new(RecordingMailer::failing_for("asha@example.com"));
        let (service, users) = service_with(mailer, auth_config());
        service.signup(signup_input("asha@example.com")).await.unwrap();

        let err = service.forgot_password("asha@example.com").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);

        let user = users.find_by_email("asha@example.com").await.unwrap().unwrap();
        assert!(user.reset_password_token.is_none());
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email() {
        let (service, _) = service_with(Arc::new(RecordingMailer::default()), auth_config());
        let err = service.forgot_password("who@example.com").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
