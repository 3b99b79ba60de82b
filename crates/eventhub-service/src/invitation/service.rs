//! Sends event invitations through the configured mail transport.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use eventhub_core::config::FrontendConfig;
use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::traits::{MailMessage, MailTransport};
use eventhub_database::EventStore;

use super::template::Invitation;
use crate::account::validation::normalize_email;
use crate::context::RequestContext;

/// Who to invite to which event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationRequest {
    /// The event.
    pub event_id: Uuid,
    /// Recipients.
    #[serde(default)]
    pub emails: Vec<String>,
    /// Greeting names, matched to `emails` by position.
    #[serde(default)]
    pub usernames: Vec<String>,
}

/// How many invitations went out.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InvitationReceipt {
    /// Number of messages delivered.
    pub sent: usize,
}

/// Renders and sends invitations.
#[derive(Debug, Clone)]
pub struct InvitationService {
    events: Arc<dyn EventStore>,
    mailer: Arc<dyn MailTransport>,
    frontend: FrontendConfig,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(
        events: Arc<dyn EventStore>,
        mailer: Arc<dyn MailTransport>,
        frontend: FrontendConfig,
    ) -> Self {
        Self {
            events,
            mailer,
            frontend,
        }
    }

    /// Send one invitation per email, concurrently (admin).
    ///
    /// The first delivery failure fails the whole request.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        request: InvitationRequest,
    ) -> Result<InvitationReceipt, AppError> {
        ctx.require_admin()?;
        if request.emails.is_empty() {
            return Err(AppError::validation("Event ID and email list are required"));
        }
        let emails = request
            .emails
            .iter()
            .map(|e| normalize_email(e))
            .collect::<Result<Vec<_>, _>>()?;

        let event = self
            .events
            .find_by_id(request.event_id, false)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        let invitation = Invitation::new(
            &event,
            self.frontend.link(&format!("eventf/{}", event.id)),
        );
        let subject = invitation.subject();
        let messages: Vec<MailMessage> = emails
            .into_iter()
            .enumerate()
            .map(|(i, to)| MailMessage {
                to,
                subject: subject.clone(),
                html: invitation.render(request.usernames.get(i).map(String::as_str)),
            })
            .collect();

        try_join_all(messages.iter().map(|m| self.mailer.send(m)))
            .await
            .map_err(|e| {
                warn!(event_id = %event.id, error = %e, "Invitation delivery failed");
                match e.kind {
                    ErrorKind::ExternalService => e,
                    _ => AppError::with_source(
                        ErrorKind::ExternalService,
                        "Failed to send invitations",
                        e,
                    ),
                }
            })?;

        info!(
            event_id = %event.id,
            actor = %ctx.user_id,
            sent = messages.len(),
            transport = self.mailer.name(),
            "Invitations sent"
        );
        Ok(InvitationReceipt {
            sent: messages.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingMailer, ctx, memory_stores};
    use chrono::{NaiveDate, Utc};
    use eventhub_entity::event::{Event, EventContent};
    use eventhub_entity::user::UserRole;

    async fn seeded(mailer: Arc<RecordingMailer>) -> (InvitationService, Event) {
        let events = memory_stores().events;
        let date = NaiveDate::from_ymd_opt(2099, 12, 24).unwrap();
        let event = events
            .create(
                &EventContent {
                    name: "Year End Party".to_string(),
                    start_date: date,
                    start_time: "19:00".to_string(),
                    end_date: date,
                    end_time: "23:00".to_string(),
                    thumbnail: None,
                    description: "<p>Dinner and music</p>".to_string(),
                    event_access: "Public".to_string(),
                },
                None,
                Utc::now(),
            )
            .await
            .unwrap();
        let service = InvitationService::new(events, mailer, FrontendConfig::default());
        (service, event)
    }

    fn request(event_id: Uuid, emails: &[&str], usernames: &[&str]) -> InvitationRequest {
        InvitationRequest {
            event_id,
            emails: emails.iter().map(|e| e.to_string()).collect(),
            usernames: usernames.iter().map(|u| u.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_sends_one_mail_per_recipient() {
        let mailer = Arc::new(RecordingMailer::default());
        let (service, event) = seeded(mailer.clone()).await;

        let receipt = service
            .send(
                &ctx(UserRole::Admin),
                request(event.id, &["a@example.com", "b@example.com"], &["Asha"]),
            )
            .await
            .unwrap();
        assert_eq!(receipt.sent, 2);

        let mut sent = mailer.messages();
        sent.sort_by(|a, b| a.to.cmp(&b.to));
        assert_eq!(sent[0].subject, "Invitation: Year End Party");
        assert!(sent[0].html.contains("Hello Asha,"));
        assert!(sent[1].html.contains("<p>Hello,</p>"));
        assert!(sent[0].html.contains(&format!("/eventf/{}", event.id)));
        assert!(sent[0].html.contains("Date: 24-12-2099"));
    }

    #[tokio::test]
    async fn test_rejects_empty_list_and_missing_event() {
        let mailer = Arc::new(RecordingMailer::default());
        let (service, _) = seeded(mailer).await;
        let admin = ctx(UserRole::Admin);

        let err = service
            .send(&admin, request(Uuid::new_v4(), &[], &[]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .send(&admin, request(Uuid::new_v4(), &["a@example.com"], &[]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = service
            .send(&ctx(UserRole::User), request(Uuid::new_v4(), &["a@example.com"], &[]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_external_service() {
        let mailer = Arc::new(RecordingMailer::failing_for("b@example.com"));
        let (service, event) = seeded(mailer).await;

        let err = service
            .send(
                &ctx(UserRole::Admin),
                request(event.id, &["a@example.com", "b@example.com"], &[]),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
