//! Fire-and-forget dispatch of registration notices.

use std::sync::Arc;

use gep_db::models::user::User;

use crate::message::{self, OutboundEmail};
use crate::settings::MailSettings;
use crate::transport::MailTransport;

/// Renders registration notices and schedules their delivery.
///
/// [`Mailer::dispatch`] hands each message to a detached tokio task and
/// returns immediately; the caller never waits for delivery and never sees
/// a send failure. Failures are logged with recipients, subject, and the
/// error inside the task.
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    settings: MailSettings,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>, settings: MailSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Render and schedule the submitter confirmation.
    pub fn send_confirmation(&self, user: &User) {
        self.dispatch(message::confirmation_email(user, &self.settings));
    }

    /// Render and schedule the admin alert.
    ///
    /// `mobile` and `city` are the effective values for this submission;
    /// they may come from the submission's profile when the stored record
    /// predates those fields.
    pub fn send_admin_alert(&self, user: &User, mobile: Option<&str>, city: Option<&str>) {
        self.dispatch(message::admin_alert_email(user, mobile, city, &self.settings));
    }

    /// Resolve the sender and schedule delivery on a detached task.
    ///
    /// Tasks are unbounded; at the expected volume every send is in flight
    /// at most briefly.
    pub fn dispatch(&self, mut email: OutboundEmail) {
        email.sender = self.settings.resolve_sender(email.sender.as_deref());

        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            match transport.send(&email).await {
                Ok(()) => {
                    tracing::info!(
                        recipients = ?email.to,
                        subject = %email.subject,
                        "Email sent"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        recipients = ?email.to,
                        subject = %email.subject,
                        error = %err,
                        "Failed to send email"
                    );
                }
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
