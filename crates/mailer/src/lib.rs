//! Outbound notification email: message construction, sender-resolution
//! policy, SMTP transport, and the fire-and-forget dispatcher.
//!
//! The [`Mailer`] owns message construction; delivery goes through the
//! [`MailTransport`] capability, constructed once at process start and
//! injected at the call site. Dispatch never blocks the caller and never
//! surfaces a failure: send errors are logged inside the detached task and
//! swallowed there.

pub mod dispatcher;
pub mod message;
pub mod settings;
pub mod transport;

pub use dispatcher::Mailer;
pub use message::OutboundEmail;
pub use settings::MailSettings;
pub use transport::{MailError, MailTransport, MemoryTransport, SmtpConfig, SmtpMailer};
