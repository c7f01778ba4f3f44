//! Addressing configuration for outbound notification email.

/// Admin recipient used when `ADMIN_EMAIL` is not configured.
const DEFAULT_ADMIN_EMAIL: &str = "connect@globalmindsindia.com";

/// No-reply address used for the admin alert envelope when `NO_REPLY_EMAIL`
/// is not configured.
const DEFAULT_NO_REPLY_EMAIL: &str = "noreply@globalmindsindia.com";

/// Outbound addressing settings, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct MailSettings {
    /// Recipient of the per-registration admin alert.
    pub admin_email: Option<String>,
    /// Human-answerable sender for submitter-facing mail.
    pub from_email: Option<String>,
    /// No-reply address for system mail.
    pub no_reply_email: Option<String>,
    /// Fallback sender when a message carries no explicit one.
    pub default_sender: Option<String>,
}

impl MailSettings {
    /// Load addressing settings from environment variables.
    ///
    /// | Variable         | Required | Default                          |
    /// |------------------|----------|----------------------------------|
    /// | `ADMIN_EMAIL`    | no       | `connect@globalmindsindia.com`   |
    /// | `FROM_EMAIL`     | no       | —                                |
    /// | `NO_REPLY_EMAIL` | no       | `noreply@globalmindsindia.com` (admin envelope only) |
    ///
    /// The default sender is derived, not its own variable: the no-reply
    /// address when configured, otherwise the from address.
    pub fn from_env() -> Self {
        let from_email = std::env::var("FROM_EMAIL").ok();
        let no_reply_email = std::env::var("NO_REPLY_EMAIL").ok();
        let default_sender = no_reply_email.clone().or_else(|| from_email.clone());
        Self {
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            from_email,
            no_reply_email,
            default_sender,
        }
    }

    /// Pick the sender for a message, evaluated once per message:
    /// explicit sender first, then the configured default sender, then the
    /// from address, then the no-reply address.
    pub fn resolve_sender(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_sender.clone())
            .or_else(|| self.from_email.clone())
            .or_else(|| self.no_reply_email.clone())
    }

    /// Recipient for admin alerts.
    pub fn admin_recipient(&self) -> &str {
        self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL)
    }

    /// Envelope sender for admin alerts.
    pub fn admin_sender(&self) -> &str {
        self.no_reply_email
            .as_deref()
            .unwrap_or(DEFAULT_NO_REPLY_EMAIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MailSettings {
        MailSettings {
            admin_email: Some("admin@example.com".to_string()),
            from_email: Some("hello@example.com".to_string()),
            no_reply_email: Some("noreply@example.com".to_string()),
            default_sender: Some("default@example.com".to_string()),
        }
    }

    #[test]
    fn explicit_sender_wins() {
        assert_eq!(
            settings().resolve_sender(Some("me@example.com")).as_deref(),
            Some("me@example.com")
        );
    }

    #[test]
    fn default_sender_beats_from_and_no_reply() {
        assert_eq!(
            settings().resolve_sender(None).as_deref(),
            Some("default@example.com")
        );
    }

    #[test]
    fn falls_back_to_from_then_no_reply() {
        let mut s = settings();
        s.default_sender = None;
        assert_eq!(s.resolve_sender(None).as_deref(), Some("hello@example.com"));

        s.from_email = None;
        assert_eq!(
            s.resolve_sender(None).as_deref(),
            Some("noreply@example.com")
        );

        s.no_reply_email = None;
        assert_eq!(s.resolve_sender(None), None);
    }

    #[test]
    fn admin_addresses_fall_back_to_defaults() {
        let s = MailSettings::default();
        assert_eq!(s.admin_recipient(), DEFAULT_ADMIN_EMAIL);
        assert_eq!(s.admin_sender(), DEFAULT_NO_REPLY_EMAIL);
    }
}
