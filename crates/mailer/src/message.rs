//! Notification message construction.
//!
//! Builds the two registration notices (submitter confirmation, admin
//! alert) from a stored user record. Every record field interpolated into
//! an HTML body goes through [`escape_html`] so submitted values can never
//! inject markup.

use gep_db::models::user::User;

use crate::settings::MailSettings;

/// A rendered outbound message, alive only for the duration of dispatch.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
    pub to: Vec<String>,
    /// Explicit envelope sender; the dispatcher falls back to the
    /// configured default chain when absent.
    pub sender: Option<String>,
    pub reply_to: Option<String>,
}

/// Escape a value for interpolation into an HTML body.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped value for HTML bodies, `-` when absent.
fn escape_or_dash(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_else(|| "-".to_string())
}

// ---------------------------------------------------------------------------
// Submitter confirmation
// ---------------------------------------------------------------------------

/// Render the confirmation sent to the submitter's own address.
pub fn confirmation_email(user: &User, settings: &MailSettings) -> OutboundEmail {
    let subject = "Welcome to the Global Education Partner Programme!".to_string();

    let text = format!(
        "Dear {name},\n\n\
         Thank you for registering for the Global Education Partner (GEP) Programme with Global Minds India!\n\
         Your registration has been received successfully.\n\n\
         Our team will get in touch with you shortly to explain how the programme works, the benefits, and how you can begin your journey as a GEP Partner.\n\n\
         If you have any questions, feel free to reach out.\n\n\
         Warm regards,\n\
         Global Minds India Team\n\
         📞 +91 73534 46655\n\
         📧 connect@globalmindsindia.com\n",
        name = user.name,
    );

    let html = format!(
        "<html><body>\n\
         <p>Dear {name},</p>\n\
         <p>Thank you for registering for the <strong>Global Education Partner (GEP) Programme</strong> with <strong>Global Minds India</strong>!</p>\n\
         <p>Your registration has been received successfully.</p>\n\
         <p>Our team will get in touch with you shortly to explain how the programme works, the benefits, and how you can begin your journey as a GEP Partner.</p>\n\
         <p>If you have any immediate questions, feel free to reach out.</p>\n\
         <p>Warm regards,<br/>\n\
         Global Minds India Team<br/>\n\
         📞 +91 73534 46655<br/>\n\
         📧 <a href=\"mailto:connect@globalmindsindia.com\">connect@globalmindsindia.com</a></p>\n\
         </body></html>",
        name = escape_html(&user.name),
    );

    OutboundEmail {
        subject,
        text,
        html,
        to: vec![user.email.clone()],
        sender: settings.from_email.clone(),
        reply_to: None,
    }
}

// ---------------------------------------------------------------------------
// Admin alert
// ---------------------------------------------------------------------------

/// Render the alert sent to the configured admin address.
///
/// `mobile` and `city` are passed separately because the stored record may
/// predate those fields; the caller supplies the effective values.
pub fn admin_alert_email(
    user: &User,
    mobile: Option<&str>,
    city: Option<&str>,
    settings: &MailSettings,
) -> OutboundEmail {
    let subject = "New GEP Partner Registration – Please Contact the User".to_string();

    let text = format!(
        "Hello Team,\n\n\
         A new user has registered for the Global Education Partner (GEP) Programme.\n\n\
         User Details:\n\
         Name: {name}\n\
         Phone: {phone}\n\
         Email: {email}\n\
         Action Required:\n\
         👉 Please contact the user and provide full details about the programme.\n\
         👉 Assist them with onboarding and next steps.\n\n\
         Thank you,\n\
         System Notification – Global Minds India\n",
        name = user.name,
        phone = mobile.unwrap_or("-"),
        email = user.email,
    );

    let html = format!(
        "<html><body>\n\
         <p>Hello Team,</p>\n\
         <p>A new user has registered for the <strong>Global Education Partner (GEP) Programme</strong>.</p>\n\
         <h4>User Details:</h4>\n\
         <table cellpadding=\"4\" cellspacing=\"0\" border=\"0\">\n\
         <tr><td><strong>Name:</strong></td><td>{name}</td></tr>\n\
         <tr><td><strong>Phone:</strong></td><td>{phone}</td></tr>\n\
         <tr><td><strong>Email:</strong></td><td><a href=\"mailto:{email}\">{email}</a></td></tr>\n\
         <tr><td><strong>City:</strong></td><td>{city}</td></tr>\n\
         </table>\n\
         <h4>Action Required:</h4>\n\
         <ul>\n\
         <li>👉 Please contact the user and provide full details about the programme.</li>\n\
         <li>👉 Assist them with onboarding and next steps.</li>\n\
         </ul>\n\
         <p>Thank you,<br/>System Notification – Global Minds India</p>\n\
         </body></html>",
        name = escape_html(&user.name),
        phone = escape_or_dash(mobile),
        email = escape_html(&user.email),
        city = escape_or_dash(city),
    );

    OutboundEmail {
        subject,
        text,
        html,
        to: vec![settings.admin_recipient().to_string()],
        sender: Some(settings.admin_sender().to_string()),
        reply_to: settings.no_reply_email.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
