//! Email alert delivery via SMTP.
//!
//! [`SmtpMailer`] wraps the `lettre` blocking SMTP transport (STARTTLS
//! relay) and implements the [`Mailer`] port.  Credentials are loaded from
//! the environment; the non-secret settings come from
//! [`EmailSettings`](crate::config::EmailSettings).

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{info, warn};

use crate::app::alerts::AlertMessage;
use crate::app::ports::Mailer;
use crate::config::EmailSettings;
use crate::error::SinkError;

/// Environment variable holding the SMTP username.
pub const SMTP_USER_ENV: &str = "HEATWATCH_SMTP_USER";
/// Environment variable holding the SMTP password (an app password for Gmail).
pub const SMTP_PASSWORD_ENV: &str = "HEATWATCH_SMTP_PASSWORD";

/// SMTP login loaded from the environment.
#[derive(Clone)]
pub struct SmtpCredentials {
    pub user: String,
    pub password: String,
}

impl SmtpCredentials {
    /// Returns `None` unless both variables are set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            user: std::env::var(SMTP_USER_ENV).ok()?,
            password: std::env::var(SMTP_PASSWORD_ENV).ok()?,
        })
    }
}

impl core::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors raised while constructing the mailer.
#[derive(Debug)]
pub enum EmailSetupError {
    /// From or To is not a valid mailbox.
    Address(lettre::address::AddressError),
    /// The relay could not be configured.
    Transport(lettre::transport::smtp::Error),
}

impl core::fmt::Display for EmailSetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Address(e) => write!(f, "email address parse error: {e}"),
            Self::Transport(e) => write!(f, "SMTP transport error: {e}"),
        }
    }
}

impl std::error::Error for EmailSetupError {}

/// Sends alert emails through an SMTP relay.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        settings: &EmailSettings,
        credentials: Option<SmtpCredentials>,
    ) -> Result<Self, EmailSetupError> {
        let from: Mailbox = settings
            .from_address
            .parse()
            .map_err(EmailSetupError::Address)?;
        let to: Mailbox = settings
            .to_address
            .parse()
            .map_err(EmailSetupError::Address)?;

        let mut builder = SmtpTransport::starttls_relay(&settings.smtp_host)
            .map_err(EmailSetupError::Transport)?
            .port(settings.smtp_port);
        match credentials {
            Some(c) => builder = builder.credentials(Credentials::new(c.user, c.password)),
            None => warn!(
                "{} / {} not set, sending unauthenticated",
                SMTP_USER_ENV, SMTP_PASSWORD_ENV
            ),
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }

    /// Assemble the MIME message for `alert`.
    pub fn build_message(&self, alert: &AlertMessage) -> Result<Message, SinkError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(alert.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body.to_string())
            .map_err(|e| {
                warn!("Email build failed: {}", e);
                SinkError::Encode
            })
    }
}

impl Mailer for SmtpMailer {
    fn send(&mut self, alert: &AlertMessage) -> Result<(), SinkError> {
        let message = self.build_message(alert)?;
        self.transport.send(&message).map_err(|e| {
            warn!("Email '{}' not sent: {}", alert.subject, e);
            SinkError::Mail
        })?;
        info!("Email sent: {}", alert.subject);
        Ok(())
    }
}
