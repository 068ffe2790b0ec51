//! SMTP delivery through `lettre`.
//!
//! Mail is optional: without `SMTP_HOST` there is no [`EmailConfig`] and the
//! API runs without a mailer.

use lettre::message::header::ContentType;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::templates::{self, RenderedEmail};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// Connection, TLS, or authentication failure.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

/// STARTTLS submission port.
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@nextcar.local";

/// SMTP settings.
///
/// | Variable        | Required | Default                  |
/// |-----------------|----------|--------------------------|
/// | `SMTP_HOST`     | yes      |                          |
/// | `SMTP_PORT`     | no       | `587`                    |
/// | `SMTP_FROM`     | no       | `noreply@nextcar.local`  |
/// | `SMTP_USER`     | no       |                          |
/// | `SMTP_PASSWORD` | no       |                          |
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Sender shown to recipients.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// `None` when `SMTP_HOST` is unset or blank.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. An unparseable port falls back to
    /// the default.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let smtp_host = var("SMTP_HOST").filter(|host| !host.trim().is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: var("SMTP_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: var("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: var("SMTP_USER"),
            smtp_password: var("SMTP_PASSWORD"),
        })
    }
}

/// Sends transactional mail over one reusable SMTP transport.
pub struct EmailDelivery {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    /// Prepare the transport. No connection is opened until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let (Some(user), Some(password)) = (config.smtp_user, config.smtp_password) {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(Self {
            from_address: config.from_address,
            transport: builder.build(),
        })
    }

    /// Mail a reset link that expires after `ttl_mins`.
    pub async fn send_password_reset(
        &self,
        to_email: &str,
        reset_url: &str,
        ttl_mins: i64,
    ) -> Result<(), EmailError> {
        let message = build_message(
            &self.from_address,
            to_email,
            templates::password_reset(reset_url, ttl_mins),
        )?;
        self.transport.send(message).await?;
        tracing::info!(to = to_email, "password reset email sent");
        Ok(())
    }
}

/// `multipart/alternative` with the text part first.
fn build_message(from: &str, to: &str, rendered: RenderedEmail) -> Result<Message, EmailError> {
    let body = MultiPart::alternative()
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(rendered.text),
        )
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(rendered.html),
        );

    Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .subject(rendered.subject)
        .multipart(body)
        .map_err(|e| EmailError::Build(e.to_string()))
}
