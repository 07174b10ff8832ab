use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::Mailer;
use crate::infrastructure::config::SmtpConfig;

/// SMTP mailer for account mail (verification and password-reset links).
///
/// The transport is synchronous, so sends run on the blocking pool.
pub struct SmtpMailer {
  transport: SmtpTransport,
  from: Mailbox,
}

impl SmtpMailer {
  pub fn new(config: &SmtpConfig) -> Result<Self, AuthError> {
    let from: Mailbox = config
      .from_address
      .parse()
      .map_err(|_| AuthError::Mail("Invalid From address in SMTP settings".to_string()))?;

    let mut builder = if config.use_tls {
      SmtpTransport::relay(&config.host)
        .map_err(|e| AuthError::Mail(format!("Invalid SMTP host: {}", e)))?
        .port(config.port)
    } else {
      SmtpTransport::builder_dangerous(&config.host).port(config.port)
    };

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
      builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
    }

    Ok(Self {
      transport: builder.build(),
      from,
    })
  }

  async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), AuthError> {
    let to_mailbox: Mailbox = to
      .parse()
      .map_err(|_| AuthError::Mail(format!("Invalid recipient address: {}", to)))?;

    let email = Message::builder()
      .from(self.from.clone())
      .to(to_mailbox)
      .subject(subject)
      .body(body)
      .map_err(|e| AuthError::Mail(format!("Failed to build email: {}", e)))?;

    let transport = self.transport.clone();
    tokio::task::spawn_blocking(move || transport.send(&email))
      .await
      .map_err(|e| AuthError::Mail(format!("Email task failed: {}", e)))?
      .map_err(|e| {
        tracing::error!(error = %e, "Email send failed");
        AuthError::Mail(format!("Failed to send email: {}", e))
      })?;

    Ok(())
  }
}

#[async_trait]
impl Mailer for SmtpMailer {
  async fn send_email_verification(&self, to: &str, url: &str) -> Result<(), AuthError> {
    self
      .send(
        to,
        "Verify Email",
        format!("Click the link below to verify your email.\n{}", url),
      )
      .await
  }

  async fn send_password_reset(&self, to: &str, url: &str) -> Result<(), AuthError> {
    self
      .send(
        to,
        "Reset Password",
        format!(
          "You have requested to reset your password. \
           Click the link below to reset your password.\n{}",
          url
        ),
      )
      .await
  }
}
