use axum::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Out-of-band delivery channel for verification codes.
///
/// Delivery is best-effort: callers must treat a `NotifyError` as non-fatal
/// to their own operation.
#[async_trait]
pub trait CodeNotifier: Send + Sync {
    async fn send_code(&self, to: &str, code: &str) -> Result<(), NotifyError>;
}

/// SMTP notifier backed by lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
    from_header: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            credentials: Credentials::new(config.username.clone(), config.password.clone()),
            from_header: format!("{} <{}>", config.from_name, config.from_address),
        }
    }

    // Fresh transport per send; sends are rare enough that a pooled
    // connection would go stale between them.
    fn build_transport(&self) -> Result<SmtpTransport, NotifyError> {
        Ok(SmtpTransport::relay(&self.host)
            .map_err(|e| NotifyError::Delivery(format!("smtp relay: {e}")))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }
}

#[async_trait]
impl CodeNotifier for SmtpMailer {
    async fn send_code(&self, to: &str, code: &str) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(
                self.from_header
                    .parse()
                    .map_err(|e| NotifyError::Delivery(format!("invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| NotifyError::Delivery(format!("invalid to address: {e}")))?)
            .subject("Your verification code")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Hello, your verification code is: {code}. It expires in 10 minutes."
            ))
            .map_err(|e| NotifyError::Delivery(format!("build message: {e}")))?;

        let mailer = self.build_transport()?;
        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map(|_| ())
                .map_err(|e| NotifyError::Delivery(format!("send: {e}")))
        })
        .await
        .map_err(|e| NotifyError::Delivery(format!("send task: {e}")))?
    }
}
