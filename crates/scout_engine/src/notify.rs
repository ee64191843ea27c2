use std::sync::Arc;

use scout_logging::{scout_debug, scout_info};
use thiserror::Error;

use scout_core::{render_digest, RunConfig, ValidUrl};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail delivery failed: {0}")]
    Delivery(String),
    #[error("mail endpoint answered http status {0}")]
    Endpoint(u16),
}

/// Email collaborator boundary.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError>;
}

/// Delivers mail by POSTing a JSON payload to an HTTP delivery endpoint.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| MailError::Delivery(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl Mailer for HttpMailer {
    async fn send_email(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        let payload = serde_json::json!({
            "from": from,
            "to": to,
            "subject": subject,
            "body": body,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| MailError::Delivery(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Endpoint(status.as_u16()));
        }
        Ok(())
    }
}

/// Injected wall-clock source; the app supplies chrono, tests a fixed value.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

/// Orders notification before state advancement: the caller may persist
/// state only after `notify_if_new` returns `Ok`.
pub struct NotifyGate {
    mailer: Arc<dyn Mailer>,
    now_utc: Clock,
}

impl NotifyGate {
    pub fn new(mailer: Arc<dyn Mailer>, now_utc: Clock) -> Self {
        Self { mailer, now_utc }
    }

    /// Sends one digest email covering every newly valid URL; a trivial
    /// success when there is nothing new.
    pub async fn notify_if_new(
        &self,
        config: &RunConfig,
        new_valid: &[ValidUrl],
    ) -> Result<(), MailError> {
        if new_valid.is_empty() {
            scout_debug!("No new valid URLs, skipping notification.");
            return Ok(());
        }

        let body = render_digest(new_valid, &(self.now_utc)());
        scout_info!(
            "Notifying {} about {} new valid URLs.",
            config.to_email,
            new_valid.len()
        );
        self.mailer
            .send_email(
                &config.from_email,
                &config.to_email,
                &config.email_subject,
                &body,
            )
            .await
    }
}
