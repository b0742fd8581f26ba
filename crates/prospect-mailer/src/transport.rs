//! Outbound mail delivery.

use std::time::Duration;

use async_trait::async_trait;
use prospect_core::{MailCredentials, Throttle};
use reqwest::Client;
use serde::Deserialize;

use crate::error::MailError;

/// Minimum spacing between two consecutive sends.
pub const SEND_SPACING: Duration = Duration::from_secs(2);

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers one plain-text message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] when the message could not be handed off.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

#[derive(Debug, Deserialize)]
struct MailgunResponse {
    #[serde(default)]
    id: Option<String>,
}

/// [`MailTransport`] over the Mailgun messages API.
pub struct MailgunTransport {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
    throttle: Throttle,
}

impl MailgunTransport {
    /// Builds a transport that sends as `"{from_name} <{from_address}>"`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: &MailCredentials, from_name: &str) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let endpoint = format!(
            "{}/{}/messages",
            credentials.base_url.trim_end_matches('/'),
            credentials.domain
        );
        Ok(Self {
            client,
            endpoint,
            api_key: credentials.api_key.clone(),
            from: format!("{from_name} <{}>", credentials.from_address),
            throttle: Throttle::new(SEND_SPACING),
        })
    }

    #[must_use]
    pub fn with_send_spacing(mut self, spacing: Duration) -> Self {
        self.throttle = Throttle::new(spacing);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MailTransport for MailgunTransport {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.throttle.wait().await;

        let form = [
            ("from", self.from.as_str()),
            ("to", to),
            ("subject", subject),
            ("text", body),
        ];
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let id = serde_json::from_str::<MailgunResponse>(&text)
            .ok()
            .and_then(|r| r.id);
        tracing::debug!(to, id = id.as_deref().unwrap_or("-"), "message accepted");
        Ok(())
    }
}
