use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::Notifier;

/// Posts notifications as JSON to an HTTP endpoint (mail relay, chat hook).
pub struct WebhookNotifier {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl WebhookNotifier {
    pub fn new(url: String, token: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build notification HTTP client")?;
        Ok(Self { url, token, client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let payload = json!({
            "to": to,
            "subject": subject,
            "body": body,
        });

        let mut req = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        req.send()
            .await
            .context("failed to call notification webhook")?
            .error_for_status()
            .context("notification webhook returned error")?;

        Ok(())
    }
}
