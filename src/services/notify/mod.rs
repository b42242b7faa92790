pub mod webhook;

use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Used when no delivery channel is configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        tracing::warn!(to, subject, "notifications not configured, skipping");
        Ok(())
    }
}
