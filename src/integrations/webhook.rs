use async_trait::async_trait;
use serde_json::json;

use crate::{
    config::WebhookConfig,
    error::{AppError, Result},
    integrations::{Integration, IntegrationEvent},
};

/// Posts intake and checkpoint events as JSON to a configured URL, so the
/// firm's case-management tooling can pick them up without polling.
pub struct WebhookIntegration {
    config: WebhookConfig,
    client: reqwest::Client,
}

impl WebhookIntegration {
    pub fn new(config: Option<WebhookConfig>) -> Option<Self> {
        config.filter(|cfg| cfg.enabled).map(|config| Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    async fn post(&self, payload: serde_json::Value) -> Result<()> {
        let response = self
            .client
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::External(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::External(format!(
                "Webhook returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Integration for WebhookIntegration {
    fn name(&self) -> &str {
        "Webhook"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    async fn health_check(&self) -> Result<()> {
        if self.config.url.is_empty() {
            return Err(AppError::Integration("Webhook URL not configured".to_string()));
        }
        Ok(())
    }

    async fn handle_event(&self, event: &IntegrationEvent) -> Result<()> {
        let payload = match event {
            IntegrationEvent::LeadReceived(lead) => json!({
                "event": "lead.received",
                "lead": lead,
            }),
            IntegrationEvent::CheckpointConfirmed(checkpoint) => json!({
                "event": "checkpoint.confirmed",
                "checkpoint": checkpoint,
            }),
        };

        self.post(payload).await
    }
}
