use async_trait::async_trait;

use crate::{
    config::EmailConfig,
    domain::Lead,
    email::{recommend_helpful_links, templates, LinkRequest, Mailer},
    error::{AppError, Result},
    integrations::{Integration, IntegrationEvent},
};

/// Sends the two intake emails: a notification to the firm's intake
/// address and, when the visitor left an email, a confirmation with
/// contextually matched resource links.
pub struct EmailIntegration {
    config: EmailConfig,
    mailer: Mailer,
    site_url: String,
}

impl EmailIntegration {
    pub fn new(config: Option<EmailConfig>, site_url: String) -> Option<Self> {
        let config = config.filter(|cfg| cfg.enabled)?;
        match Mailer::new(&config) {
            Ok(mailer) => Some(Self {
                config,
                mailer,
                site_url,
            }),
            Err(e) => {
                tracing::warn!("Email integration disabled: {:?}", e);
                None
            }
        }
    }

    async fn notify_firm(&self, lead: &Lead) -> Result<()> {
        self.mailer
            .send(
                &self.config.intake_address,
                &templates::notification_subject(lead),
                templates::notification_text(lead),
                templates::notification_html(lead),
            )
            .await
    }

    async fn confirm_to_visitor(&self, lead: &Lead) -> Result<()> {
        let Some(visitor_email) = lead.email.as_deref() else {
            return Ok(());
        };

        let links = recommend_helpful_links(&LinkRequest {
            site_url: &self.site_url,
            message: Some(&lead.message),
            lead_source: lead.lead_source.as_deref(),
            checkpoint_id: lead.checkpoint_id.as_deref(),
            case_type: lead.case_type.as_deref(),
            urgency: lead.urgency.as_deref(),
            county: lead.county.as_deref(),
        });

        tracing::debug!(
            lead_id = %lead.id,
            link_count = links.len(),
            "Sending intake confirmation"
        );

        self.mailer
            .send(
                visitor_email,
                &templates::confirmation_subject(),
                templates::confirmation_text(&lead.name, &links),
                templates::confirmation_html(&lead.name, &links),
            )
            .await
    }
}

#[async_trait]
impl Integration for EmailIntegration {
    fn name(&self) -> &str {
        "Email"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    async fn health_check(&self) -> Result<()> {
        if self.config.smtp_host.is_empty() {
            return Err(AppError::Integration("SMTP host not configured".to_string()));
        }
        if self.config.intake_address.is_empty() {
            return Err(AppError::Integration(
                "Intake notification address not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn handle_event(&self, event: &IntegrationEvent) -> Result<()> {
        match event {
            IntegrationEvent::LeadReceived(lead) => {
                self.notify_firm(lead).await?;
                self.confirm_to_visitor(lead).await?;
                Ok(())
            }
            // Checkpoint confirmations go out over the webhook, not email.
            IntegrationEvent::CheckpointConfirmed(_) => Ok(()),
        }
    }
}
