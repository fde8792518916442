use std::sync::Arc;

use crate::{
    domain::{CreateLeadRequest, Lead},
    error::Result,
    integrations::{IntegrationEvent, IntegrationManager},
    repository::LeadRepository,
};

pub struct IntakeService {
    repo: Arc<dyn LeadRepository>,
    integration_manager: Arc<IntegrationManager>,
}

impl IntakeService {
    pub fn new(
        repo: Arc<dyn LeadRepository>,
        integration_manager: Arc<IntegrationManager>,
    ) -> Self {
        Self { repo, integration_manager }
    }

    /// Persists the lead, then fans the event out to integrations (firm
    /// notification, visitor confirmation, webhook). The write is the only
    /// fallible step; notification failures are logged inside the manager
    /// and never bubble back to the visitor.
    pub async fn submit(&self, request: CreateLeadRequest) -> Result<Lead> {
        let lead = self.repo.create(request).await?;

        tracing::info!(
            lead_id = %lead.id,
            channel = ?lead.channel,
            "New lead received"
        );

        self.integration_manager
            .handle_event(IntegrationEvent::LeadReceived(lead.clone()))
            .await;

        Ok(lead)
    }
}
