use std::sync::Arc;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    domain::{freshness, is_fresh_for_public, CheckpointAnnouncement, CheckpointStatus},
    error::{AppError, Result},
    integrations::{IntegrationEvent, IntegrationManager},
    repository::CheckpointRepository,
};

pub struct CheckpointService {
    repo: Arc<dyn CheckpointRepository>,
    integration_manager: Arc<IntegrationManager>,
}

impl CheckpointService {
    pub fn new(
        repo: Arc<dyn CheckpointRepository>,
        integration_manager: Arc<IntegrationManager>,
    ) -> Self {
        Self { repo, integration_manager }
    }

    /// Everything a site visitor should see right now: cancelled records
    /// are suppressed, confirmed records always show, pending records only
    /// while still fresh. One `now` covers the whole pass.
    pub async fn list_public(&self, now: DateTime<Utc>) -> Result<Vec<CheckpointAnnouncement>> {
        let checkpoints = self.repo.list().await?;

        Ok(checkpoints
            .into_iter()
            .filter(|c| Self::visible_to_public(c, now))
            .collect())
    }

    /// Single-record variant; a hidden record looks the same as a missing
    /// one so the public API does not leak cancelled or stale entries.
    pub async fn find_public(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<CheckpointAnnouncement>> {
        let checkpoint = self.repo.find_by_id(id).await?;
        Ok(checkpoint.filter(|c| Self::visible_to_public(c, now)))
    }

    fn visible_to_public(checkpoint: &CheckpointAnnouncement, now: DateTime<Utc>) -> bool {
        checkpoint.status != CheckpointStatus::Cancelled && is_fresh_for_public(checkpoint, now)
    }

    pub async fn list_all(&self) -> Result<Vec<CheckpointAnnouncement>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<CheckpointAnnouncement>> {
        self.repo.find_by_id(id).await
    }

    pub async fn create(&self, announcement: CheckpointAnnouncement) -> Result<CheckpointAnnouncement> {
        if let Some(event_date) = announcement.event_date.as_deref() {
            // Accepted as-is (upstream sources are messy), but flag it so
            // an admin typo doesn't silently hide the record from the list.
            if freshness::parse_event_date(event_date).is_none() {
                tracing::warn!(
                    event_date,
                    "Checkpoint event_date is not YYYY-MM-DD; it will be ignored by the visibility filter"
                );
            }
        }

        self.repo.create(announcement).await
    }

    pub async fn update(&self, id: Uuid, announcement: CheckpointAnnouncement) -> Result<CheckpointAnnouncement> {
        self.repo.update(id, announcement).await
    }

    pub async fn confirm(&self, id: Uuid) -> Result<CheckpointAnnouncement> {
        let mut checkpoint = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Checkpoint not found".to_string()))?;

        if checkpoint.status == CheckpointStatus::Confirmed {
            return Ok(checkpoint);
        }

        checkpoint.status = CheckpointStatus::Confirmed;
        let updated = self.repo.update(id, checkpoint).await?;

        // Notify integrations
        self.integration_manager
            .handle_event(IntegrationEvent::CheckpointConfirmed(updated.clone()))
            .await;

        Ok(updated)
    }

    pub async fn cancel(&self, id: Uuid) -> Result<CheckpointAnnouncement> {
        let mut checkpoint = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Checkpoint not found".to_string()))?;

        checkpoint.status = CheckpointStatus::Cancelled;
        self.repo.update(id, checkpoint).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let _checkpoint = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Checkpoint not found".to_string()))?;

        self.repo.delete(id).await
    }
}
