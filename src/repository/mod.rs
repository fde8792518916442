use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod checkpoint_repository;
pub mod lead_repository;

pub use checkpoint_repository::SqliteCheckpointRepository;
pub use lead_repository::SqliteLeadRepository;

#[async_trait]
pub trait CheckpointRepository: Send + Sync {
    async fn create(&self, announcement: CheckpointAnnouncement) -> Result<CheckpointAnnouncement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CheckpointAnnouncement>>;
    /// Every record, newest first. Filtering for public display happens
    /// in the service layer.
    async fn list(&self) -> Result<Vec<CheckpointAnnouncement>>;
    async fn list_by_status(&self, status: CheckpointStatus) -> Result<Vec<CheckpointAnnouncement>>;
    async fn update(&self, id: Uuid, announcement: CheckpointAnnouncement) -> Result<CheckpointAnnouncement>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create(&self, request: CreateLeadRequest) -> Result<Lead>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lead>>;
    async fn list_by_status(&self, status: LeadStatus) -> Result<Vec<Lead>>;
    async fn update_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}
