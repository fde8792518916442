pub mod checkpoint_service;
pub mod intake_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::integrations::IntegrationManager;
use crate::repository::*;
use checkpoint_service::CheckpointService;
use intake_service::IntakeService;

pub struct ServiceContext {
    pub checkpoint_repo: Arc<dyn CheckpointRepository>,
    pub lead_repo: Arc<dyn LeadRepository>,
    pub integration_manager: Arc<IntegrationManager>,
    pub checkpoint_service: Arc<CheckpointService>,
    pub intake_service: Arc<IntakeService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        checkpoint_repo: Arc<dyn CheckpointRepository>,
        lead_repo: Arc<dyn LeadRepository>,
        integration_manager: Arc<IntegrationManager>,
        db_pool: SqlitePool,
    ) -> Self {
        let checkpoint_service = Arc::new(CheckpointService::new(
            checkpoint_repo.clone(),
            integration_manager.clone(),
        ));
        let intake_service = Arc::new(IntakeService::new(
            lead_repo.clone(),
            integration_manager.clone(),
        ));

        Self {
            checkpoint_repo,
            lead_repo,
            integration_manager,
            checkpoint_service,
            intake_service,
            db_pool,
        }
    }
}
