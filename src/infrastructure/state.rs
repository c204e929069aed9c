//! Shared application state

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use crate::application::ports::outbound::{CampaignRepositoryPort, ContentCatalogPort};
use crate::application::services::{
    CampaignServiceImpl, ExpeditionServiceImpl, ProgressServiceImpl, RosterServiceImpl,
    StageServiceImpl,
};
use crate::infrastructure::catalog::StaticCatalog;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::InMemoryCampaignRepository;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<dyn ContentCatalogPort>,
    // Application services
    pub campaign_service: CampaignServiceImpl,
    pub roster_service: RosterServiceImpl,
    pub progress_service: ProgressServiceImpl,
    pub stage_service: StageServiceImpl,
    pub expedition_service: ExpeditionServiceImpl,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let repository: Arc<dyn CampaignRepositoryPort> =
            Arc::new(InMemoryCampaignRepository::new());

        let catalog: Arc<dyn ContentCatalogPort> = if Path::new(&config.catalog_path).exists() {
            Arc::new(StaticCatalog::from_path(&config.catalog_path)?)
        } else {
            warn!(
                path = %config.catalog_path,
                "Content catalog not found; starting with an empty catalog"
            );
            Arc::new(StaticCatalog::from_definitions(Vec::new()))
        };

        Ok(Self {
            campaign_service: CampaignServiceImpl::new(repository.clone()),
            roster_service: RosterServiceImpl::new(repository.clone()),
            progress_service: ProgressServiceImpl::new(repository.clone(), catalog.clone()),
            stage_service: StageServiceImpl::new(repository.clone(), catalog.clone()),
            expedition_service: ExpeditionServiceImpl::new(repository, catalog.clone()),
            catalog,
            config,
        })
    }
}
