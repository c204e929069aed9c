//! Campaign Service - Application service for campaign lifecycle
//!
//! Use cases for creating, listing, updating, and deleting campaigns. The
//! roster, ledger, and expedition services all operate on campaigns this
//! service owns.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::CampaignRepositoryPort;
use crate::domain::aggregates::Campaign;
use crate::domain::value_objects::{CampaignId, CampaignSettings};

/// Request to create a new campaign
#[derive(Debug, Clone)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub settings: CampaignSettings,
}

/// Request to update an existing campaign
#[derive(Debug, Clone, Default)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub settings: Option<CampaignSettings>,
}

/// Campaign service trait defining the application use cases
#[async_trait]
pub trait CampaignService: Send + Sync {
    /// Create a new campaign
    async fn create_campaign(&self, request: CreateCampaignRequest) -> Result<Campaign>;

    /// Get a campaign by ID
    async fn get_campaign(&self, id: CampaignId) -> Result<Option<Campaign>>;

    /// List all campaigns
    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;

    /// Update a campaign's name and/or settings.
    ///
    /// A missing campaign is a no-op and returns `None`.
    async fn update_campaign(
        &self,
        id: CampaignId,
        request: UpdateCampaignRequest,
    ) -> Result<Option<Campaign>>;

    /// Delete a campaign and everything it owns
    async fn delete_campaign(&self, id: CampaignId) -> Result<()>;
}

/// Default implementation of CampaignService
pub struct CampaignServiceImpl {
    repository: Arc<dyn CampaignRepositoryPort>,
}

impl CampaignServiceImpl {
    pub fn new(repository: Arc<dyn CampaignRepositoryPort>) -> Self {
        Self { repository }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Campaign name cannot be empty");
        }
        if name.len() > 255 {
            anyhow::bail!("Campaign name cannot exceed 255 characters");
        }
        Ok(())
    }

    fn validate_settings(settings: &CampaignSettings) -> Result<()> {
        if settings.notes.len() > 10000 {
            anyhow::bail!("Campaign notes cannot exceed 10000 characters");
        }
        Ok(())
    }
}

#[async_trait]
impl CampaignService for CampaignServiceImpl {
    #[instrument(skip(self), fields(name = %request.name))]
    async fn create_campaign(&self, request: CreateCampaignRequest) -> Result<Campaign> {
        Self::validate_name(&request.name)?;
        Self::validate_settings(&request.settings)?;

        let campaign = Campaign::new(&request.name, request.settings);
        self.repository
            .create(&campaign)
            .await
            .context("Failed to create campaign in repository")?;

        info!(campaign_id = %campaign.id, "Created campaign: {}", campaign.name);
        Ok(campaign)
    }

    #[instrument(skip(self))]
    async fn get_campaign(&self, id: CampaignId) -> Result<Option<Campaign>> {
        debug!(campaign_id = %id, "Fetching campaign");
        self.repository
            .get(id)
            .await
            .context("Failed to get campaign from repository")
    }

    #[instrument(skip(self))]
    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.repository
            .list()
            .await
            .context("Failed to list campaigns from repository")
    }

    #[instrument(skip(self), fields(campaign_id = %id))]
    async fn update_campaign(
        &self,
        id: CampaignId,
        request: UpdateCampaignRequest,
    ) -> Result<Option<Campaign>> {
        if let Some(ref name) = request.name {
            Self::validate_name(name)?;
        }
        if let Some(ref settings) = request.settings {
            Self::validate_settings(settings)?;
        }

        let Some(mut campaign) = self.repository.get(id).await? else {
            debug!(campaign_id = %id, "Update on unknown campaign ignored");
            return Ok(None);
        };

        if let Some(name) = request.name {
            campaign.name = name;
        }
        if let Some(settings) = request.settings {
            campaign.settings = settings;
        }
        campaign.updated_at = chrono::Utc::now();

        self.repository
            .update(&campaign)
            .await
            .context("Failed to update campaign in repository")?;

        info!(campaign_id = %id, "Updated campaign: {}", campaign.name);
        Ok(Some(campaign))
    }

    #[instrument(skip(self))]
    async fn delete_campaign(&self, id: CampaignId) -> Result<()> {
        self.repository
            .delete(id)
            .await
            .context("Failed to delete campaign from repository")?;
        info!(campaign_id = %id, "Deleted campaign");
        Ok(())
    }
}
