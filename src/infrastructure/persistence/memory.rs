//! In-memory campaign store
//!
//! Campaigns are held in a map behind an async RwLock. Mutations are
//! copy-on-write: services read a clone, modify it, and replace the record
//! via `update`, so readers never observe a half-applied change.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::application::ports::outbound::CampaignRepositoryPort;
use crate::domain::aggregates::Campaign;
use crate::domain::value_objects::CampaignId;

pub struct InMemoryCampaignRepository {
    campaigns: RwLock<HashMap<CampaignId, Campaign>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self {
            campaigns: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCampaignRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CampaignRepositoryPort for InMemoryCampaignRepository {
    async fn create(&self, campaign: &Campaign) -> Result<()> {
        let mut campaigns = self.campaigns.write().await;
        campaigns.insert(campaign.id, campaign.clone());
        Ok(())
    }

    async fn get(&self, id: CampaignId) -> Result<Option<Campaign>> {
        let campaigns = self.campaigns.read().await;
        Ok(campaigns.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Campaign>> {
        let campaigns = self.campaigns.read().await;
        let mut all: Vec<Campaign> = campaigns.values().cloned().collect();
        all.sort_by_key(|c| c.created_at);
        Ok(all)
    }

    async fn update(&self, campaign: &Campaign) -> Result<()> {
        let mut campaigns = self.campaigns.write().await;
        campaigns.insert(campaign.id, campaign.clone());
        Ok(())
    }

    async fn delete(&self, id: CampaignId) -> Result<()> {
        let mut campaigns = self.campaigns.write().await;
        if campaigns.remove(&id).is_none() {
            debug!(campaign_id = %id, "Delete of unknown campaign ignored");
        }
        Ok(())
    }
}
