//! Roster Service - Application service for party composition
//!
//! Implements the roster operations over the campaign aggregate: joining
//! active or benched, slot replacement, bench toggling, removal, and party
//! leadership. The aggregate enforces the invariants; this service loads,
//! mutates, and stores.
//!
//! Operations on an unknown campaign are deliberate no-ops: UI state may
//! transiently reference a just-deleted campaign, and a best-effort
//! mutation policy keeps that from surfacing as a failure.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::CampaignRepositoryPort;
use crate::domain::aggregates::{AddActiveOutcome, Campaign, MemberMeta};
use crate::domain::value_objects::{CampaignId, CharacterId, TemplateId};

/// Roster service trait defining the party-composition use cases
#[async_trait]
pub trait RosterService: Send + Sync {
    /// Activate a character in the campaign party.
    ///
    /// Returns `None` when the campaign does not exist; `Conflict` (with no
    /// mutation performed) when another active member holds the template
    /// slot.
    async fn add_active(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        meta: MemberMeta,
    ) -> Result<Option<AddActiveOutcome>>;

    /// Idempotently ensure a benched membership exists
    async fn add_benched(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        meta: MemberMeta,
    ) -> Result<()>;

    /// Atomically swap the active holder of a template slot
    async fn replace_active(
        &self,
        campaign_id: CampaignId,
        template_id: TemplateId,
        new_character_id: CharacterId,
        meta: MemberMeta,
    ) -> Result<()>;

    /// Bench or re-activate a member
    async fn set_bench_state(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        benched: bool,
    ) -> Result<()>;

    /// Delete a membership record
    async fn remove(&self, campaign_id: CampaignId, character_id: CharacterId) -> Result<()>;

    /// Make a character the exclusive party leader
    async fn set_leader(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        meta: Option<MemberMeta>,
    ) -> Result<()>;

    /// Clear the leader pointer and all leader flags
    async fn clear_leader(&self, campaign_id: CampaignId) -> Result<()>;
}

/// Default implementation of RosterService
pub struct RosterServiceImpl {
    repository: Arc<dyn CampaignRepositoryPort>,
}

impl RosterServiceImpl {
    pub fn new(repository: Arc<dyn CampaignRepositoryPort>) -> Self {
        Self { repository }
    }

    async fn load(&self, campaign_id: CampaignId) -> Result<Option<Campaign>> {
        let campaign = self
            .repository
            .get(campaign_id)
            .await
            .context("Failed to get campaign from repository")?;
        if campaign.is_none() {
            debug!(campaign_id = %campaign_id, "Roster operation on unknown campaign ignored");
        }
        Ok(campaign)
    }

    async fn store(&self, campaign: &Campaign) -> Result<()> {
        self.repository
            .update(campaign)
            .await
            .context("Failed to update campaign in repository")
    }
}

#[async_trait]
impl RosterService for RosterServiceImpl {
    #[instrument(skip(self, meta), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn add_active(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        meta: MemberMeta,
    ) -> Result<Option<AddActiveOutcome>> {
        let Some(mut campaign) = self.load(campaign_id).await? else {
            return Ok(None);
        };

        let outcome = campaign.add_active(character_id.clone(), meta);
        match &outcome {
            AddActiveOutcome::Activated => {
                self.store(&campaign).await?;
                info!(character_id = %character_id, "Activated member in campaign");
            }
            AddActiveOutcome::Conflict { existing } => {
                // No mutation happened; nothing to store
                debug!(
                    character_id = %character_id,
                    existing = %existing,
                    "Active template slot already taken"
                );
            }
        }
        Ok(Some(outcome))
    }

    #[instrument(skip(self, meta), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn add_benched(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        meta: MemberMeta,
    ) -> Result<()> {
        let Some(mut campaign) = self.load(campaign_id).await? else {
            return Ok(());
        };
        campaign.add_benched(character_id.clone(), meta);
        self.store(&campaign).await?;
        debug!(character_id = %character_id, "Benched membership ensured");
        Ok(())
    }

    #[instrument(skip(self, meta), fields(campaign_id = %campaign_id, template_id = %template_id))]
    async fn replace_active(
        &self,
        campaign_id: CampaignId,
        template_id: TemplateId,
        new_character_id: CharacterId,
        meta: MemberMeta,
    ) -> Result<()> {
        let Some(mut campaign) = self.load(campaign_id).await? else {
            return Ok(());
        };
        campaign.replace_active(&template_id, new_character_id.clone(), meta);
        self.store(&campaign).await?;
        info!(
            template_id = %template_id,
            incoming = %new_character_id,
            "Replaced active holder of template slot"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn set_bench_state(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        benched: bool,
    ) -> Result<()> {
        let Some(mut campaign) = self.load(campaign_id).await? else {
            return Ok(());
        };
        campaign.set_bench_state(&character_id, benched);
        self.store(&campaign).await?;
        debug!(character_id = %character_id, benched, "Set bench state");
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn remove(&self, campaign_id: CampaignId, character_id: CharacterId) -> Result<()> {
        let Some(mut campaign) = self.load(campaign_id).await? else {
            return Ok(());
        };
        campaign.remove_member(&character_id);
        self.store(&campaign).await?;
        info!(character_id = %character_id, "Removed member from campaign");
        Ok(())
    }

    #[instrument(skip(self, meta), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn set_leader(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        meta: Option<MemberMeta>,
    ) -> Result<()> {
        let Some(mut campaign) = self.load(campaign_id).await? else {
            return Ok(());
        };
        campaign.set_leader(character_id.clone(), meta);
        self.store(&campaign).await?;
        info!(character_id = %character_id, "Set party leader");
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    async fn clear_leader(&self, campaign_id: CampaignId) -> Result<()> {
        let Some(mut campaign) = self.load(campaign_id).await? else {
            return Ok(());
        };
        campaign.clear_leader();
        self.store(&campaign).await?;
        debug!("Cleared party leader");
        Ok(())
    }
}
