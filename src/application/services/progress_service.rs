//! Progress Service - Application service for the completion ledger
//!
//! Tracks per-kingdom completion counters and merges them with catalog
//! definitions into the views the UI lists. Single-attempt content floors
//! at "attempted once"; repeatable content accumulates without bound.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{CampaignRepositoryPort, ContentCatalogPort};
use crate::domain::value_objects::{
    is_single_attempt_completed, AdventureDef, CampaignId, CharacterId, ContentId, ContractDef,
    KingdomId,
};

/// An adventure definition merged with live progress
#[derive(Debug, Clone)]
pub struct AdventureView {
    pub id: ContentId,
    pub definition: AdventureDef,
    pub completed_count: u32,
    pub completed: bool,
}

/// A contract definition merged with live progress
#[derive(Debug, Clone)]
pub struct ContractView {
    pub id: ContentId,
    pub definition: ContractDef,
    pub completed_count: u32,
    pub completed: bool,
}

/// Progress ledger trait defining the completion-tracking use cases
#[async_trait]
pub trait ProgressService: Send + Sync {
    /// Mark a single-attempt content unit as attempted at least once.
    ///
    /// Idempotent; never decreases a count a repeatable delta already
    /// raised.
    async fn record_single_attempt(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        content_id: ContentId,
    ) -> Result<()>;

    /// Add a positive delta to a repeatable content unit's count
    async fn increment_by_delta(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        content_id: ContentId,
        delta: u32,
    ) -> Result<()>;

    /// Move a member to the next chapter, resetting per-chapter state
    async fn advance_member_chapter(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
    ) -> Result<()>;

    /// Current count for a content unit, 0 when absent or campaign unknown
    async fn read_count(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        content_id: ContentId,
    ) -> Result<u32>;

    /// Catalog adventures merged with the campaign's ledger
    async fn adventure_views(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
    ) -> Result<Vec<AdventureView>>;

    /// Catalog contracts merged with the campaign's ledger
    async fn contract_views(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
    ) -> Result<Vec<ContractView>>;
}

/// Default implementation of ProgressService
pub struct ProgressServiceImpl {
    repository: Arc<dyn CampaignRepositoryPort>,
    catalog: Arc<dyn ContentCatalogPort>,
}

impl ProgressServiceImpl {
    pub fn new(
        repository: Arc<dyn CampaignRepositoryPort>,
        catalog: Arc<dyn ContentCatalogPort>,
    ) -> Self {
        Self {
            repository,
            catalog,
        }
    }
}

#[async_trait]
impl ProgressService for ProgressServiceImpl {
    #[instrument(skip(self), fields(campaign_id = %campaign_id, content_id = %content_id))]
    async fn record_single_attempt(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        content_id: ContentId,
    ) -> Result<()> {
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            debug!("Ledger write on unknown campaign ignored");
            return Ok(());
        };

        campaign
            .kingdom_progress_mut(&kingdom_id)
            .record_single_attempt(content_id.clone());
        self.repository
            .update(&campaign)
            .await
            .context("Failed to update campaign ledger")?;

        info!(kingdom_id = %kingdom_id, "Recorded single attempt");
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, content_id = %content_id, delta))]
    async fn increment_by_delta(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        content_id: ContentId,
        delta: u32,
    ) -> Result<()> {
        if delta == 0 {
            anyhow::bail!("Progress delta must be positive");
        }

        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            debug!("Ledger write on unknown campaign ignored");
            return Ok(());
        };

        campaign
            .kingdom_progress_mut(&kingdom_id)
            .add_delta(content_id.clone(), delta);
        self.repository
            .update(&campaign)
            .await
            .context("Failed to update campaign ledger")?;

        info!(kingdom_id = %kingdom_id, delta, "Incremented completion count");
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn advance_member_chapter(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
    ) -> Result<()> {
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            debug!("Chapter advance on unknown campaign ignored");
            return Ok(());
        };
        let Some(member) = campaign.member_mut(&character_id) else {
            debug!("Chapter advance for unknown member ignored");
            return Ok(());
        };

        member.progress.advance_chapter();
        let chapter = member.progress.chapter;
        self.repository
            .update(&campaign)
            .await
            .context("Failed to update campaign ledger")?;

        info!(chapter, "Advanced member to next chapter");
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, content_id = %content_id))]
    async fn read_count(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        content_id: ContentId,
    ) -> Result<u32> {
        let Some(campaign) = self.repository.get(campaign_id).await? else {
            return Ok(0);
        };
        Ok(campaign
            .kingdom_progress(&kingdom_id)
            .map(|progress| progress.count(&content_id))
            .unwrap_or(0))
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, kingdom_id = %kingdom_id))]
    async fn adventure_views(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
    ) -> Result<Vec<AdventureView>> {
        let Some(kingdom) = self.catalog.kingdom(&kingdom_id) else {
            return Ok(Vec::new());
        };
        let campaign = self.repository.get(campaign_id).await?;
        let ledger = campaign
            .as_ref()
            .and_then(|c| c.kingdom_progress(&kingdom_id));

        Ok(kingdom
            .adventures
            .iter()
            .map(|def| {
                let id = def.content_id(&kingdom_id);
                let count = ledger.map(|l| l.count(&id)).unwrap_or(0);
                AdventureView {
                    completed: is_single_attempt_completed(def.single_attempt, count),
                    completed_count: count,
                    definition: def.clone(),
                    id,
                }
            })
            .collect())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, kingdom_id = %kingdom_id))]
    async fn contract_views(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
    ) -> Result<Vec<ContractView>> {
        let Some(kingdom) = self.catalog.kingdom(&kingdom_id) else {
            return Ok(Vec::new());
        };
        let campaign = self.repository.get(campaign_id).await?;
        let ledger = campaign
            .as_ref()
            .and_then(|c| c.kingdom_progress(&kingdom_id));

        Ok(kingdom
            .contracts
            .iter()
            .map(|def| {
                let id = def.content_id(&kingdom_id);
                let count = ledger.map(|l| l.count(&id)).unwrap_or(0);
                ContractView {
                    completed: is_single_attempt_completed(def.single_attempt, count),
                    completed_count: count,
                    definition: def.clone(),
                    id,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Campaign, MemberMeta};
    use crate::domain::value_objects::{
        AdventureDef, CampaignSettings, InvestigationId, KingdomDef, TemplateId,
    };
    use crate::infrastructure::catalog::StaticCatalog;
    use crate::infrastructure::persistence::InMemoryCampaignRepository;

    fn catalog() -> Arc<StaticCatalog> {
        Arc::new(StaticCatalog::from_definitions(vec![KingdomDef {
            id: KingdomId::from("stone"),
            name: "Stonemarch".to_string(),
            adventures: vec![
                AdventureDef {
                    name: "Sunken Crypt".to_string(),
                    single_attempt: true,
                    roll: None,
                },
                AdventureDef {
                    name: "Old Road".to_string(),
                    single_attempt: false,
                    roll: Some("2d6".to_string()),
                },
            ],
            contracts: vec![],
            bestiary: None,
        }]))
    }

    async fn fixture() -> (ProgressServiceImpl, CampaignId) {
        let repository = Arc::new(InMemoryCampaignRepository::new());
        let campaign = Campaign::new("Test", CampaignSettings::default());
        let id = campaign.id;
        repository.create(&campaign).await.unwrap();
        (ProgressServiceImpl::new(repository, catalog()), id)
    }

    fn content(name: &str) -> ContentId {
        ContentId::derive(&KingdomId::from("stone"), name)
    }

    #[tokio::test]
    async fn single_attempt_is_idempotent_across_calls() {
        let (service, id) = fixture().await;
        let kingdom = KingdomId::from("stone");

        service
            .record_single_attempt(id, kingdom.clone(), content("Sunken Crypt"))
            .await
            .unwrap();
        service
            .record_single_attempt(id, kingdom.clone(), content("Sunken Crypt"))
            .await
            .unwrap();

        let count = service
            .read_count(id, kingdom, content("Sunken Crypt"))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn repeatable_deltas_are_independent_of_other_ids() {
        let (service, id) = fixture().await;
        let kingdom = KingdomId::from("stone");

        service
            .record_single_attempt(id, kingdom.clone(), content("Sunken Crypt"))
            .await
            .unwrap();
        service
            .record_single_attempt(id, kingdom.clone(), content("Sunken Crypt"))
            .await
            .unwrap();
        service
            .increment_by_delta(id, kingdom.clone(), content("Old Road"), 2)
            .await
            .unwrap();

        assert_eq!(
            service
                .read_count(id, kingdom.clone(), content("Sunken Crypt"))
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            service
                .read_count(id, kingdom, content("Old Road"))
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn zero_delta_is_rejected() {
        let (service, id) = fixture().await;
        let result = service
            .increment_by_delta(id, KingdomId::from("stone"), content("Old Road"), 0)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn views_merge_catalog_and_ledger() {
        let (service, id) = fixture().await;
        let kingdom = KingdomId::from("stone");

        service
            .record_single_attempt(id, kingdom.clone(), content("Sunken Crypt"))
            .await
            .unwrap();
        service
            .increment_by_delta(id, kingdom.clone(), content("Old Road"), 4)
            .await
            .unwrap();

        let views = service.adventure_views(id, kingdom).await.unwrap();
        assert_eq!(views.len(), 2);

        let crypt = views.iter().find(|v| v.definition.name == "Sunken Crypt").unwrap();
        assert_eq!(crypt.completed_count, 1);
        assert!(crypt.completed);

        // Repeatable content never reads as completed
        let road = views.iter().find(|v| v.definition.name == "Old Road").unwrap();
        assert_eq!(road.completed_count, 4);
        assert!(!road.completed);
    }

    #[tokio::test]
    async fn chapter_advance_resets_member_progress() {
        let repository = Arc::new(InMemoryCampaignRepository::new());
        let mut campaign = Campaign::new("Test", CampaignSettings::default());
        let id = campaign.id;
        campaign.add_active(
            CharacterId::from("k1"),
            MemberMeta {
                template_id: TemplateId::from("warden"),
                name: "Aldric".to_string(),
            },
        );
        campaign
            .member_mut(&CharacterId::from("k1"))
            .unwrap()
            .progress
            .record_investigation(InvestigationId::new(1, 1), true);
        repository.create(&campaign).await.unwrap();

        let service = ProgressServiceImpl::new(repository.clone(), catalog());
        service
            .advance_member_chapter(id, CharacterId::from("k1"))
            .await
            .unwrap();

        let stored = repository.get(id).await.unwrap().unwrap();
        let progress = &stored.member(&CharacterId::from("k1")).unwrap().progress;
        assert_eq!(progress.chapter, 2);
        assert_eq!(progress.investigations_done(), 0);
    }

    #[tokio::test]
    async fn reads_on_unknown_campaigns_are_zero() {
        let (service, _id) = fixture().await;
        let count = service
            .read_count(CampaignId::new(), KingdomId::from("stone"), content("Sunken Crypt"))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
