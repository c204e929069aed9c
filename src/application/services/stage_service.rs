//! Stage Service - Application service for bestiary stage resolution
//!
//! Thin orchestration over the pure domain resolver: fetches the kingdom's
//! stage table from the catalog and, for the live-expedition entry point,
//! the party leader's progression from the campaign.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::application::ports::outbound::{CampaignRepositoryPort, ContentCatalogPort};
use crate::domain::services::{resolve_expedition_stage, resolve_stage, BestiaryStage};
use crate::domain::value_objects::{CampaignId, CharacterId, KingdomId, StageRow};

/// Stage resolution use cases
#[async_trait]
pub trait StageService: Send + Sync {
    /// The stage row for explicit progression inputs (static sheet view)
    fn kingdom_stage(
        &self,
        kingdom_id: &KingdomId,
        chapter: u8,
        quest_completed: bool,
        investigations_done: u32,
    ) -> BestiaryStage;

    /// The stage row for one member, read from their chapter progress
    async fn member_stage(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        character_id: CharacterId,
    ) -> Result<BestiaryStage>;

    /// The stage row that applies during the live expedition.
    ///
    /// Evaluated for the party leader against the expedition's destination
    /// kingdom, counting only the leader's own recorded choices.
    async fn expedition_stage(&self, campaign_id: CampaignId) -> Result<BestiaryStage>;
}

/// Default implementation of StageService
pub struct StageServiceImpl {
    repository: Arc<dyn CampaignRepositoryPort>,
    catalog: Arc<dyn ContentCatalogPort>,
}

impl StageServiceImpl {
    pub fn new(
        repository: Arc<dyn CampaignRepositoryPort>,
        catalog: Arc<dyn ContentCatalogPort>,
    ) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    fn stage_table(&self, kingdom_id: &KingdomId) -> Option<Vec<StageRow>> {
        let kingdom = self.catalog.kingdom(kingdom_id)?;
        Some(kingdom.bestiary?.stages)
    }
}

#[async_trait]
impl StageService for StageServiceImpl {
    fn kingdom_stage(
        &self,
        kingdom_id: &KingdomId,
        chapter: u8,
        quest_completed: bool,
        investigations_done: u32,
    ) -> BestiaryStage {
        match self.stage_table(kingdom_id) {
            Some(stages) => resolve_stage(&stages, chapter, quest_completed, investigations_done),
            None => BestiaryStage::absent(),
        }
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn member_stage(
        &self,
        campaign_id: CampaignId,
        kingdom_id: KingdomId,
        character_id: CharacterId,
    ) -> Result<BestiaryStage> {
        let Some(campaign) = self.repository.get(campaign_id).await? else {
            return Ok(BestiaryStage::absent());
        };
        let Some(member) = campaign.member(&character_id) else {
            return Ok(BestiaryStage::absent());
        };
        Ok(self.kingdom_stage(
            &kingdom_id,
            member.progress.chapter,
            member.progress.quest_completed,
            member.progress.investigations_done(),
        ))
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    async fn expedition_stage(&self, campaign_id: CampaignId) -> Result<BestiaryStage> {
        let Some(campaign) = self.repository.get(campaign_id).await? else {
            return Ok(BestiaryStage::absent());
        };
        let (Some(expedition), Some(leader)) = (campaign.expedition(), campaign.leader()) else {
            debug!("No live expedition or no leader; reporting no chapter data");
            return Ok(BestiaryStage::absent());
        };
        let Some(destination) = expedition.destination.as_ref() else {
            return Ok(BestiaryStage::absent());
        };
        let Some(stages) = self.stage_table(destination) else {
            return Ok(BestiaryStage::absent());
        };

        Ok(resolve_expedition_stage(
            &stages,
            leader.progress.chapter,
            leader.progress.quest_completed,
            &leader.character_id,
            &expedition.choices,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Campaign, MemberMeta};
    use crate::domain::value_objects::{
        BestiaryDef, CampaignSettings, ChoiceStatus, DelveChoice, InvestigationId, KingdomDef,
        KnightChoice, MonsterId, TemplateId,
    };
    use crate::infrastructure::catalog::StaticCatalog;
    use crate::infrastructure::persistence::InMemoryCampaignRepository;

    fn catalog() -> Arc<StaticCatalog> {
        let stages = (0..8)
            .map(|i| {
                let mut row = StageRow::new();
                row.insert(MonsterId::from("wolf"), Some(i));
                row
            })
            .collect();
        Arc::new(StaticCatalog::from_definitions(vec![KingdomDef {
            id: KingdomId::from("stone"),
            name: "Stonemarch".to_string(),
            adventures: vec![],
            contracts: vec![],
            bestiary: Some(BestiaryDef {
                monsters: vec![],
                stages,
            }),
        }]))
    }

    fn meta(template: &str, name: &str) -> MemberMeta {
        MemberMeta {
            template_id: TemplateId::from(template),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn kingdom_stage_resolves_from_explicit_inputs() {
        let repository = Arc::new(InMemoryCampaignRepository::new());
        let service = StageServiceImpl::new(repository, catalog());

        // Chapter 1, quest done, three investigations: row 3
        let stage = service.kingdom_stage(&KingdomId::from("stone"), 1, true, 3);
        assert_eq!(stage.stage_index, Some(3));

        // Unknown kingdom: sentinel, not an error
        let stage = service.kingdom_stage(&KingdomId::from("ash"), 1, false, 0);
        assert!(!stage.has_chapter);
    }

    #[tokio::test]
    async fn expedition_stage_follows_the_leader_choices() {
        let repository = Arc::new(InMemoryCampaignRepository::new());
        let mut campaign = Campaign::new("Test", CampaignSettings::default());
        let id = campaign.id;
        campaign.add_active(CharacterId::from("k1"), meta("warden", "Aldric"));
        campaign.set_leader(CharacterId::from("k1"), None);
        {
            let expedition = campaign.begin_expedition();
            expedition.destination = Some(KingdomId::from("stone"));
            expedition.put_choice(KnightChoice {
                character_id: CharacterId::from("k1"),
                choice: DelveChoice::Investigation(InvestigationId::new(1, 1)),
                status: ChoiceStatus::Completed,
            });
        }
        repository.create(&campaign).await.unwrap();

        let service = StageServiceImpl::new(repository, catalog());
        let stage = service.expedition_stage(id).await.unwrap();
        assert_eq!(stage.stage_index, Some(1));
    }

    #[tokio::test]
    async fn expedition_stage_without_leader_is_absent() {
        let repository = Arc::new(InMemoryCampaignRepository::new());
        let mut campaign = Campaign::new("Test", CampaignSettings::default());
        let id = campaign.id;
        campaign.begin_expedition().destination = Some(KingdomId::from("stone"));
        repository.create(&campaign).await.unwrap();

        let service = StageServiceImpl::new(repository, catalog());
        let stage = service.expedition_stage(id).await.unwrap();
        assert!(!stage.has_chapter);
    }
}
