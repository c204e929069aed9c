//! Expedition Service - Application service for the phase state machine
//!
//! Drives one expedition cycle through its ordered phases. The only guarded
//! transition is out of `vision`: a destination kingdom must be chosen and
//! every active member must have a recorded choice. Business-rule
//! violations come back as values (`Rejected`/`Blocked` with reasons),
//! never as errors.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{CampaignRepositoryPort, ContentCatalogPort};
use crate::domain::aggregates::Campaign;
use crate::domain::entities::ExpeditionPhase;
use crate::domain::value_objects::{
    CampaignId, CharacterId, ChoiceStatus, DelveChoice, KingdomId, KnightChoice,
};

/// Outcome of recording or resolving a choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    Recorded,
    /// The choice was not recorded; the reason is meant for display
    Rejected(String),
}

/// Outcome of attempting a phase transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseAdvance {
    Advanced(ExpeditionPhase),
    /// The transition was blocked; nothing was mutated
    Blocked(Vec<String>),
}

/// Expedition phase machine use cases
#[async_trait]
pub trait ExpeditionService: Send + Sync {
    /// Start a fresh expedition cycle in the vision phase
    async fn begin_expedition(&self, campaign_id: CampaignId) -> Result<()>;

    /// Pick the destination kingdom for the current cycle
    async fn set_destination(&self, campaign_id: CampaignId, kingdom_id: KingdomId) -> Result<()>;

    /// Record an active member's choice for the current cycle
    async fn set_choice(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        choice: DelveChoice,
    ) -> Result<ChoiceOutcome>;

    /// Resolve a recorded choice, feeding the member's chapter progress
    async fn set_choice_status(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        status: ChoiceStatus,
    ) -> Result<ChoiceOutcome>;

    /// Advance to the next phase, applying the vision gate
    async fn advance_phase(&self, campaign_id: CampaignId) -> Result<PhaseAdvance>;

    /// End the expedition, clearing its state entirely
    async fn end_expedition(&self, campaign_id: CampaignId) -> Result<()>;
}

/// Default implementation of ExpeditionService
pub struct ExpeditionServiceImpl {
    repository: Arc<dyn CampaignRepositoryPort>,
    catalog: Arc<dyn ContentCatalogPort>,
}

impl ExpeditionServiceImpl {
    pub fn new(
        repository: Arc<dyn CampaignRepositoryPort>,
        catalog: Arc<dyn ContentCatalogPort>,
    ) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    async fn store(&self, campaign: &Campaign) -> Result<()> {
        self.repository
            .update(campaign)
            .await
            .context("Failed to update campaign in repository")
    }

    /// Reasons the vision phase cannot be left yet, empty when it can
    fn vision_blockers(campaign: &Campaign) -> Vec<String> {
        let mut reasons = Vec::new();
        let Some(expedition) = campaign.expedition() else {
            return vec!["no expedition in progress".to_string()];
        };

        if expedition.destination.is_none() {
            reasons.push("no destination kingdom selected".to_string());
        }
        for member in campaign.active_members() {
            if expedition.choice_for(&member.character_id).is_none() {
                reasons.push(format!("{} has not made a choice", member.name));
            }
        }
        reasons
    }

    fn validate_choice(
        campaign: &Campaign,
        character_id: &CharacterId,
        choice: &DelveChoice,
    ) -> Option<String> {
        let Some(member) = campaign.member(character_id) else {
            return Some(format!("{} is not a member of this campaign", character_id));
        };
        if !member.is_active {
            return Some(format!("{} is benched", member.name));
        }

        match choice {
            DelveChoice::Quest => {
                if campaign.party_leader() != Some(character_id) {
                    return Some("only the party leader may pursue the quest".to_string());
                }
                if member.progress.quest_completed {
                    return Some("the chapter quest is already completed".to_string());
                }
            }
            DelveChoice::Investigation(id) => {
                let available = member.progress.available_investigations();
                if available.is_empty() {
                    return Some("no available investigations".to_string());
                }
                if !available.contains(id) {
                    return Some(format!("investigation {} is not available", id));
                }
            }
            DelveChoice::FreeRoam => {}
        }
        None
    }
}

#[async_trait]
impl ExpeditionService for ExpeditionServiceImpl {
    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    async fn begin_expedition(&self, campaign_id: CampaignId) -> Result<()> {
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            debug!("Begin expedition on unknown campaign ignored");
            return Ok(());
        };
        campaign.begin_expedition();
        self.store(&campaign).await?;
        info!("Expedition started in vision phase");
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, kingdom_id = %kingdom_id))]
    async fn set_destination(&self, campaign_id: CampaignId, kingdom_id: KingdomId) -> Result<()> {
        if self.catalog.kingdom(&kingdom_id).is_none() {
            warn!("Destination kingdom not in catalog; ignoring");
            return Ok(());
        }
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            return Ok(());
        };
        let Some(expedition) = campaign.expedition_mut() else {
            debug!("No expedition in progress; destination ignored");
            return Ok(());
        };
        expedition.destination = Some(kingdom_id.clone());
        self.store(&campaign).await?;
        info!("Destination set to {}", kingdom_id);
        Ok(())
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn set_choice(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        choice: DelveChoice,
    ) -> Result<ChoiceOutcome> {
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            return Ok(ChoiceOutcome::Rejected("campaign not found".to_string()));
        };
        let Some(expedition) = campaign.expedition() else {
            return Ok(ChoiceOutcome::Rejected(
                "no expedition in progress".to_string(),
            ));
        };
        if expedition.phase != ExpeditionPhase::Vision {
            return Ok(ChoiceOutcome::Rejected(
                "choices are made during the vision phase".to_string(),
            ));
        }
        if let Some(reason) = Self::validate_choice(&campaign, &character_id, &choice) {
            debug!(reason = %reason, "Choice rejected");
            return Ok(ChoiceOutcome::Rejected(reason));
        }

        if let Some(expedition) = campaign.expedition_mut() {
            expedition.put_choice(KnightChoice::new(character_id.clone(), choice));
        }
        self.store(&campaign).await?;
        info!("Recorded choice for {}", character_id);
        Ok(ChoiceOutcome::Recorded)
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id, character_id = %character_id))]
    async fn set_choice_status(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        status: ChoiceStatus,
    ) -> Result<ChoiceOutcome> {
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            return Ok(ChoiceOutcome::Rejected("campaign not found".to_string()));
        };
        let Some(expedition) = campaign.expedition_mut() else {
            return Ok(ChoiceOutcome::Rejected(
                "no expedition in progress".to_string(),
            ));
        };
        let Some(record) = expedition
            .choices
            .iter_mut()
            .find(|c| c.character_id == character_id)
        else {
            return Ok(ChoiceOutcome::Rejected(
                "no recorded choice for this character".to_string(),
            ));
        };

        record.status = status;
        let resolved_choice = record.choice;

        // A resolved choice feeds the member's chapter progress
        if let Some(member) = campaign.member_mut(&character_id) {
            match (resolved_choice, status) {
                (DelveChoice::Investigation(id), ChoiceStatus::Completed) => {
                    member.progress.record_investigation(id, true);
                }
                (DelveChoice::Investigation(id), ChoiceStatus::Failed) => {
                    member.progress.record_investigation(id, false);
                }
                (DelveChoice::Quest, ChoiceStatus::Completed) => {
                    member.progress.quest_completed = true;
                }
                _ => {}
            }
        }

        self.store(&campaign).await?;
        info!("Choice for {} marked {:?}", character_id, status);
        Ok(ChoiceOutcome::Recorded)
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    async fn advance_phase(&self, campaign_id: CampaignId) -> Result<PhaseAdvance> {
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            return Ok(PhaseAdvance::Blocked(vec![
                "campaign not found".to_string()
            ]));
        };
        let Some(expedition) = campaign.expedition() else {
            return Ok(PhaseAdvance::Blocked(vec![
                "no expedition in progress".to_string(),
            ]));
        };

        if expedition.phase == ExpeditionPhase::Vision {
            let blockers = Self::vision_blockers(&campaign);
            if !blockers.is_empty() {
                debug!(?blockers, "Vision phase advance blocked");
                return Ok(PhaseAdvance::Blocked(blockers));
            }
        }

        let Some(next) = expedition.phase.next() else {
            return Ok(PhaseAdvance::Blocked(vec![
                "spoils is the final phase; end the expedition to start a new cycle".to_string(),
            ]));
        };

        if let Some(expedition) = campaign.expedition_mut() {
            expedition.enter_phase(next);
        }
        self.store(&campaign).await?;
        info!("Advanced to {} phase", next);
        Ok(PhaseAdvance::Advanced(next))
    }

    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    async fn end_expedition(&self, campaign_id: CampaignId) -> Result<()> {
        let Some(mut campaign) = self.repository.get(campaign_id).await? else {
            return Ok(());
        };
        campaign.end_expedition();
        self.store(&campaign).await?;
        info!("Expedition ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::MemberMeta;
    use crate::domain::value_objects::{
        CampaignSettings, InvestigationId, KingdomDef, TemplateId,
    };
    use crate::infrastructure::catalog::StaticCatalog;
    use crate::infrastructure::persistence::InMemoryCampaignRepository;

    fn catalog() -> Arc<StaticCatalog> {
        Arc::new(StaticCatalog::from_definitions(vec![KingdomDef {
            id: KingdomId::from("stone"),
            name: "Stonemarch".to_string(),
            adventures: vec![],
            contracts: vec![],
            bestiary: None,
        }]))
    }

    fn meta(template: &str, name: &str) -> MemberMeta {
        MemberMeta {
            template_id: TemplateId::from(template),
            name: name.to_string(),
        }
    }

    struct Fixture {
        service: ExpeditionServiceImpl,
        repository: Arc<InMemoryCampaignRepository>,
        campaign_id: CampaignId,
    }

    /// Campaign with three active knights, k1 leading, expedition begun
    async fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryCampaignRepository::new());
        let mut campaign = Campaign::new("Test", CampaignSettings::default());
        let campaign_id = campaign.id;
        campaign.add_active(CharacterId::from("k1"), meta("warden", "Aldric"));
        campaign.add_active(CharacterId::from("k2"), meta("seer", "Brenna"));
        campaign.add_active(CharacterId::from("k3"), meta("smith", "Corin"));
        campaign.set_leader(CharacterId::from("k1"), None);
        campaign.begin_expedition();
        repository.create(&campaign).await.unwrap();
        Fixture {
            service: ExpeditionServiceImpl::new(repository.clone(), catalog()),
            repository,
            campaign_id,
        }
    }

    #[tokio::test]
    async fn vision_advance_reports_each_missing_knight_by_name() {
        let f = fixture().await;
        f.service
            .set_destination(f.campaign_id, KingdomId::from("stone"))
            .await
            .unwrap();
        f.service
            .set_choice(f.campaign_id, CharacterId::from("k1"), DelveChoice::Quest)
            .await
            .unwrap();

        let advance = f.service.advance_phase(f.campaign_id).await.unwrap();
        let PhaseAdvance::Blocked(reasons) = advance else {
            panic!("expected blocked advance");
        };
        assert_eq!(reasons.len(), 2);
        assert!(reasons.iter().any(|r| r.contains("Brenna")));
        assert!(reasons.iter().any(|r| r.contains("Corin")));

        // Phase unchanged
        let stored = f.repository.get(f.campaign_id).await.unwrap().unwrap();
        assert_eq!(stored.expedition().unwrap().phase, ExpeditionPhase::Vision);
    }

    #[tokio::test]
    async fn vision_advance_requires_a_destination() {
        let f = fixture().await;
        for knight in ["k1", "k2", "k3"] {
            f.service
                .set_choice(
                    f.campaign_id,
                    CharacterId::from(knight),
                    DelveChoice::FreeRoam,
                )
                .await
                .unwrap();
        }

        let advance = f.service.advance_phase(f.campaign_id).await.unwrap();
        assert_eq!(
            advance,
            PhaseAdvance::Blocked(vec!["no destination kingdom selected".to_string()])
        );
    }

    #[tokio::test]
    async fn satisfied_gate_advances_through_the_whole_cycle() {
        let f = fixture().await;
        f.service
            .set_destination(f.campaign_id, KingdomId::from("stone"))
            .await
            .unwrap();
        for knight in ["k1", "k2", "k3"] {
            f.service
                .set_choice(
                    f.campaign_id,
                    CharacterId::from(knight),
                    DelveChoice::FreeRoam,
                )
                .await
                .unwrap();
        }

        let expected = [
            ExpeditionPhase::Outpost,
            ExpeditionPhase::Delve,
            ExpeditionPhase::Clash,
            ExpeditionPhase::Rest,
            ExpeditionPhase::SecondDelve,
            ExpeditionPhase::SecondClash,
            ExpeditionPhase::Spoils,
        ];
        for phase in expected {
            let advance = f.service.advance_phase(f.campaign_id).await.unwrap();
            assert_eq!(advance, PhaseAdvance::Advanced(phase));
        }

        // Spoils is terminal within the cycle
        let advance = f.service.advance_phase(f.campaign_id).await.unwrap();
        assert!(matches!(advance, PhaseAdvance::Blocked(_)));
    }

    #[tokio::test]
    async fn quest_choice_is_leader_only_and_leaves_choices_unmodified() {
        let f = fixture().await;
        let outcome = f
            .service
            .set_choice(f.campaign_id, CharacterId::from("k2"), DelveChoice::Quest)
            .await
            .unwrap();
        assert!(matches!(outcome, ChoiceOutcome::Rejected(_)));

        let stored = f.repository.get(f.campaign_id).await.unwrap().unwrap();
        assert!(stored.expedition().unwrap().choices.is_empty());
    }

    #[tokio::test]
    async fn quest_choice_rejected_when_chapter_quest_done() {
        let f = fixture().await;
        {
            let mut campaign = f.repository.get(f.campaign_id).await.unwrap().unwrap();
            campaign
                .member_mut(&CharacterId::from("k1"))
                .unwrap()
                .progress
                .quest_completed = true;
            f.repository.update(&campaign).await.unwrap();
        }

        let outcome = f
            .service
            .set_choice(f.campaign_id, CharacterId::from("k1"), DelveChoice::Quest)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ChoiceOutcome::Rejected("the chapter quest is already completed".to_string())
        );
    }

    #[tokio::test]
    async fn investigation_must_come_from_the_available_set() {
        let f = fixture().await;
        {
            let mut campaign = f.repository.get(f.campaign_id).await.unwrap().unwrap();
            let progress = &mut campaign.member_mut(&CharacterId::from("k2")).unwrap().progress;
            for slot in InvestigationId::slots_for_chapter(1) {
                progress.record_investigation(slot, false);
            }
            f.repository.update(&campaign).await.unwrap();
        }

        let outcome = f
            .service
            .set_choice(
                f.campaign_id,
                CharacterId::from("k2"),
                DelveChoice::Investigation(InvestigationId::new(1, 1)),
            )
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ChoiceOutcome::Rejected("no available investigations".to_string())
        );
    }

    #[tokio::test]
    async fn completed_investigation_feeds_chapter_progress() {
        let f = fixture().await;
        let slot = InvestigationId::new(1, 2);
        f.service
            .set_choice(
                f.campaign_id,
                CharacterId::from("k2"),
                DelveChoice::Investigation(slot),
            )
            .await
            .unwrap();
        f.service
            .set_choice_status(
                f.campaign_id,
                CharacterId::from("k2"),
                ChoiceStatus::Completed,
            )
            .await
            .unwrap();

        let stored = f.repository.get(f.campaign_id).await.unwrap().unwrap();
        let progress = &stored.member(&CharacterId::from("k2")).unwrap().progress;
        assert_eq!(progress.investigations_done(), 1);
        assert!(!progress.available_investigations().contains(&slot));
    }

    #[tokio::test]
    async fn leader_change_mid_vision_drops_the_old_quest_choice() {
        let f = fixture().await;
        f.service
            .set_choice(f.campaign_id, CharacterId::from("k1"), DelveChoice::Quest)
            .await
            .unwrap();

        let mut campaign = f.repository.get(f.campaign_id).await.unwrap().unwrap();
        campaign.set_leader(CharacterId::from("k2"), None);
        f.repository.update(&campaign).await.unwrap();

        let stored = f.repository.get(f.campaign_id).await.unwrap().unwrap();
        assert!(stored
            .expedition()
            .unwrap()
            .choice_for(&CharacterId::from("k1"))
            .is_none());
    }

    #[tokio::test]
    async fn end_expedition_clears_the_state() {
        let f = fixture().await;
        f.service.end_expedition(f.campaign_id).await.unwrap();
        let stored = f.repository.get(f.campaign_id).await.unwrap().unwrap();
        assert!(stored.expedition().is_none());
    }
}
