//! Campaign Aggregate - The root aggregate for one campaign
//!
//! A Campaign owns its members, per-kingdom progress ledgers, and the live
//! expedition. All modifications go through this aggregate root so the
//! party-composition invariants hold by construction:
//!
//! - at most one *active* member per template id
//! - at most one leader, and the leader is always active

use chrono::{DateTime, Utc};

use crate::domain::entities::{
    CampaignMember, ExpeditionPhase, ExpeditionState, KingdomProgress,
};
use crate::domain::value_objects::{
    CampaignId, CampaignSettings, CharacterId, KingdomId, TemplateId,
};

/// Identifying details supplied when a character joins a campaign
#[derive(Debug, Clone)]
pub struct MemberMeta {
    pub template_id: TemplateId,
    pub name: String,
}

/// Outcome of attempting to activate a character
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddActiveOutcome {
    /// The character is now an active member
    Activated,
    /// Another active member already holds this template slot; nothing
    /// was mutated. The caller must resolve explicitly (replace or bench).
    Conflict { existing: CharacterId },
}

/// The Campaign Aggregate Root
#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub settings: CampaignSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    members: Vec<CampaignMember>,
    party_leader: Option<CharacterId>,
    progress: std::collections::HashMap<KingdomId, KingdomProgress>,
    expedition: Option<ExpeditionState>,
}

impl Campaign {
    pub fn new(name: impl Into<String>, settings: CampaignSettings) -> Self {
        let now = Utc::now();
        Self {
            id: CampaignId::new(),
            name: name.into(),
            settings,
            created_at: now,
            updated_at: now,
            members: Vec::new(),
            party_leader: None,
            progress: std::collections::HashMap::new(),
            expedition: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn members(&self) -> &[CampaignMember] {
        &self.members
    }

    pub fn active_members(&self) -> impl Iterator<Item = &CampaignMember> {
        self.members.iter().filter(|m| m.is_active)
    }

    pub fn party_leader(&self) -> Option<&CharacterId> {
        self.party_leader.as_ref()
    }

    pub fn leader(&self) -> Option<&CampaignMember> {
        let id = self.party_leader.as_ref()?;
        self.member(id)
    }

    pub fn expedition(&self) -> Option<&ExpeditionState> {
        self.expedition.as_ref()
    }

    pub fn expedition_mut(&mut self) -> Option<&mut ExpeditionState> {
        self.updated_at = Utc::now();
        self.expedition.as_mut()
    }

    pub fn kingdom_progress(&self, kingdom_id: &KingdomId) -> Option<&KingdomProgress> {
        self.progress.get(kingdom_id)
    }

    // ========================================================================
    // Finders
    // ========================================================================

    pub fn member(&self, id: &CharacterId) -> Option<&CampaignMember> {
        self.members.iter().find(|m| &m.character_id == id)
    }

    pub fn member_mut(&mut self, id: &CharacterId) -> Option<&mut CampaignMember> {
        self.updated_at = Utc::now();
        self.members.iter_mut().find(|m| &m.character_id == id)
    }

    /// The active member currently holding a template slot, if any
    pub fn active_holder(&self, template_id: &TemplateId) -> Option<&CampaignMember> {
        self.active_members().find(|m| &m.template_id == template_id)
    }

    // ========================================================================
    // Roster mutators
    // ========================================================================

    /// Activate a character, enforcing template uniqueness among actives.
    ///
    /// Performs no mutation at all when the slot is taken by a different
    /// character.
    pub fn add_active(&mut self, character_id: CharacterId, meta: MemberMeta) -> AddActiveOutcome {
        let template_id = self
            .member(&character_id)
            .map(|m| m.template_id.clone())
            .unwrap_or_else(|| meta.template_id.clone());

        if let Some(existing) = self.active_holder(&template_id) {
            if existing.character_id != character_id {
                return AddActiveOutcome::Conflict {
                    existing: existing.character_id.clone(),
                };
            }
        }

        self.touch();
        match self.members.iter_mut().find(|m| m.character_id == character_id) {
            Some(member) => member.is_active = true,
            None => self.members.push(CampaignMember::new(
                character_id,
                meta.template_id,
                meta.name,
                true,
            )),
        }
        AddActiveOutcome::Activated
    }

    /// Idempotently ensure membership exists and is benched.
    ///
    /// Never conflicts: template uniqueness is only enforced among actives.
    pub fn add_benched(&mut self, character_id: CharacterId, meta: MemberMeta) {
        self.touch();
        match self.members.iter_mut().find(|m| m.character_id == character_id) {
            Some(member) => member.is_active = false,
            None => self.members.push(CampaignMember::new(
                character_id.clone(),
                meta.template_id,
                meta.name,
                false,
            )),
        }
        if self.party_leader.as_ref() == Some(&character_id) {
            self.assign_leader(None);
        }
    }

    /// Atomically bench the current holder of a template slot and activate
    /// the incoming character in its place. Leadership follows the slot iff
    /// the outgoing member held it.
    pub fn replace_active(
        &mut self,
        template_id: &TemplateId,
        new_character_id: CharacterId,
        meta: MemberMeta,
    ) {
        let outgoing = self
            .active_holder(template_id)
            .map(|m| (m.character_id.clone(), m.is_leader));

        if let Some((ref outgoing_id, _)) = outgoing {
            if outgoing_id == &new_character_id {
                return;
            }
        }

        self.touch();
        let transfers_leadership = match outgoing {
            Some((outgoing_id, was_leader)) => {
                if let Some(member) = self.members.iter_mut().find(|m| m.character_id == outgoing_id)
                {
                    member.is_active = false;
                }
                was_leader
            }
            None => false,
        };

        match self
            .members
            .iter_mut()
            .find(|m| m.character_id == new_character_id)
        {
            Some(member) => member.is_active = true,
            None => self.members.push(CampaignMember::new(
                new_character_id.clone(),
                meta.template_id,
                meta.name,
                true,
            )),
        }

        if transfers_leadership {
            self.assign_leader(Some(new_character_id));
        }
    }

    /// Toggle a member's bench state.
    ///
    /// Benching the leader clears leadership; activating never assigns it.
    pub fn set_bench_state(&mut self, character_id: &CharacterId, benched: bool) {
        let Some(member) = self.members.iter_mut().find(|m| &m.character_id == character_id)
        else {
            return;
        };
        member.is_active = !benched;
        self.touch();
        if benched && self.party_leader.as_ref() == Some(character_id) {
            self.assign_leader(None);
        }
    }

    /// Delete a membership record, clearing leadership if the member led
    pub fn remove_member(&mut self, character_id: &CharacterId) {
        let Some(pos) = self.members.iter().position(|m| &m.character_id == character_id)
        else {
            return;
        };
        self.members.remove(pos);
        self.touch();
        if self.party_leader.as_ref() == Some(character_id) {
            self.assign_leader(None);
        }
    }

    /// Make a character the party leader, exclusively and by construction.
    ///
    /// Ensures membership (creating a minimal one when absent), forces the
    /// member active, and clears every other leader flag.
    pub fn set_leader(&mut self, character_id: CharacterId, meta: Option<MemberMeta>) {
        self.touch();
        if self.member(&character_id).is_none() {
            let meta = meta.unwrap_or_else(|| MemberMeta {
                template_id: TemplateId::new(character_id.as_str()),
                name: character_id.as_str().to_string(),
            });
            self.members.push(CampaignMember::new(
                character_id.clone(),
                meta.template_id,
                meta.name,
                true,
            ));
        }
        if let Some(member) = self.members.iter_mut().find(|m| m.character_id == character_id) {
            member.is_active = true;
        }
        self.assign_leader(Some(character_id));
    }

    /// Clear the leader pointer and every member's leader flag
    pub fn clear_leader(&mut self) {
        self.touch();
        self.assign_leader(None);
    }

    fn assign_leader(&mut self, leader: Option<CharacterId>) {
        for member in &mut self.members {
            member.is_leader = Some(&member.character_id) == leader.as_ref();
        }
        self.party_leader = leader;

        // A quest choice only makes sense on the leader; scrub stale ones
        // while the party is still picking (vision phase).
        let leader = self.party_leader.clone();
        if let Some(expedition) = self.expedition.as_mut() {
            if expedition.phase == ExpeditionPhase::Vision {
                expedition.drop_stale_quest_choices(leader.as_ref());
            }
        }
    }

    // ========================================================================
    // Progress & expedition
    // ========================================================================

    /// Ledger for a kingdom, materialized on first write
    pub fn kingdom_progress_mut(&mut self, kingdom_id: &KingdomId) -> &mut KingdomProgress {
        self.touch();
        self.progress.entry(kingdom_id.clone()).or_default()
    }

    /// Start a fresh expedition cycle in the vision phase.
    ///
    /// Replaces any expedition already live.
    pub fn begin_expedition(&mut self) -> &mut ExpeditionState {
        self.touch();
        self.expedition.insert(ExpeditionState::new())
    }

    /// End the live expedition, clearing its state entirely
    pub fn end_expedition(&mut self) {
        self.touch();
        self.expedition = None;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(template: &str, name: &str) -> MemberMeta {
        MemberMeta {
            template_id: TemplateId::from(template),
            name: name.to_string(),
        }
    }

    fn campaign() -> Campaign {
        Campaign::new("The Long March", CampaignSettings::default())
    }

    #[test]
    fn active_members_have_distinct_templates() {
        let mut c = campaign();
        assert_eq!(
            c.add_active(CharacterId::from("a"), meta("warden", "Aldric")),
            AddActiveOutcome::Activated
        );
        let outcome = c.add_active(CharacterId::from("b"), meta("warden", "Brenna"));
        assert_eq!(
            outcome,
            AddActiveOutcome::Conflict {
                existing: CharacterId::from("a")
            }
        );
        // Conflict performed no mutation
        assert_eq!(c.members().len(), 1);
    }

    #[test]
    fn conflict_applies_to_benched_members_being_activated() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.add_benched(CharacterId::from("b"), meta("warden", "Brenna"));

        let outcome = c.add_active(CharacterId::from("b"), meta("warden", "Brenna"));
        assert_eq!(
            outcome,
            AddActiveOutcome::Conflict {
                existing: CharacterId::from("a")
            }
        );
        assert!(!c.member(&CharacterId::from("b")).unwrap().is_active);
    }

    #[test]
    fn reactivating_the_same_character_is_not_a_conflict() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.set_bench_state(&CharacterId::from("a"), true);
        assert_eq!(
            c.add_active(CharacterId::from("a"), meta("warden", "Aldric")),
            AddActiveOutcome::Activated
        );
    }

    #[test]
    fn add_benched_is_idempotent_and_never_conflicts() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.add_benched(CharacterId::from("b"), meta("warden", "Brenna"));
        c.add_benched(CharacterId::from("b"), meta("warden", "Brenna"));
        assert_eq!(c.members().len(), 2);
        assert!(!c.member(&CharacterId::from("b")).unwrap().is_active);
    }

    #[test]
    fn replace_active_swaps_the_slot_and_transfers_leadership() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.add_benched(CharacterId::from("b"), meta("warden", "Brenna"));
        c.set_leader(CharacterId::from("a"), None);

        c.replace_active(
            &TemplateId::from("warden"),
            CharacterId::from("b"),
            meta("warden", "Brenna"),
        );

        assert!(!c.member(&CharacterId::from("a")).unwrap().is_active);
        assert!(c.member(&CharacterId::from("b")).unwrap().is_active);
        assert_eq!(c.party_leader(), Some(&CharacterId::from("b")));
        assert!(c.member(&CharacterId::from("b")).unwrap().is_leader);
        assert!(!c.member(&CharacterId::from("a")).unwrap().is_leader);
    }

    #[test]
    fn replace_active_leaves_leadership_with_unrelated_leader() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.add_active(CharacterId::from("c"), meta("seer", "Ciara"));
        c.set_leader(CharacterId::from("c"), None);

        c.replace_active(
            &TemplateId::from("warden"),
            CharacterId::from("b"),
            meta("warden", "Brenna"),
        );

        assert_eq!(c.party_leader(), Some(&CharacterId::from("c")));
    }

    #[test]
    fn benching_the_leader_clears_leadership() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.set_leader(CharacterId::from("a"), None);
        c.set_bench_state(&CharacterId::from("a"), true);

        assert_eq!(c.party_leader(), None);
        assert!(c.members().iter().all(|m| !m.is_leader));

        // Re-activating does not restore leadership
        c.set_bench_state(&CharacterId::from("a"), false);
        assert_eq!(c.party_leader(), None);
    }

    #[test]
    fn removing_the_leader_clears_leadership() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.set_leader(CharacterId::from("a"), None);
        c.remove_member(&CharacterId::from("a"));

        assert!(c.members().is_empty());
        assert_eq!(c.party_leader(), None);
    }

    #[test]
    fn leadership_is_exclusive_by_construction() {
        let mut c = campaign();
        c.add_active(CharacterId::from("a"), meta("warden", "Aldric"));
        c.add_active(CharacterId::from("b"), meta("seer", "Brenna"));
        c.set_leader(CharacterId::from("a"), None);
        c.set_leader(CharacterId::from("b"), None);

        let leaders: Vec<_> = c.members().iter().filter(|m| m.is_leader).collect();
        assert_eq!(leaders.len(), 1);
        assert_eq!(leaders[0].character_id, CharacterId::from("b"));
        assert!(leaders[0].is_active);
    }

    #[test]
    fn set_leader_creates_a_minimal_membership_when_absent() {
        let mut c = campaign();
        c.set_leader(CharacterId::from("ghost"), None);
        let member = c.member(&CharacterId::from("ghost")).unwrap();
        assert!(member.is_active);
        assert!(member.is_leader);
    }

    #[test]
    fn kingdom_progress_materializes_on_first_write() {
        let mut c = campaign();
        let kingdom = KingdomId::from("stone");
        assert!(c.kingdom_progress(&kingdom).is_none());
        c.kingdom_progress_mut(&kingdom);
        assert!(c.kingdom_progress(&kingdom).is_some());
    }
}
