//! Expedition entity - one active playthrough cycle of the campaign phases

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CharacterId, DelveChoice, KingdomId, KnightChoice};

/// The ordered campaign phases of one expedition cycle.
///
/// Terminal-free: `spoils` is the last phase and the cycle is re-entered by
/// starting a fresh expedition. Every transition is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpeditionPhase {
    Vision,
    Outpost,
    Delve,
    Clash,
    Rest,
    SecondDelve,
    SecondClash,
    Spoils,
}

impl ExpeditionPhase {
    /// The phase that follows this one, or `None` after `spoils`
    pub fn next(&self) -> Option<ExpeditionPhase> {
        use ExpeditionPhase::*;
        match self {
            Vision => Some(Outpost),
            Outpost => Some(Delve),
            Delve => Some(Clash),
            Clash => Some(Rest),
            Rest => Some(SecondDelve),
            SecondDelve => Some(SecondClash),
            SecondClash => Some(Spoils),
            Spoils => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use ExpeditionPhase::*;
        match self {
            Vision => "vision",
            Outpost => "outpost",
            Delve => "delve",
            Clash => "clash",
            Rest => "rest",
            SecondDelve => "second-delve",
            SecondClash => "second-clash",
            Spoils => "spoils",
        }
    }
}

impl std::fmt::Display for ExpeditionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient state of the campaign's one live expedition.
///
/// Created in `vision`, replaced wholesale when the expedition ends.
#[derive(Debug, Clone)]
pub struct ExpeditionState {
    pub phase: ExpeditionPhase,
    /// When the current phase was entered
    pub phase_started_at: DateTime<Utc>,
    /// Destination kingdom, chosen during the vision phase
    pub destination: Option<KingdomId>,
    /// One recorded choice per active member, in recording order
    pub choices: Vec<KnightChoice>,
}

impl ExpeditionState {
    pub fn new() -> Self {
        Self {
            phase: ExpeditionPhase::Vision,
            phase_started_at: Utc::now(),
            destination: None,
            choices: Vec::new(),
        }
    }

    pub fn choice_for(&self, character_id: &CharacterId) -> Option<&KnightChoice> {
        self.choices.iter().find(|c| &c.character_id == character_id)
    }

    /// Record or replace a character's choice for this cycle
    pub fn put_choice(&mut self, choice: KnightChoice) {
        if let Some(existing) = self
            .choices
            .iter_mut()
            .find(|c| c.character_id == choice.character_id)
        {
            *existing = choice;
        } else {
            self.choices.push(choice);
        }
    }

    /// Drop quest choices held by anyone other than the given leader.
    ///
    /// A quest choice without leader status is invalid and must not persist
    /// across a leadership change.
    pub fn drop_stale_quest_choices(&mut self, leader: Option<&CharacterId>) {
        self.choices
            .retain(|c| !c.choice.is_quest() || Some(&c.character_id) == leader);
    }

    /// Enter the given phase, stamping the phase start time
    pub fn enter_phase(&mut self, phase: ExpeditionPhase) {
        self.phase = phase;
        self.phase_started_at = Utc::now();
    }
}

impl Default for ExpeditionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::InvestigationId;

    #[test]
    fn phases_form_a_linear_sequence() {
        let mut phase = ExpeditionPhase::Vision;
        let mut order = vec![phase];
        while let Some(next) = phase.next() {
            order.push(next);
            phase = next;
        }
        assert_eq!(order.len(), 8);
        assert_eq!(order.first(), Some(&ExpeditionPhase::Vision));
        assert_eq!(order.last(), Some(&ExpeditionPhase::Spoils));
    }

    #[test]
    fn put_choice_replaces_an_existing_record() {
        let mut state = ExpeditionState::new();
        let knight = CharacterId::from("k1");
        state.put_choice(KnightChoice::new(knight.clone(), DelveChoice::FreeRoam));
        state.put_choice(KnightChoice::new(
            knight.clone(),
            DelveChoice::Investigation(InvestigationId::new(1, 1)),
        ));
        assert_eq!(state.choices.len(), 1);
        assert!(state.choice_for(&knight).unwrap().choice.investigation().is_some());
    }

    #[test]
    fn leader_change_drops_stale_quest_choices() {
        let mut state = ExpeditionState::new();
        let old_leader = CharacterId::from("k1");
        let teammate = CharacterId::from("k2");
        state.put_choice(KnightChoice::new(old_leader.clone(), DelveChoice::Quest));
        state.put_choice(KnightChoice::new(teammate.clone(), DelveChoice::FreeRoam));

        let new_leader = CharacterId::from("k2");
        state.drop_stale_quest_choices(Some(&new_leader));

        assert!(state.choice_for(&old_leader).is_none());
        assert!(state.choice_for(&teammate).is_some());
    }
}
