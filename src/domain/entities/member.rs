//! Campaign member entity - one character's membership in one campaign

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CharacterId, InvestigationId, TemplateId};

/// A character enrolled in a campaign, active or benched.
///
/// Template uniqueness (at most one *active* member per template id) and
/// leader exclusivity are enforced by the campaign aggregate, not here.
#[derive(Debug, Clone)]
pub struct CampaignMember {
    pub character_id: CharacterId,
    /// Archetype/class identifier shared by all instances of that archetype
    pub template_id: TemplateId,
    /// Display-name snapshot taken when the character joined
    pub name: String,
    pub is_active: bool,
    /// Denormalized mirror of the campaign's party-leader pointer
    pub is_leader: bool,
    pub joined_at: DateTime<Utc>,
    pub progress: ChapterProgress,
}

impl CampaignMember {
    pub fn new(
        character_id: CharacterId,
        template_id: TemplateId,
        name: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            character_id,
            template_id,
            name: name.into(),
            is_active: active,
            is_leader: false,
            joined_at: Utc::now(),
            progress: ChapterProgress::default(),
        }
    }
}

/// A member's progression through the current chapter
#[derive(Debug, Clone)]
pub struct ChapterProgress {
    /// Current chapter, 1-based
    pub chapter: u8,
    /// Whether this chapter's quest has been completed
    pub quest_completed: bool,
    /// Investigation slots attempted and failed
    pub attempted: HashSet<InvestigationId>,
    /// Investigation slots completed
    pub completed: HashSet<InvestigationId>,
}

impl Default for ChapterProgress {
    fn default() -> Self {
        Self {
            chapter: 1,
            quest_completed: false,
            attempted: HashSet::new(),
            completed: HashSet::new(),
        }
    }
}

impl ChapterProgress {
    /// Investigation slots of the current chapter that are still open:
    /// neither attempted nor completed.
    pub fn available_investigations(&self) -> Vec<InvestigationId> {
        InvestigationId::slots_for_chapter(self.chapter)
            .filter(|id| !self.attempted.contains(id) && !self.completed.contains(id))
            .collect()
    }

    /// Investigations completed within the current chapter
    pub fn investigations_done(&self) -> u32 {
        self.completed
            .iter()
            .filter(|id| id.chapter == self.chapter)
            .count() as u32
    }

    /// Record the outcome of an investigation attempt
    pub fn record_investigation(&mut self, id: InvestigationId, success: bool) {
        if success {
            self.completed.insert(id);
        } else {
            self.attempted.insert(id);
        }
    }

    /// Move to the next chapter, resetting per-chapter state
    pub fn advance_chapter(&mut self) {
        self.chapter = self.chapter.saturating_add(1);
        self.quest_completed = false;
    }
}
