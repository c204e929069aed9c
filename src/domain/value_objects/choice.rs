//! Delve-cycle choices - what each knight decides to pursue
//!
//! A choice is a tagged variant: each kind carries exactly the data relevant
//! to it. Only the party leader may hold a quest choice; that rule is
//! enforced by the expedition machinery, not here.

use crate::domain::value_objects::{CharacterId, InvestigationId};

/// A knight's chosen activity for the current delve cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelveChoice {
    /// Pursue the chapter quest (leader only)
    Quest,
    /// Attempt one of the chapter's investigation slots
    Investigation(InvestigationId),
    /// Roam freely, no milestone progress
    FreeRoam,
}

impl DelveChoice {
    pub fn is_quest(&self) -> bool {
        matches!(self, DelveChoice::Quest)
    }

    pub fn investigation(&self) -> Option<InvestigationId> {
        match self {
            DelveChoice::Investigation(id) => Some(*id),
            _ => None,
        }
    }
}

/// Progress of a recorded choice through the delve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoiceStatus {
    #[default]
    InProgress,
    Completed,
    Failed,
}

/// One active knight's recorded choice for the current expedition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnightChoice {
    pub character_id: CharacterId,
    pub choice: DelveChoice,
    pub status: ChoiceStatus,
}

impl KnightChoice {
    pub fn new(character_id: CharacterId, choice: DelveChoice) -> Self {
        Self {
            character_id,
            choice,
            status: ChoiceStatus::InProgress,
        }
    }
}
