//! Expedition DTOs - phase machine and knight choices over the wire

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ExpeditionState;
use crate::domain::value_objects::{ChoiceStatus, DelveChoice, InvestigationId, KnightChoice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceKindDto {
    Quest,
    Investigation,
    FreeRoam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceStatusDto {
    InProgress,
    Completed,
    Failed,
}

impl From<ChoiceStatusDto> for ChoiceStatus {
    fn from(value: ChoiceStatusDto) -> Self {
        match value {
            ChoiceStatusDto::InProgress => ChoiceStatus::InProgress,
            ChoiceStatusDto::Completed => ChoiceStatus::Completed,
            ChoiceStatusDto::Failed => ChoiceStatus::Failed,
        }
    }
}

impl From<ChoiceStatus> for ChoiceStatusDto {
    fn from(value: ChoiceStatus) -> Self {
        match value {
            ChoiceStatus::InProgress => ChoiceStatusDto::InProgress,
            ChoiceStatus::Completed => ChoiceStatusDto::Completed,
            ChoiceStatus::Failed => ChoiceStatusDto::Failed,
        }
    }
}

/// One investigation slot, addressed structurally
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InvestigationRefDto {
    pub chapter: u8,
    pub slot: u8,
}

impl From<InvestigationRefDto> for InvestigationId {
    fn from(value: InvestigationRefDto) -> Self {
        InvestigationId::new(value.chapter, value.slot)
    }
}

impl From<InvestigationId> for InvestigationRefDto {
    fn from(value: InvestigationId) -> Self {
        Self {
            chapter: value.chapter,
            slot: value.slot,
        }
    }
}

/// Request to record a knight's choice for the current cycle
#[derive(Debug, Deserialize)]
pub struct SetChoiceRequestDto {
    pub character_id: String,
    pub kind: ChoiceKindDto,
    #[serde(default)]
    pub investigation: Option<InvestigationRefDto>,
}

impl SetChoiceRequestDto {
    /// Translate to the domain choice; `None` when an investigation choice
    /// arrives without a slot reference.
    pub fn to_choice(&self) -> Option<DelveChoice> {
        match self.kind {
            ChoiceKindDto::Quest => Some(DelveChoice::Quest),
            ChoiceKindDto::FreeRoam => Some(DelveChoice::FreeRoam),
            ChoiceKindDto::Investigation => {
                self.investigation.map(|inv| DelveChoice::Investigation(inv.into()))
            }
        }
    }
}

/// Request to resolve a knight's in-progress choice
#[derive(Debug, Deserialize)]
pub struct ChoiceStatusRequestDto {
    pub character_id: String,
    pub status: ChoiceStatusDto,
}

/// Request to pick the expedition's destination kingdom
#[derive(Debug, Deserialize)]
pub struct SetDestinationRequestDto {
    pub kingdom_id: String,
}

#[derive(Debug, Serialize)]
pub struct KnightChoiceDto {
    pub character_id: String,
    pub kind: ChoiceKindDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigation: Option<InvestigationRefDto>,
    pub status: ChoiceStatusDto,
}

impl From<&KnightChoice> for KnightChoiceDto {
    fn from(choice: &KnightChoice) -> Self {
        let (kind, investigation) = match choice.choice {
            DelveChoice::Quest => (ChoiceKindDto::Quest, None),
            DelveChoice::Investigation(id) => {
                (ChoiceKindDto::Investigation, Some(id.into()))
            }
            DelveChoice::FreeRoam => (ChoiceKindDto::FreeRoam, None),
        };
        Self {
            character_id: choice.character_id.to_string(),
            kind,
            investigation,
            status: choice.status.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpeditionResponseDto {
    pub phase: String,
    pub phase_started_at: DateTime<Utc>,
    pub destination: Option<String>,
    pub choices: Vec<KnightChoiceDto>,
}

impl From<&ExpeditionState> for ExpeditionResponseDto {
    fn from(state: &ExpeditionState) -> Self {
        Self {
            phase: state.phase.to_string(),
            phase_started_at: state.phase_started_at,
            destination: state.destination.as_ref().map(|k| k.to_string()),
            choices: state.choices.iter().map(KnightChoiceDto::from).collect(),
        }
    }
}

/// Reasons an expedition transition was blocked
#[derive(Debug, Serialize)]
pub struct BlockedResponseDto {
    pub blocked: Vec<String>,
}
