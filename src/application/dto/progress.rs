//! Progress ledger DTOs - merged catalog/ledger views and ledger mutations

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::services::progress_service::{AdventureView, ContractView};
use crate::domain::services::BestiaryStage;

/// Request to mark a single-attempt content unit as attempted
#[derive(Debug, Deserialize)]
pub struct SingleAttemptRequestDto {
    /// Human-readable content name; the ledger key is derived from it
    pub name: String,
}

/// Request to add progress to a repeatable content unit
#[derive(Debug, Deserialize)]
pub struct DeltaRequestDto {
    pub name: String,
    pub delta: u32,
}

/// Adventure definition merged with live progress
#[derive(Debug, Serialize)]
pub struct AdventureViewDto {
    pub id: String,
    pub name: String,
    pub single_attempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<String>,
    pub completed_count: u32,
    pub completed: bool,
}

impl From<AdventureView> for AdventureViewDto {
    fn from(view: AdventureView) -> Self {
        Self {
            id: view.id.to_string(),
            name: view.definition.name,
            single_attempt: view.definition.single_attempt,
            roll: view.definition.roll,
            completed_count: view.completed_count,
            completed: view.completed,
        }
    }
}

/// Contract definition merged with live progress
#[derive(Debug, Serialize)]
pub struct ContractViewDto {
    pub id: String,
    pub name: String,
    pub tier: u8,
    pub single_attempt: bool,
    pub objective: String,
    pub setup: String,
    pub reward: String,
    pub completed_count: u32,
    pub completed: bool,
}

impl From<ContractView> for ContractViewDto {
    fn from(view: ContractView) -> Self {
        Self {
            id: view.id.to_string(),
            name: view.definition.name,
            tier: view.definition.tier,
            single_attempt: view.definition.single_attempt,
            objective: view.definition.objective,
            setup: view.definition.setup,
            reward: view.definition.reward,
            completed_count: view.completed_count,
            completed: view.completed,
        }
    }
}

/// The resolved bestiary stage row for display
#[derive(Debug, Serialize)]
pub struct BestiaryStageDto {
    pub has_chapter: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_index: Option<usize>,
    pub row: HashMap<String, i32>,
}

impl From<BestiaryStage> for BestiaryStageDto {
    fn from(stage: BestiaryStage) -> Self {
        Self {
            has_chapter: stage.has_chapter,
            stage_index: stage.stage_index,
            row: stage
                .row
                .into_iter()
                .map(|(monster, value)| (monster.to_string(), value))
                .collect(),
        }
    }
}
