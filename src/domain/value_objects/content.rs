//! Static game-content definitions consumed through the catalog port
//!
//! The engine never authors this data; it reads it by id. Serde derives are
//! here because the catalog adapter loads the definitions from JSON and the
//! same shapes travel out through the API views.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ContentId, KingdomId, MonsterId};

/// One kingdom's full content definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KingdomDef {
    pub id: KingdomId,
    pub name: String,
    #[serde(default)]
    pub adventures: Vec<AdventureDef>,
    #[serde(default)]
    pub contracts: Vec<ContractDef>,
    #[serde(default)]
    pub bestiary: Option<BestiaryDef>,
}

/// A repeatable or one-shot adventure site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdventureDef {
    pub name: String,
    #[serde(default)]
    pub single_attempt: bool,
    /// Encounter roll notation shown on the sheet, when the site has one
    #[serde(default)]
    pub roll: Option<String>,
}

impl AdventureDef {
    pub fn content_id(&self, kingdom_id: &KingdomId) -> ContentId {
        ContentId::derive(kingdom_id, &self.name)
    }
}

/// A contract posted at the outpost board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDef {
    pub name: String,
    pub tier: u8,
    #[serde(default)]
    pub single_attempt: bool,
    pub objective: String,
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub reward: String,
}

impl ContractDef {
    pub fn content_id(&self, kingdom_id: &KingdomId) -> ContentId {
        ContentId::derive(kingdom_id, &self.name)
    }
}

/// A kingdom's bestiary: monster roster plus the flat difficulty table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestiaryDef {
    #[serde(default)]
    pub monsters: Vec<MonsterDef>,
    /// Four rows per chapter, indexed by chapter and milestone ordinal.
    /// Fixed contract with the content catalog format.
    #[serde(default)]
    pub stages: Vec<StageRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterDef {
    pub id: MonsterId,
    pub name: String,
}

/// One ordinal slice of the difficulty table.
///
/// `None` means the monster is not present at this stage and reads as 0.
pub type StageRow = HashMap<MonsterId, Option<i32>>;

/// Completion is only meaningful for single-attempt content; repeatable
/// content accumulates and never "completes".
pub fn is_single_attempt_completed(single_attempt: bool, count: u32) -> bool {
    single_attempt && count >= 1
}
