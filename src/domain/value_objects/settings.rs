//! Campaign settings value object
//!
//! Settings carry serde derives because they are transmitted via the REST
//! API for UI configuration; the JSON schema is the API contract.

use serde::{Deserialize, Serialize};

/// Per-campaign table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSettings {
    /// How many players sit at the table
    pub player_count: PlayerCount,
    /// Free-text table notes (house rules, scheduling, anything)
    pub notes: String,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            player_count: PlayerCount::One,
            notes: String::new(),
        }
    }
}

/// Player-count mode for a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCount {
    One,
    Two,
    Three,
    Four,
}
