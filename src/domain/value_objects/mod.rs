//! Value objects - Immutable objects defined by their attributes

mod choice;
mod content;
mod ids;
mod settings;

pub use choice::{ChoiceStatus, DelveChoice, KnightChoice};
pub use content::{
    is_single_attempt_completed, AdventureDef, BestiaryDef, ContractDef, KingdomDef, MonsterDef,
    StageRow,
};
pub use ids::{
    CampaignId, CharacterId, ContentId, InvestigationId, KingdomId, MonsterId, TemplateId,
};
pub use settings::{CampaignSettings, PlayerCount};
