//! Domain entities - Core business objects with identity

mod expedition;
mod member;
mod progress;

pub use expedition::{ExpeditionPhase, ExpeditionState};
pub use member::{CampaignMember, ChapterProgress};
pub use progress::KingdomProgress;
