//! Application services - Use case implementations
//!
//! This module contains the application services that implement the use cases
//! for the Delvemark Engine. Each service follows hexagonal architecture
//! principles, accepting its outbound ports and returning domain values or
//! structured outcomes.

pub mod campaign_service;
pub mod expedition_service;
pub mod progress_service;
pub mod roster_service;
pub mod stage_service;

// Re-export campaign service types
pub use campaign_service::{
    CampaignService, CampaignServiceImpl, CreateCampaignRequest, UpdateCampaignRequest,
};

// Re-export roster service types
pub use roster_service::{RosterService, RosterServiceImpl};

// Re-export progress service types
#[allow(unused_imports)]
pub use progress_service::{AdventureView, ContractView, ProgressService, ProgressServiceImpl};

// Re-export stage service types
pub use stage_service::{StageService, StageServiceImpl};

// Re-export expedition service types
pub use expedition_service::{
    ChoiceOutcome, ExpeditionService, ExpeditionServiceImpl, PhaseAdvance,
};
