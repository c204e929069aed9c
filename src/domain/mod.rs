//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: CampaignMember, KingdomProgress, ExpeditionState
//! - Value Objects: ids, settings, choices, content definitions
//! - Aggregates: Campaign aggregate root
//! - Domain Services: Pure business logic operations (stage resolution)

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
