//! Repository ports - Interfaces for campaign persistence
//!
//! These traits define the contracts that infrastructure repositories must
//! implement. Application services depend on these traits, not concrete
//! implementations. The engine mutates campaigns copy-on-write: a mutator
//! reads the current record, modifies its copy, and replaces it atomically
//! via `update`.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::aggregates::Campaign;
use crate::domain::value_objects::CampaignId;

/// Repository port for Campaign aggregate operations
#[async_trait]
pub trait CampaignRepositoryPort: Send + Sync {
    /// Store a new campaign
    async fn create(&self, campaign: &Campaign) -> Result<()>;

    /// Get a campaign by ID
    async fn get(&self, id: CampaignId) -> Result<Option<Campaign>>;

    /// List all campaigns
    async fn list(&self) -> Result<Vec<Campaign>>;

    /// Replace a campaign's record atomically
    async fn update(&self, campaign: &Campaign) -> Result<()>;

    /// Delete a campaign and everything it owns
    async fn delete(&self, id: CampaignId) -> Result<()>;
}
