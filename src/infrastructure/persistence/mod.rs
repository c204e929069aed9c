//! Persistence adapters
//!
//! This module implements the repository port over an in-process store.

mod memory;

pub use memory::InMemoryCampaignRepository;
