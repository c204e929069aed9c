//! Content catalog port - read-only access to static game content
//!
//! Kingdom, adventure, contract, and bestiary definitions are authored
//! outside this engine and looked up by id. Lookups are synchronous: the
//! catalog is loaded once and held in memory.

use crate::domain::value_objects::{KingdomDef, KingdomId};

pub trait ContentCatalogPort: Send + Sync {
    /// Look up one kingdom's definition
    fn kingdom(&self, id: &KingdomId) -> Option<KingdomDef>;

    /// All kingdoms, in catalog order
    fn kingdoms(&self) -> Vec<KingdomDef>;
}
