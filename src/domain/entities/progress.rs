//! Kingdom progress entity - the per-kingdom completion ledger

use std::collections::HashMap;

use crate::domain::value_objects::ContentId;

/// Completion counters for one kingdom's content, keyed by content id.
///
/// The id-keyed map is the canonical representation; counts are independent
/// across content ids. Created lazily on first write and never destroyed
/// on its own (it lives with the campaign).
#[derive(Debug, Clone, Default)]
pub struct KingdomProgress {
    entries: HashMap<ContentId, u32>,
}

impl KingdomProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for a content id, 0 when absent
    pub fn count(&self, content_id: &ContentId) -> u32 {
        self.entries.get(content_id).copied().unwrap_or(0)
    }

    /// Mark a single-attempt content unit as attempted.
    ///
    /// Idempotent: the count floors at 1 through this path and is never
    /// decreased if a repeatable delta already pushed it higher.
    pub fn record_single_attempt(&mut self, content_id: ContentId) {
        let entry = self.entries.entry(content_id).or_insert(0);
        *entry = (*entry).max(1);
    }

    /// Add a positive delta to a repeatable content unit's count
    pub fn add_delta(&mut self, content_id: ContentId, delta: u32) {
        *self.entries.entry(content_id).or_insert(0) += delta;
    }
}
