//! Strongly-typed identifiers for domain entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(CampaignId);

/// Identifiers owned by external catalogs (character roster, kingdom
/// content). Opaque strings from the engine's point of view.
macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_key!(CharacterId);
define_key!(TemplateId);
define_key!(KingdomId);
define_key!(MonsterId);

/// Stable key for one content unit (adventure, contract) inside a kingdom.
///
/// Derived as `{kingdomId}:{slug(name)}` so the same human-readable name
/// always maps to the same ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Derive the content id from a kingdom and a human-readable name.
    pub fn derive(kingdom_id: &KingdomId, name: &str) -> Self {
        Self(format!("{}:{}", kingdom_id.as_str(), slugify(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Lower-case, collapse runs of non-alphanumerics to a single hyphen,
/// trim leading/trailing hyphens.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// One of the five chapter-scoped investigation slots.
///
/// Five slots per chapter is a fixed rule of the game, so the identifier is
/// structural rather than catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvestigationId {
    pub chapter: u8,
    pub slot: u8,
}

impl InvestigationId {
    pub const SLOTS_PER_CHAPTER: u8 = 5;

    pub fn new(chapter: u8, slot: u8) -> Self {
        Self { chapter, slot }
    }

    /// All slots for one chapter, in slot order.
    pub fn slots_for_chapter(chapter: u8) -> impl Iterator<Item = Self> {
        (1..=Self::SLOTS_PER_CHAPTER).map(move |slot| Self { chapter, slot })
    }
}

impl std::fmt::Display for InvestigationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}-i{}", self.chapter, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_slugifies_names() {
        let kingdom = KingdomId::from("stone");
        let id = ContentId::derive(&kingdom, "The Weeping Mire!");
        assert_eq!(id.as_str(), "stone:the-weeping-mire");
    }

    #[test]
    fn content_id_collapses_separator_runs() {
        let kingdom = KingdomId::from("ash");
        let id = ContentId::derive(&kingdom, "  Gate -- of / Embers  ");
        assert_eq!(id.as_str(), "ash:gate-of-embers");
    }

    #[test]
    fn content_id_distinct_for_distinct_names() {
        let kingdom = KingdomId::from("stone");
        let a = ContentId::derive(&kingdom, "Old Road");
        let b = ContentId::derive(&kingdom, "Old Roads");
        assert_ne!(a, b);
    }

    #[test]
    fn investigation_slots_cover_chapter() {
        let slots: Vec<_> = InvestigationId::slots_for_chapter(2).collect();
        assert_eq!(slots.len(), 5);
        assert_eq!(slots[0], InvestigationId::new(2, 1));
        assert_eq!(slots[4], InvestigationId::new(2, 5));
    }
}
