//! Static content catalog
//!
//! Kingdom definitions are authored as a JSON array and loaded once at
//! startup. The catalog never changes while the engine runs, so lookups
//! clone from an immutable in-memory list.

use std::path::Path;

use tracing::info;

use crate::application::ports::outbound::ContentCatalogPort;
use crate::domain::value_objects::{KingdomDef, KingdomId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read content catalog at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse content catalog at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct StaticCatalog {
    kingdoms: Vec<KingdomDef>,
}

impl StaticCatalog {
    pub fn from_definitions(kingdoms: Vec<KingdomDef>) -> Self {
        Self { kingdoms }
    }

    /// Load the catalog from a JSON file containing an array of kingdoms
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let kingdoms: Vec<KingdomDef> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        info!(
            kingdoms = kingdoms.len(),
            path = %path.display(),
            "Content catalog loaded"
        );
        Ok(Self::from_definitions(kingdoms))
    }
}

impl ContentCatalogPort for StaticCatalog {
    fn kingdom(&self, id: &KingdomId) -> Option<KingdomDef> {
        self.kingdoms.iter().find(|k| &k.id == id).cloned()
    }

    fn kingdoms(&self) -> Vec<KingdomDef> {
        self.kingdoms.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AdventureDef;

    fn stone() -> KingdomDef {
        KingdomDef {
            id: KingdomId::from("stone"),
            name: "Stonemarch".to_string(),
            adventures: vec![AdventureDef {
                name: "Sunken Crypt".to_string(),
                single_attempt: true,
                roll: None,
            }],
            contracts: vec![],
            bestiary: None,
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = StaticCatalog::from_definitions(vec![stone()]);
        assert_eq!(
            catalog.kingdom(&KingdomId::from("stone")).map(|k| k.name),
            Some("Stonemarch".to_string())
        );
        assert!(catalog.kingdom(&KingdomId::from("ash")).is_none());
    }

    #[test]
    fn parses_a_json_array() {
        let json = serde_json::to_string(&vec![stone()]).unwrap();
        let dir = std::env::temp_dir().join("delvemark-catalog-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");
        std::fs::write(&path, json).unwrap();

        let catalog = StaticCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.kingdoms().len(), 1);
    }
}
