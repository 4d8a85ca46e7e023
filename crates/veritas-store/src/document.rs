//! Ingestion documents
//!
//! An [`AuditDocument`] is the serialized hand-off from the extraction stage:
//! the claims (with their source references) plus the inter-claim relations.
//! Extractors usually emit JSON; fixtures are easier to write in TOML:
//!
//! ```toml
//! [[claims]]
//! id = "A"
//! text = "Water boils at 100C at sea level"
//! sources = [{ source_id = "wiki:Boiling_point", supports_claim = true, agreement_strength = 0.9 }]
//!
//! [[claims]]
//! id = "B"
//! text = "Water boils at 90C at sea level"
//!
//! [[relations]]
//! from = "A"
//! to = "B"
//! relation = "contradicts"
//! ```

use crate::{MemoryClaimStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use veritas_domain::{Claim, ClaimStore, CoherenceEdge};

/// Claims and relations to load into a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditDocument {
    /// Claims in extraction order
    #[serde(default)]
    pub claims: Vec<Claim>,

    /// Relations between claims
    #[serde(default)]
    pub relations: Vec<CoherenceEdge>,
}

impl AuditDocument {
    /// Parse a document from JSON
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Parse(format!("Invalid JSON document: {}", e)))
    }

    /// Parse a document from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, StoreError> {
        toml::from_str(toml_str).map_err(|e| StoreError::Parse(format!("Invalid TOML document: {}", e)))
    }

    /// Read a document from disk, choosing the format by file extension
    ///
    /// `.toml` files are parsed as TOML; anything else is parsed as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    /// Capture the contents of any store as a document
    pub fn from_store<S: ClaimStore>(store: &S) -> Self {
        Self {
            claims: store.all_claims().cloned().collect(),
            relations: store.relations().cloned().collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Parse(e.to_string()))
    }
}

impl MemoryClaimStore {
    /// Build a store from an ingestion document
    ///
    /// Claims are added first, then relations. The first failure (duplicate
    /// identifier, out-of-range strength) aborts the load.
    pub fn from_document(document: AuditDocument) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for claim in document.claims {
            store.add_claim(claim)?;
        }
        for edge in document.relations {
            store.add_relation(edge)?;
        }
        Ok(store)
    }
}
