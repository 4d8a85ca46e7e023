//! Veritas Storage Layer
//!
//! Implements the ClaimStore trait with an in-memory, append-only store.
//!
//! # Architecture
//!
//! - Claims are kept in insertion order (reports must list them deterministically)
//! - A hash index gives O(1) lookup by identifier
//! - Relations are accepted as-is; referential integrity is the graph analyzer's job
//! - Sealing freezes the store once an audit run has been finalized;
//!   later mutations fail with [`StoreError::Sealed`]
//!
//! # Examples
//!
//! ```
//! use veritas_domain::{Claim, ClaimId, ClaimStore, SourceReference};
//! use veritas_store::MemoryClaimStore;
//!
//! let mut store = MemoryClaimStore::new();
//! let claim = Claim::new(ClaimId::new("A").unwrap(), "The sky is blue")
//!     .with_source(SourceReference::supporting("wiki:Sky", 0.9));
//! store.add_claim(claim).unwrap();
//! assert_eq!(store.len(), 1);
//! ```

#![warn(missing_docs)]

mod document;

pub use document::AuditDocument;

use std::collections::HashMap;
use thiserror::Error;
use veritas_domain::{Claim, ClaimId, ClaimStore, CoherenceEdge, VerificationStatus};

/// Errors that can occur during storage operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A claim with this identifier already exists
    #[error("Duplicate claim: {0}")]
    DuplicateClaim(ClaimId),

    /// Claim not found
    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The store was finalized and no longer accepts changes
    #[error("Store is sealed: the audit run has been finalized")]
    Sealed,

    /// Ingestion document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Ingestion document could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

/// In-memory implementation of ClaimStore
///
/// Claims are append-only within a run. Cloning the store is how callers take
/// an independent copy for a parallel run.
#[derive(Debug, Clone, Default)]
pub struct MemoryClaimStore {
    claims: Vec<Claim>,
    index: HashMap<ClaimId, usize>,
    relations: Vec<CoherenceEdge>,
    sealed: bool,
}

impl MemoryClaimStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of relations held
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn ensure_writable(&self) -> Result<(), StoreError> {
        if self.sealed {
            return Err(StoreError::Sealed);
        }
        Ok(())
    }

    /// Validate numeric ranges on a claim before accepting it
    fn validate_claim(claim: &Claim) -> Result<(), StoreError> {
        if let Some(confidence) = claim.confidence {
            if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
                return Err(StoreError::InvalidData(format!(
                    "Claim {} confidence {} is outside [0.0, 1.0]",
                    claim.id, confidence
                )));
            }
        }

        if let Some(source) = claim.sources.iter().find(|s| !s.has_valid_strength()) {
            return Err(StoreError::InvalidData(format!(
                "Claim {} source '{}' agreement strength {} is outside [0.0, 1.0]",
                claim.id, source.source_id, source.agreement_strength
            )));
        }

        Ok(())
    }
}

impl ClaimStore for MemoryClaimStore {
    type Error = StoreError;

    fn add_claim(&mut self, claim: Claim) -> Result<(), Self::Error> {
        self.ensure_writable()?;

        if self.index.contains_key(&claim.id) {
            return Err(StoreError::DuplicateClaim(claim.id));
        }

        Self::validate_claim(&claim)?;

        self.index.insert(claim.id.clone(), self.claims.len());
        self.claims.push(claim);
        Ok(())
    }

    fn get_claim(&self, id: &ClaimId) -> Result<&Claim, Self::Error> {
        self.index
            .get(id)
            .map(|&i| &self.claims[i])
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn all_claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    fn add_relation(&mut self, edge: CoherenceEdge) -> Result<(), Self::Error> {
        self.ensure_writable()?;
        self.relations.push(edge);
        Ok(())
    }

    fn relations(&self) -> impl Iterator<Item = &CoherenceEdge> {
        self.relations.iter()
    }

    fn set_status(&mut self, id: &ClaimId, status: VerificationStatus) -> Result<(), Self::Error> {
        self.ensure_writable()?;

        let i = *self
            .index
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.claims[i].status = status;
        Ok(())
    }

    fn seal(&mut self) {
        self.sealed = true;
    }

    fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn len(&self) -> usize {
        self.claims.len()
    }
}
