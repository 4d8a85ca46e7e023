//! Owned copy of a store's contents taken at the start of a run

use veritas_domain::{Claim, ClaimStore, CoherenceEdge};

/// Claims and relations captured from a [`ClaimStore`]
///
/// Every pass of an audit reads the same snapshot, so scores never observe
/// a half-updated store. Snapshots are plain owned data and can be shared
/// across worker threads behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditSnapshot {
    claims: Vec<Claim>,
    relations: Vec<CoherenceEdge>,
}

impl AuditSnapshot {
    /// Build a snapshot from claims and relations directly
    pub fn new(claims: Vec<Claim>, relations: Vec<CoherenceEdge>) -> Self {
        Self { claims, relations }
    }

    /// Copy the current contents of a store, preserving insertion order
    pub fn capture<S: ClaimStore>(store: &S) -> Self {
        Self {
            claims: store.all_claims().cloned().collect(),
            relations: store.relations().cloned().collect(),
        }
    }

    /// Claims in insertion order
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Relations in insertion order
    pub fn relations(&self) -> &[CoherenceEdge] {
        &self.relations
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the snapshot holds no claims
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
