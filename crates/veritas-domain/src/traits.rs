//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Claim, ClaimId, CoherenceEdge, VerificationStatus};

/// Trait for storing and retrieving claims within one audit run
///
/// Implemented by the infrastructure layer (veritas-store).
/// Stores are append-only: there is no delete operation.
pub trait ClaimStore {
    /// Error type for store operations
    type Error;

    /// Add a new claim; fails if a claim with the same ID already exists
    fn add_claim(&mut self, claim: Claim) -> Result<(), Self::Error>;

    /// Get a claim by ID; fails if the claim is absent
    fn get_claim(&self, id: &ClaimId) -> Result<&Claim, Self::Error>;

    /// Iterate over all claims in insertion order
    ///
    /// The iterator is lazy; calling this again restarts from the first claim.
    fn all_claims(&self) -> impl Iterator<Item = &Claim>;

    /// Record a relation between two claims
    fn add_relation(&mut self, edge: CoherenceEdge) -> Result<(), Self::Error>;

    /// Iterate over all relations in insertion order
    fn relations(&self) -> impl Iterator<Item = &CoherenceEdge>;

    /// Overwrite the verification status of an existing claim
    fn set_status(&mut self, id: &ClaimId, status: VerificationStatus) -> Result<(), Self::Error>;

    /// Freeze the store once an audit run is finalized
    ///
    /// After sealing, every mutating operation must fail.
    fn seal(&mut self);

    /// Whether the store has been sealed
    fn is_sealed(&self) -> bool;

    /// Number of claims held
    fn len(&self) -> usize {
        self.all_claims().count()
    }

    /// Whether the store holds no claims
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
