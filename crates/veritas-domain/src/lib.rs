//! Veritas Domain Layer
//!
//! This crate contains the core domain model for the Veritas audit engine.
//! It defines the fundamental concepts, value objects, and the store trait
//! that every other layer depends upon. It carries no infrastructure: the
//! only external crates are `uuid` (identifier generation) and `serde`
//! (so claims can travel through ingestion documents and reports).
//!
//! ## Key Concepts
//!
//! - **Claim**: An atomic assertion extracted from audited output
//! - **Source Reference**: An authoritative source consulted for a claim
//! - **Verification Status**: unverified, verified, contradicted, unsupported
//! - **Coherence Edge**: A directed `depends_on` or `contradicts` relation
//!
//! ## Architecture
//!
//! - Pure domain logic only
//! - Storage implementations live in `veritas-store`
//! - Scoring lives in `veritas-audit`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod relationship;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, VerificationStatus};
pub use relationship::{CoherenceEdge, RelationType};
pub use source::SourceReference;
pub use traits::ClaimStore;
