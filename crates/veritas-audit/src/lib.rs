//! Veritas Audit
//!
//! Coherence and triangulation scoring for extracted claims.
//!
//! # Overview
//!
//! An audit run reads a snapshot of a [`ClaimStore`](veritas_domain::ClaimStore)
//! and produces a [`ScoreResult`] built from three component scores:
//!
//! - **S (source verification)**: share of claims backed by a supporting
//!   source at or above the agreement threshold
//! - **C (coherence)**: 100 minus a penalty per unresolved contradiction
//!   (and, optionally, per dependency cycle)
//! - **T (traceability)**: share of claims citing at least one source
//!
//! combined as `VRS = w1·S + w2·C + w3·T` with weights that must sum to 1.0.
//!
//! # Pipeline
//!
//! | Pass | Reads | Produces |
//! |------|-------|----------|
//! | Graph | relations | contradiction pairs, dependency cycles (Tarjan SCC) |
//! | Verification | sources | per-claim status, S |
//! | Traceability | sources | per-claim citation flag, T |
//! | Coherence | graph + statuses | resolved/unresolved contradictions, C |
//! | Aggregation | S, C, T | VRS with weighted contributions |
//!
//! The first three passes are independent; [`AuditWorker::audit_concurrent`]
//! runs them in parallel and produces the same result as
//! [`Auditor::run_audit`].
//!
//! # Usage
//!
//! ```
//! use veritas_audit::{run_audit, AuditConfig};
//! use veritas_domain::{Claim, ClaimId, ClaimStore, CoherenceEdge, SourceReference};
//! use veritas_store::MemoryClaimStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = MemoryClaimStore::new();
//! let a = ClaimId::new("A")?;
//! let b = ClaimId::new("B")?;
//! store.add_claim(
//!     Claim::new(a.clone(), "The bridge opened in 1932")
//!         .with_source(SourceReference::supporting("city-archive", 0.9)),
//! )?;
//! store.add_claim(Claim::new(b.clone(), "The bridge opened in 1936"))?;
//! store.add_relation(CoherenceEdge::contradicts(a, b.clone()))?;
//!
//! let result = run_audit(&store, AuditConfig::default())?;
//! assert_eq!(result.contradiction_count(), 0);
//! assert_eq!(result.resolved_contradiction_count(), 1);
//! println!("VRS: {:.2}", result.vrs());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [audit]
//! threshold = 0.5
//! penalty_factor = 10.0
//! cycle_penalty = 0.0
//!
//! [audit.weights]
//! w1 = 0.4
//! w2 = 0.4
//! w3 = 0.2
//! ```

#![warn(missing_docs)]

mod aggregate;
mod auditor;
mod coherence;
mod config;
mod error;
mod graph;
mod result;
mod snapshot;
mod traceability;
mod verification;
mod worker;

pub use aggregate::{compute_vrs, VrsBreakdown, MAX_SCORE};
pub use auditor::{run_audit, Auditor};
pub use coherence::{CoherenceAnalyzer, CoherenceOutcome};
pub use config::{AuditConfig, ScoreWeights, DEFAULT_PENALTY_FACTOR, DEFAULT_THRESHOLD, WEIGHT_TOLERANCE};
pub use error::AuditError;
pub use graph::CoherenceGraph;
pub use result::{ClaimBreakdown, ContradictionFinding, DependencyCycle, Resolution, ScoreResult, Signal};
pub use snapshot::AuditSnapshot;
pub use traceability::{TraceabilityOutcome, TraceabilityScorer};
pub use verification::{SourceTally, SourceVerificationScorer, VerificationOutcome};
pub use worker::AuditWorker;
