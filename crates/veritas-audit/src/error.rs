//! Error types for audit runs

use thiserror::Error;
use veritas_domain::ClaimId;

/// Errors that can occur during an audit run
///
/// Every variant is fatal to the run that raised it: no partial
/// [`ScoreResult`](crate::ScoreResult) is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// Weights are not a normalized convex combination
    #[error("Invalid weights: w1={w1}, w2={w2}, w3={w3} (sum {sum}); weights must be non-negative and sum to 1.0")]
    InvalidWeight {
        /// Weight on the source verification score
        w1: f64,
        /// Weight on the coherence score
        w2: f64,
        /// Weight on the traceability score
        w3: f64,
        /// Sum of the three weights
        sum: f64,
    },

    /// An edge references a missing claim, or a claim contradicts itself
    #[error("Malformed coherence graph: edge {from} -> {to}: {reason}")]
    MalformedGraph {
        /// Source claim of the offending edge
        from: ClaimId,
        /// Target claim of the offending edge
        to: ClaimId,
        /// What is wrong with the edge
        reason: String,
    },

    /// Configuration error (threshold or penalty out of range, unreadable file)
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Storage layer error while finalizing a run
    #[error("Store error: {0}")]
    Store(String),

    /// Worker error (tokio task failed to join)
    #[error("Worker error: {0}")]
    Worker(String),
}
