//! VRS aggregation - combines S, C and T into the Veritas Reliability Score

use crate::{AuditError, ScoreWeights};
use serde::{Deserialize, Serialize};

/// Upper bound of every score
pub const MAX_SCORE: f64 = 100.0;

/// `100 × numerator / total`, or 100 when `total` is zero
pub(crate) fn ratio_score(numerator: usize, total: usize) -> f64 {
    if total == 0 {
        return MAX_SCORE;
    }
    MAX_SCORE * (numerator as f64 / total as f64)
}

/// The VRS together with how each component contributed to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VrsBreakdown {
    /// Final score in [0, 100]
    pub vrs: f64,

    /// Weights used
    pub weights: ScoreWeights,

    /// w1 · S
    pub source_contribution: f64,

    /// w2 · C
    pub coherence_contribution: f64,

    /// w3 · T
    pub traceability_contribution: f64,
}

/// Compute `VRS = w1·S + w2·C + w3·T`
///
/// Fails with [`AuditError::InvalidWeight`] unless the weights are
/// non-negative and sum to 1.0 within tolerance. Component scores are clamped
/// into [0, 100] first, and the result is clamped again so tolerance drift
/// can never push the VRS past 100.
///
/// # Examples
///
/// ```
/// use veritas_audit::{compute_vrs, ScoreWeights};
///
/// let breakdown = compute_vrs(80.0, 70.0, 90.0, &ScoreWeights::default()).unwrap();
/// assert!((breakdown.vrs - 78.0).abs() < 1e-9);
/// ```
pub fn compute_vrs(s: f64, c: f64, t: f64, weights: &ScoreWeights) -> Result<VrsBreakdown, AuditError> {
    weights.validate()?;

    for (name, value) in [("S", s), ("C", c), ("T", t)] {
        if !value.is_finite() {
            return Err(AuditError::InvalidConfig(format!("{} must be a finite score, got {}", name, value)));
        }
    }

    let source_contribution = weights.w1 * s.clamp(0.0, MAX_SCORE);
    let coherence_contribution = weights.w2 * c.clamp(0.0, MAX_SCORE);
    let traceability_contribution = weights.w3 * t.clamp(0.0, MAX_SCORE);

    let vrs = (source_contribution + coherence_contribution + traceability_contribution).clamp(0.0, MAX_SCORE);

    Ok(VrsBreakdown {
        vrs,
        weights: *weights,
        source_contribution,
        coherence_contribution,
        traceability_contribution,
    })
}
