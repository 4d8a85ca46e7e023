//! Source references - the evidence consulted for a claim

use serde::{Deserialize, Serialize};

/// An external authoritative source consulted for a claim
///
/// A reference either supports or opposes its claim, with an agreement
/// strength in [0.0, 1.0]. References are owned by the claim that cites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    /// Source identifier (e.g., "doi:10.1000/182", "wiki:Boiling_point")
    pub source_id: String,

    /// Whether the source supports (true) or opposes (false) the claim
    pub supports_claim: bool,

    /// Strength of agreement [0.0, 1.0]
    pub agreement_strength: f64,
}

impl SourceReference {
    /// Create a new source reference
    pub fn new(source_id: impl Into<String>, supports_claim: bool, agreement_strength: f64) -> Self {
        Self {
            source_id: source_id.into(),
            supports_claim,
            agreement_strength,
        }
    }

    /// Create a reference that supports its claim
    pub fn supporting(source_id: impl Into<String>, agreement_strength: f64) -> Self {
        Self::new(source_id, true, agreement_strength)
    }

    /// Create a reference that opposes its claim
    pub fn opposing(source_id: impl Into<String>, agreement_strength: f64) -> Self {
        Self::new(source_id, false, agreement_strength)
    }

    /// Check that the agreement strength is a finite value in [0, 1]
    pub fn has_valid_strength(&self) -> bool {
        self.agreement_strength.is_finite() && (0.0..=1.0).contains(&self.agreement_strength)
    }
}
