//! Score results - the immutable record of one audit run

use crate::aggregate::VrsBreakdown;
use crate::verification::SourceTally;
use crate::{AuditConfig, ScoreWeights};
use serde::{Deserialize, Serialize};
use veritas_domain::{ClaimId, VerificationStatus};

/// How a contradiction was settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Both claims verified, or neither: the contradiction stands
    Unresolved,

    /// Exactly one side was verified and wins
    Resolved {
        /// The verified claim
        winner: ClaimId,
        /// The claim marked contradicted
        loser: ClaimId,
    },
}

/// A `contradicts` relation found between two claims
///
/// `first` is always the lexicographically smaller identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContradictionFinding {
    /// Smaller claim identifier of the pair
    pub first: ClaimId,

    /// Larger claim identifier of the pair
    pub second: ClaimId,

    /// Status of `first` after source verification
    pub first_status: VerificationStatus,

    /// Status of `second` after source verification
    pub second_status: VerificationStatus,

    /// Outcome of the resolution pass
    pub resolution: Resolution,
}

impl ContradictionFinding {
    /// Whether the contradiction was resolved in favor of one claim
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }

    /// Whether the given claim is one side of this contradiction
    pub fn involves(&self, id: &ClaimId) -> bool {
        &self.first == id || &self.second == id
    }
}

/// A cycle in the `depends_on` subgraph (circular reasoning)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCycle {
    /// Lexicographically smallest claim in the cycle
    pub representative: ClaimId,

    /// All claims in the cycle, sorted
    pub members: Vec<ClaimId>,
}

/// Low-confidence signals attached to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// S defaulted to 100 because there were no claims
    VacuousSourceScore,

    /// T defaulted to 100 because there were no claims
    VacuousTraceabilityScore,
}

impl Signal {
    /// Human-readable description
    pub fn describe(&self) -> &'static str {
        match self {
            Signal::VacuousSourceScore => "S is vacuously 100: no claims to verify",
            Signal::VacuousTraceabilityScore => "T is vacuously 100: no claims to trace",
        }
    }
}

/// Per-claim outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimBreakdown {
    /// Claim identifier
    pub id: ClaimId,

    /// Status the extractor supplied
    pub initial_status: VerificationStatus,

    /// Status after verification and contradiction resolution
    pub final_status: VerificationStatus,

    /// How the claim's sources voted
    pub sources: SourceTally,

    /// Whether the claim cites at least one source
    pub cited: bool,

    /// Whether the claim is part of an unresolved contradiction
    pub in_unresolved_contradiction: bool,

    /// Whether the claim is part of a dependency cycle
    pub in_cycle: bool,

    /// Extractor confidence, if reported
    pub confidence: Option<f64>,
}

/// Immutable record of one audit run
///
/// Created once by the [`Auditor`](crate::Auditor) and never mutated; a re-run
/// produces a new value. Fields are read through accessors, and every count
/// is derived from the lists it summarizes, so a deserialized result can
/// never report totals that disagree with its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    source_score: f64,
    coherence_score: f64,
    traceability_score: f64,
    breakdown: VrsBreakdown,
    config: AuditConfig,
    claims: Vec<ClaimBreakdown>,
    contradictions: Vec<ContradictionFinding>,
    cycles: Vec<DependencyCycle>,
    signals: Vec<Signal>,
}

/// Inputs for [`ScoreResult::assemble`]
pub(crate) struct ScoreParts {
    pub source_score: f64,
    pub coherence_score: f64,
    pub traceability_score: f64,
    pub breakdown: VrsBreakdown,
    pub config: AuditConfig,
    pub claims: Vec<ClaimBreakdown>,
    pub contradictions: Vec<ContradictionFinding>,
    pub cycles: Vec<DependencyCycle>,
    pub signals: Vec<Signal>,
}

impl ScoreResult {
    pub(crate) fn assemble(parts: ScoreParts) -> Self {
        Self {
            source_score: parts.source_score,
            coherence_score: parts.coherence_score,
            traceability_score: parts.traceability_score,
            breakdown: parts.breakdown,
            config: parts.config,
            claims: parts.claims,
            contradictions: parts.contradictions,
            cycles: parts.cycles,
            signals: parts.signals,
        }
    }

    /// Source verification score S in [0, 100]
    pub fn source_score(&self) -> f64 {
        self.source_score
    }

    /// Coherence score C in [0, 100]
    pub fn coherence_score(&self) -> f64 {
        self.coherence_score
    }

    /// Traceability score T in [0, 100]
    pub fn traceability_score(&self) -> f64 {
        self.traceability_score
    }

    /// Veritas Reliability Score in [0, 100]
    pub fn vrs(&self) -> f64 {
        self.breakdown.vrs
    }

    /// Weighted contributions behind the VRS
    pub fn breakdown(&self) -> &VrsBreakdown {
        &self.breakdown
    }

    /// Weights used for aggregation
    pub fn weights(&self) -> &ScoreWeights {
        &self.breakdown.weights
    }

    /// Full configuration the run used
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Number of claims audited
    pub fn total_claims(&self) -> usize {
        self.claims.len()
    }

    /// Number of claims verified by their sources
    ///
    /// Resolution never demotes a verified claim, so this is also the number
    /// of claims whose final status is verified.
    pub fn verified_count(&self) -> usize {
        self.claims.iter().filter(|c| c.final_status.is_verified()).count()
    }

    /// Number of claims with at least one source reference
    pub fn cited_count(&self) -> usize {
        self.claims.iter().filter(|c| c.cited).count()
    }

    /// Number of unresolved contradictions
    pub fn contradiction_count(&self) -> usize {
        self.unresolved_contradictions().count()
    }

    /// Number of contradictions resolved in favor of a verified claim
    pub fn resolved_contradiction_count(&self) -> usize {
        self.resolved_contradictions().count()
    }

    /// Number of dependency cycles
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Per-claim breakdown in insertion order
    pub fn claims(&self) -> &[ClaimBreakdown] {
        &self.claims
    }

    /// Breakdown for a single claim
    pub fn claim(&self, id: &ClaimId) -> Option<&ClaimBreakdown> {
        self.claims.iter().find(|c| &c.id == id)
    }

    /// Every contradiction found, resolved or not, ordered by claim pair
    pub fn contradictions(&self) -> &[ContradictionFinding] {
        &self.contradictions
    }

    /// Contradictions that still stand
    pub fn unresolved_contradictions(&self) -> impl Iterator<Item = &ContradictionFinding> {
        self.contradictions.iter().filter(|c| !c.is_resolved())
    }

    /// Contradictions settled in favor of a verified claim
    pub fn resolved_contradictions(&self) -> impl Iterator<Item = &ContradictionFinding> {
        self.contradictions.iter().filter(|c| c.is_resolved())
    }

    /// Dependency cycles ordered by representative
    pub fn cycles(&self) -> &[DependencyCycle] {
        &self.cycles
    }

    /// Low-confidence signals
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Whether any score in this result is only vacuously true
    pub fn is_low_confidence(&self) -> bool {
        !self.signals.is_empty()
    }
}
