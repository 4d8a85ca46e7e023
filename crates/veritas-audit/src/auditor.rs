//! Audit engine - runs every pass over a snapshot and assembles the result

use crate::coherence::CoherenceAnalyzer;
use crate::graph::CoherenceGraph;
use crate::result::ScoreParts;
use crate::traceability::{TraceabilityOutcome, TraceabilityScorer};
use crate::verification::{SourceVerificationScorer, VerificationOutcome};
use crate::{compute_vrs, AuditConfig, AuditError, AuditSnapshot, ClaimBreakdown, ScoreResult, Signal};
use std::collections::HashSet;
use std::time::Instant;
use veritas_domain::{ClaimId, ClaimStore};

/// Runs audits with a fixed, validated configuration
///
/// A run never mutates the store it reads: it works on an
/// [`AuditSnapshot`], so repeated runs over the same store produce identical
/// results. Writing the final statuses back is a separate, explicit step
/// ([`Auditor::finalize`]).
///
/// # Examples
///
/// ```
/// use veritas_audit::{Auditor, AuditConfig};
/// use veritas_domain::{Claim, ClaimId, ClaimStore, SourceReference};
/// use veritas_store::MemoryClaimStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = MemoryClaimStore::new();
/// store.add_claim(
///     Claim::new(ClaimId::new("A")?, "Water boils at 100C at sea level")
///         .with_source(SourceReference::supporting("physics-handbook", 0.9)),
/// )?;
///
/// let auditor = Auditor::new(AuditConfig::default())?;
/// let result = auditor.run_audit(&store)?;
/// assert_eq!(result.source_score(), 100.0);
///
/// auditor.finalize(&mut store, &result)?;
/// assert!(store.is_sealed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    /// Create an auditor, validating the configuration first
    ///
    /// # Errors
    ///
    /// [`AuditError::InvalidWeight`] or [`AuditError::InvalidConfig`]
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an auditor with the default configuration
    pub fn default_config() -> Self {
        Self {
            config: AuditConfig::default(),
        }
    }

    /// Configuration this auditor runs with
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit the current contents of a store
    ///
    /// Any failure fails the whole run; no partial result is returned.
    pub fn run_audit<S: ClaimStore>(&self, store: &S) -> Result<ScoreResult, AuditError> {
        self.audit_snapshot(&AuditSnapshot::capture(store))
    }

    /// Audit an already captured snapshot
    pub fn audit_snapshot(&self, snapshot: &AuditSnapshot) -> Result<ScoreResult, AuditError> {
        tracing::info!(
            "Starting audit: {} claims, {} relations",
            snapshot.len(),
            snapshot.relations().len()
        );

        // Graph first: a malformed graph fails before any scoring work
        let graph = self.graph_pass(snapshot)?;
        let verification = self.verification_pass(snapshot);
        let traceability = self.traceability_pass(snapshot);

        self.assemble(snapshot, &graph, verification, traceability)
    }

    /// Write a run's final statuses into the store, then seal it
    ///
    /// # Errors
    ///
    /// [`AuditError::Store`] if the store is already sealed or lacks a claim
    /// the result covers (for example, the result came from another store).
    /// Both are checked before any status is written, so a failed call leaves
    /// the store untouched.
    pub fn finalize<S>(&self, store: &mut S, result: &ScoreResult) -> Result<(), AuditError>
    where
        S: ClaimStore,
        S::Error: std::fmt::Display,
    {
        if store.is_sealed() {
            return Err(AuditError::Store("store is already sealed".to_string()));
        }
        // Every claim must exist before anything is written
        for claim in result.claims() {
            store
                .get_claim(&claim.id)
                .map_err(|e| AuditError::Store(e.to_string()))?;
        }

        for claim in result.claims() {
            store
                .set_status(&claim.id, claim.final_status)
                .map_err(|e| AuditError::Store(e.to_string()))?;
        }
        store.seal();

        tracing::info!("Finalized audit: {} claim statuses written, store sealed", result.claims().len());
        Ok(())
    }

    pub(crate) fn graph_pass(&self, snapshot: &AuditSnapshot) -> Result<CoherenceGraph, AuditError> {
        let start = Instant::now();
        let graph = CoherenceGraph::build(snapshot.claims(), snapshot.relations())?;
        tracing::debug!("Graph pass finished in {:?}", start.elapsed());
        Ok(graph)
    }

    pub(crate) fn verification_pass(&self, snapshot: &AuditSnapshot) -> VerificationOutcome {
        let start = Instant::now();
        let outcome = SourceVerificationScorer::new(self.config.threshold).score(snapshot.claims());
        tracing::debug!(
            "Verification pass finished in {:?}: {} of {} verified",
            start.elapsed(),
            outcome.verified_count,
            snapshot.len()
        );
        outcome
    }

    pub(crate) fn traceability_pass(&self, snapshot: &AuditSnapshot) -> TraceabilityOutcome {
        let start = Instant::now();
        let outcome = TraceabilityScorer.score(snapshot.claims());
        tracing::debug!(
            "Traceability pass finished in {:?}: {} of {} cited",
            start.elapsed(),
            outcome.cited_count,
            snapshot.len()
        );
        outcome
    }

    /// Resolve contradictions against the verification statuses, aggregate,
    /// and build the result
    pub(crate) fn assemble(
        &self,
        snapshot: &AuditSnapshot,
        graph: &CoherenceGraph,
        verification: VerificationOutcome,
        traceability: TraceabilityOutcome,
    ) -> Result<ScoreResult, AuditError> {
        let start = Instant::now();

        let mut statuses = verification.statuses;
        let coherence = CoherenceAnalyzer::from_config(&self.config).analyze(graph, &mut statuses);

        let breakdown = compute_vrs(
            verification.score,
            coherence.score,
            traceability.score,
            &self.config.weights,
        )?;

        let mut signals = Vec::new();
        if verification.vacuous {
            signals.push(Signal::VacuousSourceScore);
        }
        if traceability.vacuous {
            signals.push(Signal::VacuousTraceabilityScore);
        }
        if snapshot.is_empty() {
            tracing::warn!("Audit ran over zero claims; S and T are vacuously 100");
        }

        let contested: HashSet<&ClaimId> = coherence
            .findings
            .iter()
            .filter(|f| !f.is_resolved())
            .flat_map(|f| [&f.first, &f.second])
            .collect();
        let cyclic: HashSet<&ClaimId> = coherence.cycles.iter().flat_map(|c| c.members.iter()).collect();

        let claims: Vec<ClaimBreakdown> = snapshot
            .claims()
            .iter()
            .enumerate()
            .map(|(i, claim)| ClaimBreakdown {
                id: claim.id.clone(),
                initial_status: claim.status,
                final_status: statuses[i],
                sources: verification.tallies[i],
                cited: traceability.cited[i],
                in_unresolved_contradiction: contested.contains(&claim.id),
                in_cycle: cyclic.contains(&claim.id),
                confidence: claim.confidence,
            })
            .collect();

        let result = ScoreResult::assemble(ScoreParts {
            source_score: verification.score,
            coherence_score: coherence.score,
            traceability_score: traceability.score,
            breakdown,
            config: self.config.clone(),
            claims,
            contradictions: coherence.findings,
            cycles: coherence.cycles,
            signals,
        });

        tracing::debug!("Aggregation finished in {:?}", start.elapsed());
        tracing::info!(
            "Audit complete: VRS {:.2} (S {:.2}, C {:.2}, T {:.2}), {} unresolved contradictions, {} cycles",
            result.vrs(),
            result.source_score(),
            result.coherence_score(),
            result.traceability_score(),
            result.contradiction_count(),
            result.cycle_count()
        );

        Ok(result)
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::default_config()
    }
}

/// One-shot audit of a store with the given configuration
///
/// Equivalent to `Auditor::new(config)?.run_audit(store)`.
pub fn run_audit<S: ClaimStore>(store: &S, config: AuditConfig) -> Result<ScoreResult, AuditError> {
    Auditor::new(config)?.run_audit(store)
}
