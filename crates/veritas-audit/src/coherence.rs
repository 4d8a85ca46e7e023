//! Coherence analysis - contradiction resolution, circular reasoning, and C

use crate::aggregate::MAX_SCORE;
use crate::graph::CoherenceGraph;
use crate::{AuditConfig, ContradictionFinding, DependencyCycle, Resolution};
use veritas_domain::VerificationStatus;

/// Outcome of the coherence pass over a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct CoherenceOutcome {
    /// Every contradiction, resolved or not, ordered by claim pair
    pub findings: Vec<ContradictionFinding>,

    /// Dependency cycles ordered by representative
    pub cycles: Vec<DependencyCycle>,

    /// Contradictions still standing after resolution
    pub unresolved_count: usize,

    /// C in [0, 100]
    pub score: f64,
}

/// Applies coherence penalties to a [`CoherenceGraph`]
#[derive(Debug, Clone, Copy)]
pub struct CoherenceAnalyzer {
    penalty_factor: f64,
    cycle_penalty: f64,
}

impl CoherenceAnalyzer {
    /// Create an analyzer with explicit penalties
    pub fn new(penalty_factor: f64, cycle_penalty: f64) -> Self {
        Self {
            penalty_factor,
            cycle_penalty,
        }
    }

    /// Create an analyzer from a run configuration
    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.penalty_factor, config.cycle_penalty)
    }

    /// Settle every contradiction against the verification statuses
    ///
    /// `statuses` is indexed like the graph's nodes. When exactly one side of
    /// a pair is verified, the other side is set to
    /// [`VerificationStatus::Contradicted`]. Findings record the statuses as
    /// they were before any resolution, so the outcome does not depend on the
    /// order pairs are visited in.
    pub fn resolve_contradictions(
        &self,
        graph: &CoherenceGraph,
        statuses: &mut [VerificationStatus],
    ) -> Vec<ContradictionFinding> {
        let verified: Vec<VerificationStatus> = statuses.to_vec();
        let mut findings = Vec::with_capacity(graph.contradiction_count());

        for &(a, b) in graph.contradiction_indices() {
            let (first, second) = (graph.id(a), graph.id(b));

            let resolution = match (verified[a].is_verified(), verified[b].is_verified()) {
                (true, false) => {
                    statuses[b] = VerificationStatus::Contradicted;
                    Resolution::Resolved {
                        winner: first.clone(),
                        loser: second.clone(),
                    }
                }
                (false, true) => {
                    statuses[a] = VerificationStatus::Contradicted;
                    Resolution::Resolved {
                        winner: second.clone(),
                        loser: first.clone(),
                    }
                }
                _ => Resolution::Unresolved,
            };

            match &resolution {
                Resolution::Resolved { winner, loser } => {
                    tracing::info!("Contradiction resolved: {} verified, {} marked contradicted", winner, loser);
                }
                Resolution::Unresolved => {
                    tracing::warn!(
                        "Unresolved contradiction between {} ({}) and {} ({})",
                        first,
                        verified[a],
                        second,
                        verified[b]
                    );
                }
            }

            findings.push(ContradictionFinding {
                first: first.clone(),
                second: second.clone(),
                first_status: verified[a],
                second_status: verified[b],
                resolution,
            });
        }

        findings
    }

    /// `C = clamp(100 - unresolved × penalty_factor - cycles × cycle_penalty, 0, 100)`
    pub fn score(&self, unresolved: usize, cycles: usize) -> f64 {
        let penalty = unresolved as f64 * self.penalty_factor + cycles as f64 * self.cycle_penalty;
        (MAX_SCORE - penalty).clamp(0.0, MAX_SCORE)
    }

    /// Resolve contradictions, find cycles, and compute C
    pub fn analyze(&self, graph: &CoherenceGraph, statuses: &mut [VerificationStatus]) -> CoherenceOutcome {
        let findings = self.resolve_contradictions(graph, statuses);
        let cycles = graph.find_cycles();

        for cycle in &cycles {
            tracing::warn!(
                "Circular reasoning through {} claims (representative {})",
                cycle.members.len(),
                cycle.representative
            );
        }

        let unresolved_count = findings.iter().filter(|f| !f.is_resolved()).count();
        let score = self.score(unresolved_count, cycles.len());

        CoherenceOutcome {
            findings,
            cycles,
            unresolved_count,
            score,
        }
    }
}

impl Default for CoherenceAnalyzer {
    fn default() -> Self {
        Self::from_config(&AuditConfig::default())
    }
}
