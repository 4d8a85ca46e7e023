//! Traceability - computes T from citation coverage

use crate::aggregate::ratio_score;
use veritas_domain::Claim;

/// Outcome of the traceability pass over a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TraceabilityOutcome {
    /// Whether each claim cites a source, in snapshot order
    pub cited: Vec<bool>,

    /// Number of cited claims
    pub cited_count: usize,

    /// T in [0, 100]
    pub score: f64,

    /// True when there were no claims and T is 100 by definition
    pub vacuous: bool,
}

/// Measures how many claims are backed by at least one citation
///
/// A claim counts as cited whatever its sources concluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceabilityScorer;

impl TraceabilityScorer {
    /// `T = 100 × cited / total`
    pub fn score(&self, claims: &[Claim]) -> TraceabilityOutcome {
        let cited: Vec<bool> = claims.iter().map(Claim::is_cited).collect();
        let cited_count = cited.iter().filter(|&&c| c).count();

        TraceabilityOutcome {
            score: ratio_score(cited_count, claims.len()),
            vacuous: claims.is_empty(),
            cited,
            cited_count,
        }
    }
}
