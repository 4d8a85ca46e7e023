//! Source verification - computes S from the verified-claim ratio

use crate::aggregate::ratio_score;
use serde::{Deserialize, Serialize};
use veritas_domain::{Claim, VerificationStatus};

/// How a claim's sources voted against the threshold
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceTally {
    /// Supporting sources at or above the threshold
    pub supporting: usize,

    /// Opposing sources at or above the threshold
    pub opposing: usize,

    /// Sources below the threshold (either direction)
    pub below_threshold: usize,

    /// Strongest agreement among supporting sources, at any strength
    pub strongest_support: Option<f64>,
}

/// Outcome of the verification pass over a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    /// Status per claim, in snapshot order
    pub statuses: Vec<VerificationStatus>,

    /// Source tally per claim, in snapshot order
    pub tallies: Vec<SourceTally>,

    /// Number of verified claims
    pub verified_count: usize,

    /// S in [0, 100]
    pub score: f64,

    /// True when there were no claims and S is 100 by definition
    pub vacuous: bool,
}

/// Triangulates each claim against its source references
///
/// A claim is **verified** if some supporting source meets the threshold,
/// otherwise **contradicted** if some opposing source meets it, otherwise
/// **unsupported**.
#[derive(Debug, Clone, Copy)]
pub struct SourceVerificationScorer {
    threshold: f64,
}

impl SourceVerificationScorer {
    /// Create a scorer with the given agreement threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Classify one claim
    pub fn classify(&self, claim: &Claim) -> (VerificationStatus, SourceTally) {
        let mut tally = SourceTally::default();

        for source in &claim.sources {
            if source.supports_claim {
                tally.strongest_support = Some(
                    tally
                        .strongest_support
                        .map_or(source.agreement_strength, |s| s.max(source.agreement_strength)),
                );
            }

            if source.agreement_strength < self.threshold {
                tally.below_threshold += 1;
            } else if source.supports_claim {
                tally.supporting += 1;
            } else {
                tally.opposing += 1;
            }
        }

        let status = if tally.supporting > 0 {
            VerificationStatus::Verified
        } else if tally.opposing > 0 {
            VerificationStatus::Contradicted
        } else {
            VerificationStatus::Unsupported
        };

        (status, tally)
    }

    /// Score every claim: `S = 100 × verified / total`
    pub fn score(&self, claims: &[Claim]) -> VerificationOutcome {
        let (statuses, tallies): (Vec<_>, Vec<_>) =
            claims.iter().map(|claim| self.classify(claim)).unzip();

        let verified_count = statuses.iter().filter(|s| s.is_verified()).count();

        VerificationOutcome {
            score: ratio_score(verified_count, claims.len()),
            vacuous: claims.is_empty(),
            statuses,
            tallies,
            verified_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_domain::{ClaimId, SourceReference};

    fn claim(id: &str) -> Claim {
        Claim::new(ClaimId::new(id).unwrap(), "text")
    }

    #[test]
    fn test_supporting_source_verifies() {
        let scorer = SourceVerificationScorer::new(0.5);
        let c = claim("A").with_source(SourceReference::supporting("s", 0.9));

        let (status, tally) = scorer.classify(&c);
        assert_eq!(status, VerificationStatus::Verified);
        assert_eq!(tally.supporting, 1);
        assert_eq!(tally.strongest_support, Some(0.9));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let scorer = SourceVerificationScorer::new(0.5);
        let c = claim("A").with_source(SourceReference::supporting("s", 0.5));

        assert_eq!(scorer.classify(&c).0, VerificationStatus::Verified);
    }

    #[test]
    fn test_weak_support_is_unsupported() {
        let scorer = SourceVerificationScorer::new(0.5);
        let c = claim("A").with_source(SourceReference::supporting("s", 0.49));

        let (status, tally) = scorer.classify(&c);
        assert_eq!(status, VerificationStatus::Unsupported);
        assert_eq!(tally.below_threshold, 1);
        assert_eq!(tally.strongest_support, Some(0.49));
    }

    #[test]
    fn test_strong_opposition_contradicts() {
        let scorer = SourceVerificationScorer::new(0.5);
        let c = claim("A")
            .with_source(SourceReference::supporting("weak", 0.2))
            .with_source(SourceReference::opposing("strong", 0.8));

        let (status, tally) = scorer.classify(&c);
        assert_eq!(status, VerificationStatus::Contradicted);
        assert_eq!(tally.opposing, 1);
        assert_eq!(tally.below_threshold, 1);
    }

    #[test]
    fn test_support_wins_over_opposition() {
        let scorer = SourceVerificationScorer::new(0.5);
        let c = claim("A")
            .with_source(SourceReference::opposing("o", 0.9))
            .with_source(SourceReference::supporting("s", 0.6));

        assert_eq!(scorer.classify(&c).0, VerificationStatus::Verified);
    }

    #[test]
    fn test_initial_status_is_ignored() {
        let scorer = SourceVerificationScorer::new(0.5);
        let c = claim("A").with_status(VerificationStatus::Verified);

        assert_eq!(scorer.classify(&c).0, VerificationStatus::Unsupported);
    }

    #[test]
    fn test_score_ratio() {
        let scorer = SourceVerificationScorer::new(0.5);
        let claims = vec![
            claim("A").with_source(SourceReference::supporting("s", 0.9)),
            claim("B"),
            claim("C").with_source(SourceReference::supporting("s", 0.7)),
            claim("D").with_source(SourceReference::opposing("s", 0.7)),
        ];

        let outcome = scorer.score(&claims);
        assert_eq!(outcome.verified_count, 2);
        assert_eq!(outcome.score, 50.0);
        assert!(!outcome.vacuous);
        assert_eq!(
            outcome.statuses,
            vec![
                VerificationStatus::Verified,
                VerificationStatus::Unsupported,
                VerificationStatus::Verified,
                VerificationStatus::Contradicted,
            ]
        );
    }

    #[test]
    fn test_empty_claims_vacuous() {
        let outcome = SourceVerificationScorer::new(0.5).score(&[]);
        assert_eq!(outcome.score, 100.0);
        assert!(outcome.vacuous);
        assert!(outcome.statuses.is_empty());
    }
}
