//! Integration tests for veritas-audit
//!
//! These tests run complete audits over in-memory stores and check the
//! scoring properties end to end.

use std::io::Write;
use std::sync::{Arc, Once};

use proptest::prelude::*;
use veritas_audit::{
    run_audit, AuditConfig, AuditError, AuditSnapshot, AuditWorker, Auditor, Resolution, ScoreWeights,
};
use veritas_domain::{Claim, ClaimId, ClaimStore, CoherenceEdge, SourceReference, VerificationStatus};
use veritas_store::{MemoryClaimStore, StoreError};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn id(s: &str) -> ClaimId {
    ClaimId::new(s).unwrap()
}

fn store_with(claims: Vec<Claim>, relations: Vec<CoherenceEdge>) -> MemoryClaimStore {
    let mut store = MemoryClaimStore::new();
    for claim in claims {
        store.add_claim(claim).unwrap();
    }
    for edge in relations {
        store.add_relation(edge).unwrap();
    }
    store
}

#[test]
fn test_verified_claim_wins_contradiction() {
    init_tracing();
    let store = store_with(
        vec![
            Claim::new(id("A"), "a").with_source(SourceReference::supporting("s1", 0.9)),
            Claim::new(id("B"), "b"),
        ],
        vec![CoherenceEdge::contradicts(id("A"), id("B"))],
    );

    let result = run_audit(&store, AuditConfig::default()).unwrap();

    assert_eq!(result.contradiction_count(), 0);
    assert_eq!(result.resolved_contradictions().count(), 1);
    assert_eq!(result.unresolved_contradictions().count(), 0);
    assert_eq!(
        result.claim(&id("B")).unwrap().final_status,
        VerificationStatus::Contradicted
    );
    assert_eq!(
        result.contradictions()[0].resolution,
        Resolution::Resolved {
            winner: id("A"),
            loser: id("B"),
        }
    );
}

#[test]
fn test_identical_status_contradiction_counts_once() {
    init_tracing();
    let verified = |name: &str| {
        Claim::new(id(name), name).with_source(SourceReference::supporting("s", 0.8))
    };

    // Both verified, edges in both directions
    let store = store_with(
        vec![verified("A"), verified("B")],
        vec![
            CoherenceEdge::contradicts(id("A"), id("B")),
            CoherenceEdge::contradicts(id("B"), id("A")),
        ],
    );
    let result = run_audit(&store, AuditConfig::default()).unwrap();
    assert_eq!(result.contradiction_count(), 1);
    assert_eq!(result.coherence_score(), 90.0);

    // Neither verified
    let store = store_with(
        vec![Claim::new(id("A"), "a"), Claim::new(id("B"), "b")],
        vec![CoherenceEdge::contradicts(id("A"), id("B"))],
    );
    let result = run_audit(&store, AuditConfig::default()).unwrap();
    assert_eq!(result.contradiction_count(), 1);
    assert!(result.claim(&id("A")).unwrap().in_unresolved_contradiction);
}

#[test]
fn test_repeated_same_direction_contradiction_counts_once() {
    init_tracing();
    let verified = |name: &str| {
        Claim::new(id(name), name).with_source(SourceReference::supporting("s", 0.8))
    };

    let store = store_with(
        vec![verified("A"), verified("B")],
        vec![
            CoherenceEdge::contradicts(id("A"), id("B")),
            CoherenceEdge::contradicts(id("A"), id("B")),
        ],
    );
    let result = run_audit(&store, AuditConfig::default()).unwrap();
    assert_eq!(result.contradictions().len(), 1);
    assert_eq!(result.contradiction_count(), 1);
    assert_eq!(result.coherence_score(), 90.0);

    // One verified side resolves the single pair, not once per edge
    let store = store_with(
        vec![verified("A"), Claim::new(id("B"), "b")],
        vec![
            CoherenceEdge::contradicts(id("B"), id("A")),
            CoherenceEdge::contradicts(id("B"), id("A")),
        ],
    );
    let result = run_audit(&store, AuditConfig::default()).unwrap();
    assert_eq!(result.contradictions().len(), 1);
    assert_eq!(result.resolved_contradiction_count(), 1);
    assert_eq!(result.contradiction_count(), 0);
    assert_eq!(result.coherence_score(), 100.0);
}

#[test]
fn test_three_cycle_reported_once() {
    init_tracing();
    let store = store_with(
        vec![
            Claim::new(id("C"), "c"),
            Claim::new(id("A"), "a"),
            Claim::new(id("B"), "b"),
        ],
        vec![
            CoherenceEdge::depends_on(id("A"), id("B")),
            CoherenceEdge::depends_on(id("B"), id("C")),
            CoherenceEdge::depends_on(id("C"), id("A")),
        ],
    );

    let result = run_audit(&store, AuditConfig::default()).unwrap();
    assert_eq!(result.cycle_count(), 1);
    assert_eq!(result.cycles()[0].representative, id("A"));
    assert_eq!(result.cycles()[0].members, vec![id("A"), id("B"), id("C")]);
    assert!(result.claims().iter().all(|c| c.in_cycle));
}

#[test]
fn test_zero_claims() {
    init_tracing();
    let result = run_audit(&MemoryClaimStore::new(), AuditConfig::default()).unwrap();

    assert_eq!(result.source_score(), 100.0);
    assert_eq!(result.traceability_score(), 100.0);
    assert!(result.is_low_confidence());
    assert_eq!(result.vrs(), 100.0);
}

#[test]
fn test_repeated_runs_are_identical() {
    init_tracing();
    let store = store_with(
        vec![
            Claim::new(id("A"), "a").with_source(SourceReference::supporting("s1", 0.7)),
            Claim::new(id("B"), "b").with_source(SourceReference::opposing("s2", 0.9)),
            Claim::new(id("C"), "c"),
        ],
        vec![
            CoherenceEdge::contradicts(id("C"), id("A")),
            CoherenceEdge::depends_on(id("B"), id("C")),
            CoherenceEdge::depends_on(id("C"), id("B")),
        ],
    );

    let auditor = Auditor::new(AuditConfig::strict()).unwrap();
    let first = auditor.run_audit(&store).unwrap();
    let second = auditor.run_audit(&store).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.vrs().to_bits(), second.vrs().to_bits());
}

#[test]
fn test_malformed_graph_fails_run() {
    init_tracing();
    let dangling = store_with(
        vec![Claim::new(id("A"), "a")],
        vec![CoherenceEdge::depends_on(id("A"), id("ghost"))],
    );
    assert!(matches!(
        run_audit(&dangling, AuditConfig::default()),
        Err(AuditError::MalformedGraph { .. })
    ));

    let self_contradiction = store_with(
        vec![Claim::new(id("A"), "a")],
        vec![CoherenceEdge::contradicts(id("A"), id("A"))],
    );
    assert!(matches!(
        run_audit(&self_contradiction, AuditConfig::default()),
        Err(AuditError::MalformedGraph { .. })
    ));
}

#[test]
fn test_invalid_weights_fail_run() {
    let store = store_with(vec![Claim::new(id("A"), "a")], vec![]);
    let config = AuditConfig::default().with_weights(ScoreWeights {
        w1: 0.5,
        w2: 0.5,
        w3: 0.5,
    });
    assert!(matches!(
        run_audit(&store, config),
        Err(AuditError::InvalidWeight { .. })
    ));
}

#[test]
fn test_finalize_seals_store() {
    init_tracing();
    let mut store = store_with(
        vec![
            Claim::new(id("A"), "a").with_source(SourceReference::supporting("s1", 0.9)),
            Claim::new(id("B"), "b"),
        ],
        vec![CoherenceEdge::contradicts(id("B"), id("A"))],
    );

    let auditor = Auditor::default();
    let result = auditor.run_audit(&store).unwrap();
    auditor.finalize(&mut store, &result).unwrap();

    assert!(store.is_sealed());
    assert_eq!(
        store.get_claim(&id("B")).unwrap().status,
        VerificationStatus::Contradicted
    );
    assert_eq!(
        store.add_claim(Claim::new(id("C"), "late")),
        Err(StoreError::Sealed)
    );
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[audit]\nthreshold = 0.8\npenalty_factor = 50.0\n\n[audit.weights]\nw1 = 0.3\nw2 = 0.5\nw3 = 0.2"
    )
    .unwrap();

    let config = AuditConfig::from_file(file.path()).unwrap();
    assert_eq!(config.threshold, 0.8);
    assert_eq!(config.weights, ScoreWeights::coherence_weighted());

    // A 0.75-strength source no longer verifies at threshold 0.8
    let store = store_with(
        vec![Claim::new(id("A"), "a").with_source(SourceReference::supporting("s", 0.75))],
        vec![],
    );
    let result = run_audit(&store, config).unwrap();
    assert_eq!(result.verified_count(), 0);
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(
        AuditConfig::from_file("/nonexistent/veritas.toml"),
        Err(AuditError::InvalidConfig(_))
    ));
}

#[tokio::test]
async fn test_worker_agrees_with_auditor() {
    init_tracing();
    let store = store_with(
        vec![
            Claim::new(id("A"), "a").with_source(SourceReference::supporting("s1", 0.9)),
            Claim::new(id("B"), "b").with_source(SourceReference::supporting("s2", 0.95)),
            Claim::new(id("C"), "c"),
            Claim::new(id("D"), "d").with_source(SourceReference::opposing("s3", 0.6)),
        ],
        vec![
            CoherenceEdge::contradicts(id("A"), id("B")),
            CoherenceEdge::contradicts(id("C"), id("D")),
            CoherenceEdge::depends_on(id("D"), id("D")),
        ],
    );

    let config = AuditConfig::default().with_cycle_penalty(7.5);
    let sequential = run_audit(&store, config.clone()).unwrap();

    let worker = AuditWorker::new(config).unwrap();
    let concurrent = worker
        .audit_concurrent(Arc::new(AuditSnapshot::capture(&store)))
        .await
        .unwrap();

    assert_eq!(sequential, concurrent);
    // Two unresolved contradictions and one self-dependency
    assert_eq!(concurrent.coherence_score(), 100.0 - 20.0 - 7.5);
}

fn arb_claims() -> impl Strategy<Value = (Vec<Claim>, Vec<CoherenceEdge>)> {
    let source = (any::<bool>(), 0.0f64..=1.0)
        .prop_map(|(supports, strength)| SourceReference::new("src", supports, strength));
    let claims = prop::collection::vec(prop::collection::vec(source, 0..4), 0..12);

    claims.prop_flat_map(|sources_per_claim| {
        let n = sources_per_claim.len();
        let claims: Vec<Claim> = sources_per_claim
            .into_iter()
            .enumerate()
            .map(|(i, sources)| {
                sources.into_iter().fold(
                    Claim::new(ClaimId::new(format!("c{:02}", i)).unwrap(), "generated"),
                    Claim::with_source,
                )
            })
            .collect();

        let edges = if n < 2 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec((0..n, 0..n, any::<bool>()), 0..20).boxed()
        };

        (Just(claims), edges).prop_map(|(claims, raw)| {
            let edges = raw
                .into_iter()
                .filter(|(a, b, contradicts)| !(*contradicts && a == b))
                .map(|(a, b, contradicts)| {
                    let (from, to) = (claims[a].id.clone(), claims[b].id.clone());
                    if contradicts {
                        CoherenceEdge::contradicts(from, to)
                    } else {
                        CoherenceEdge::depends_on(from, to)
                    }
                })
                .collect();
            (claims, edges)
        })
    })
}

proptest! {
    /// Property: every score stays in [0, 100] and reruns agree exactly
    #[test]
    fn test_scores_bounded_and_idempotent(
        (claims, edges) in arb_claims(),
        threshold in 0.0f64..=1.0,
        penalty in 0.0f64..50.0,
    ) {
        let store = store_with(claims, edges);
        let config = AuditConfig::default()
            .with_threshold(threshold)
            .with_penalty_factor(penalty)
            .with_cycle_penalty(penalty / 2.0);

        let first = run_audit(&store, config.clone()).unwrap();
        let second = run_audit(&store, config).unwrap();

        for score in [first.source_score(), first.coherence_score(), first.traceability_score(), first.vrs()] {
            prop_assert!((0.0..=100.0).contains(&score));
        }
        prop_assert_eq!(first.contradiction_count() + first.resolved_contradiction_count(), first.contradictions().len());
        prop_assert_eq!(first, second);
    }
}
