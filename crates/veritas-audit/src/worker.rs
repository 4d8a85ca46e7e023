//! Async worker for running audit passes and batches on the tokio blocking pool

use crate::{AuditConfig, AuditError, AuditSnapshot, Auditor, ScoreResult};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs audits on tokio's blocking pool
///
/// Scoring is CPU-bound, so every pass goes through
/// [`tokio::task::spawn_blocking`]. Results are identical to
/// [`Auditor::audit_snapshot`] on the same snapshot.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use veritas_audit::{AuditConfig, AuditSnapshot, AuditWorker};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let worker = AuditWorker::new(AuditConfig::default())?;
///     let result = worker.audit_concurrent(Arc::new(AuditSnapshot::default())).await?;
///     assert!(result.is_low_confidence());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuditWorker {
    auditor: Arc<Auditor>,
}

impl AuditWorker {
    /// Create a worker, validating the configuration
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        Ok(Self::from_auditor(Auditor::new(config)?))
    }

    /// Wrap an existing auditor
    pub fn from_auditor(auditor: Auditor) -> Self {
        Self {
            auditor: Arc::new(auditor),
        }
    }

    /// Auditor this worker delegates to
    pub fn auditor(&self) -> &Auditor {
        &self.auditor
    }

    /// Run the graph, verification and traceability passes concurrently
    ///
    /// The three passes only read the snapshot. Once all have finished,
    /// contradictions are resolved against the verification statuses and the
    /// result is assembled on the blocking pool as well.
    ///
    /// # Errors
    ///
    /// Any error a sequential run would raise, or [`AuditError::Worker`] if a
    /// pass panicked.
    pub async fn audit_concurrent(&self, snapshot: Arc<AuditSnapshot>) -> Result<ScoreResult, AuditError> {
        tracing::info!("Starting concurrent audit: {} claims", snapshot.len());

        let graph = self.spawn_pass(&snapshot, |auditor, snapshot| auditor.graph_pass(snapshot));
        let verification =
            self.spawn_pass(&snapshot, |auditor, snapshot| auditor.verification_pass(snapshot));
        let traceability =
            self.spawn_pass(&snapshot, |auditor, snapshot| auditor.traceability_pass(snapshot));

        let (graph, verification, traceability) = tokio::join!(graph, verification, traceability);
        let graph = join_result(graph)??;
        let verification = join_result(verification)?;
        let traceability = join_result(traceability)?;

        let auditor = Arc::clone(&self.auditor);
        let handle = tokio::task::spawn_blocking(move || {
            auditor.assemble(&snapshot, &graph, verification, traceability)
        });
        join_result(handle.await)?
    }

    /// Audit independent snapshots in parallel
    ///
    /// Results come back in input order; one failing snapshot does not
    /// affect the others.
    pub async fn audit_batch(&self, snapshots: Vec<AuditSnapshot>) -> Vec<Result<ScoreResult, AuditError>> {
        tracing::info!("Starting batch audit of {} snapshots", snapshots.len());

        let handles: Vec<JoinHandle<Result<ScoreResult, AuditError>>> = snapshots
            .into_iter()
            .map(|snapshot| {
                let auditor = Arc::clone(&self.auditor);
                tokio::task::spawn_blocking(move || auditor.audit_snapshot(&snapshot))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(join_result(handle.await).and_then(|r| r));
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::error!("Batch audit: {} of {} snapshots failed", failed, results.len());
        }
        results
    }

    fn spawn_pass<T, F>(&self, snapshot: &Arc<AuditSnapshot>, pass: F) -> JoinHandle<T>
    where
        T: Send + 'static,
        F: FnOnce(&Auditor, &AuditSnapshot) -> T + Send + 'static,
    {
        let auditor = Arc::clone(&self.auditor);
        let snapshot = Arc::clone(snapshot);
        tokio::task::spawn_blocking(move || pass(auditor.as_ref(), snapshot.as_ref()))
    }
}

fn join_result<T>(joined: Result<T, tokio::task::JoinError>) -> Result<T, AuditError> {
    joined.map_err(|e| AuditError::Worker(format!("audit task failed: {}", e)))
}
