//! Audit report - a [`ScoreResult`] plus human-readable findings

use crate::ReportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use veritas_audit::{ContradictionFinding, DependencyCycle, Resolution, ScoreResult};
use veritas_domain::ClaimId;

/// Category of a report finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A contradiction settled in favor of a verified claim
    ResolvedContradiction,

    /// A contradiction that still stands
    UnresolvedContradiction,

    /// A cycle in the dependency graph
    CircularReasoning,

    /// A score that only holds vacuously
    LowConfidence,
}

impl FindingKind {
    /// Short label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::ResolvedContradiction => "resolved",
            FindingKind::UnresolvedContradiction => "unresolved",
            FindingKind::CircularReasoning => "cycle",
            FindingKind::LowConfidence => "low-confidence",
        }
    }
}

/// One human-readable observation about an audit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Category
    pub kind: FindingKind,

    /// Claims involved, sorted
    pub claims: Vec<ClaimId>,

    /// Description naming the claims
    pub message: String,
}

impl Finding {
    fn contradiction(finding: &ContradictionFinding) -> Self {
        let (kind, message) = match &finding.resolution {
            Resolution::Resolved { winner, loser } => (
                FindingKind::ResolvedContradiction,
                format!(
                    "Claims {} and {} contradict each other; resolved in favor of verified claim {}, {} marked contradicted",
                    finding.first, finding.second, winner, loser
                ),
            ),
            Resolution::Unresolved => (
                FindingKind::UnresolvedContradiction,
                format!(
                    "Claims {} ({}) and {} ({}) contradict each other and could not be resolved",
                    finding.first, finding.first_status, finding.second, finding.second_status
                ),
            ),
        };

        Self {
            kind,
            claims: vec![finding.first.clone(), finding.second.clone()],
            message,
        }
    }

    fn cycle(cycle: &DependencyCycle) -> Self {
        let chain: Vec<&str> = cycle.members.iter().map(ClaimId::as_str).collect();
        let message = if cycle.members.len() == 1 {
            format!("Circular reasoning: claim {} depends on itself", cycle.representative)
        } else {
            format!(
                "Circular reasoning among {} claims: {}",
                cycle.members.len(),
                chain.join(", ")
            )
        };

        Self {
            kind: FindingKind::CircularReasoning,
            claims: cycle.members.clone(),
            message,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.message)
    }
}

/// Round to two decimals for display
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reproducible record of one audit run
///
/// Carries the full [`ScoreResult`] unchanged, so exporting a report and
/// reading it back yields the same scores bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    title: Option<String>,
    metadata: BTreeMap<String, String>,
    vrs_display: f64,
    findings: Vec<Finding>,
    result: ScoreResult,
}

impl AuditReport {
    /// Build a report with no title or metadata
    pub fn from_result(result: ScoreResult) -> Self {
        ReportBuilder::new(result).build()
    }

    /// Read a report previously written by [`JsonExporter`](crate::JsonExporter)
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Report title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Free-form metadata (audited artifact, auditor version, ...)
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// VRS rounded to two decimals
    pub fn vrs_display(&self) -> f64 {
        self.vrs_display
    }

    /// All findings: contradictions first, then cycles, then signals
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one kind
    pub fn findings_of(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }

    /// Underlying score result
    pub fn result(&self) -> &ScoreResult {
        &self.result
    }

    /// Multi-line plain-text summary
    pub fn summary(&self) -> String {
        let r = &self.result;
        let w = r.weights();

        let mut lines = vec![
            self.title.clone().unwrap_or_else(|| "Veritas Audit Report".to_string()),
            "====================".to_string(),
        ];

        for (key, value) in &self.metadata {
            lines.push(format!("{}: {}", key, value));
        }
        if !self.metadata.is_empty() {
            lines.push(String::new());
        }

        lines.push(format!("VRS: {:.2}", self.vrs_display));
        lines.push(format!(
            "  S (source verification): {:.2} x {}  ({} of {} claims verified)",
            r.source_score(),
            w.w1,
            r.verified_count(),
            r.total_claims()
        ));
        lines.push(format!(
            "  C (coherence):           {:.2} x {}  ({} unresolved contradictions, {} cycles)",
            r.coherence_score(),
            w.w2,
            r.contradiction_count(),
            r.cycle_count()
        ));
        lines.push(format!(
            "  T (traceability):        {:.2} x {}  ({} of {} claims cited)",
            r.traceability_score(),
            w.w3,
            r.cited_count(),
            r.total_claims()
        ));
        lines.push(String::new());

        if self.findings.is_empty() {
            lines.push("No findings".to_string());
        } else {
            lines.push(format!("Findings ({}):", self.findings.len()));
            for finding in &self.findings {
                lines.push(format!("  {}", finding));
            }
        }

        lines.join("\n")
    }
}

/// Builds an [`AuditReport`] from a [`ScoreResult`]
///
/// # Examples
///
/// ```
/// use veritas_audit::{run_audit, AuditConfig};
/// use veritas_report::ReportBuilder;
/// use veritas_store::MemoryClaimStore;
///
/// let result = run_audit(&MemoryClaimStore::new(), AuditConfig::default()).unwrap();
/// let report = ReportBuilder::new(result)
///     .title("Quarterly summary audit")
///     .metadata("artifact", "summary-q3.md")
///     .build();
///
/// assert_eq!(report.title(), Some("Quarterly summary audit"));
/// assert!(report.summary().contains("VRS: 100.00"));
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    result: ScoreResult,
    title: Option<String>,
    metadata: BTreeMap<String, String>,
}

impl ReportBuilder {
    /// Start a report for a result
    pub fn new(result: ScoreResult) -> Self {
        Self {
            result,
            title: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the report title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a metadata entry, replacing any previous value for the key
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Assemble the report
    pub fn build(self) -> AuditReport {
        let result = self.result;

        let mut findings: Vec<Finding> = result
            .contradictions()
            .iter()
            .map(Finding::contradiction)
            .collect();
        findings.extend(result.cycles().iter().map(Finding::cycle));
        findings.extend(result.signals().iter().map(|signal| Finding {
            kind: FindingKind::LowConfidence,
            claims: Vec::new(),
            message: signal.describe().to_string(),
        }));

        tracing::debug!("Built audit report with {} findings", findings.len());

        AuditReport {
            title: self.title,
            metadata: self.metadata,
            vrs_display: round2(result.vrs()),
            findings,
            result,
        }
    }
}
