//! Veritas Report
//!
//! Turns a [`ScoreResult`](veritas_audit::ScoreResult) into a reproducible
//! audit record: the full result, a human-readable finding for every
//! contradiction and cycle, the VRS rounded for display, and a plain-text
//! summary. Building a report has no side effects; exporting is explicit.
//!
//! ```
//! use veritas_audit::{run_audit, AuditConfig};
//! use veritas_report::{AuditReport, JsonExporter, ReportExporter};
//! use veritas_store::MemoryClaimStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = run_audit(&MemoryClaimStore::new(), AuditConfig::default())?;
//! let report = AuditReport::from_result(result);
//!
//! let json = JsonExporter::pretty().export(&report)?;
//! assert_eq!(AuditReport::from_json(&json)?, report);
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod export;
mod report;

pub use error::ReportError;
pub use export::{JsonExporter, ReportExporter};
pub use report::{AuditReport, Finding, FindingKind, ReportBuilder};
