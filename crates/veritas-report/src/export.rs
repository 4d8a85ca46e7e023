//! Report exporters

use crate::{AuditReport, ReportError};

/// Serializes an [`AuditReport`] to a textual format
pub trait ReportExporter {
    /// Short format name (e.g. `"json"`)
    fn format_name(&self) -> &'static str;

    /// Serialize the whole report
    fn export(&self, report: &AuditReport) -> Result<String, ReportError>;
}

/// JSON exporter
///
/// Every field of the underlying score result is written, and floats round
/// trip exactly, so [`AuditReport::from_json`] restores an equal report.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    /// Indent the output
    pub pretty: bool,
}

impl JsonExporter {
    /// Single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ReportExporter for JsonExporter {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn export(&self, report: &AuditReport) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        tracing::debug!("Exported audit report as {} bytes of JSON", json.len());
        Ok(json)
    }
}
