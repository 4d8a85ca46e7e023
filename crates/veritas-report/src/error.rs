//! Error types for report export

use thiserror::Error;

/// Errors that can occur while exporting or reading reports
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Report could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}
