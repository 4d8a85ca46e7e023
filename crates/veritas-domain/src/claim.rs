//! Claim module - the atomic unit of an audit

use crate::SourceReference;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a claim
///
/// Identifiers are opaque, non-empty strings assigned by the extractor.
/// Ordering is lexicographic over the UTF-8 bytes, which is what makes cycle
/// representatives and report ordering reproducible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimId(String);

impl ClaimId {
    /// Create a ClaimId from an extractor-assigned identifier
    ///
    /// # Errors
    /// Returns error if the identifier is empty or only whitespace
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::ClaimId;
    ///
    /// let id = ClaimId::new("claim-1").unwrap();
    /// assert_eq!(id.as_str(), "claim-1");
    /// assert!(ClaimId::new("").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Claim identifier cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    /// Generate a fresh UUIDv7-based identifier
    ///
    /// UUIDv7 strings sort lexicographically in creation order, so generated
    /// identifiers keep the same ordering guarantees as hand-assigned ones.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClaimId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClaimId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClaimId> for String {
    fn from(id: ClaimId) -> Self {
        id.0
    }
}

impl AsRef<str> for ClaimId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Verification status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Not yet checked against any source
    #[default]
    Unverified,

    /// Backed by at least one sufficiently strong supporting source
    Verified,

    /// Opposed by a strong source, or lost a contradiction to a verified claim
    Contradicted,

    /// Checked, but no source is strong enough either way
    Unsupported,
}

impl VerificationStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Unverified => "unverified",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Contradicted => "contradicted",
            VerificationStatus::Unsupported => "unsupported",
        }
    }

    /// Parse a status from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unverified" => Some(VerificationStatus::Unverified),
            "verified" => Some(VerificationStatus::Verified),
            "contradicted" => Some(VerificationStatus::Contradicted),
            "unsupported" => Some(VerificationStatus::Unsupported),
            _ => None,
        }
    }

    /// Whether this status counts as independently verified
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Verified)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid verification status: {}", s))
    }
}

/// A claim - an atomic assertion extracted from audited output
///
/// Claims are created by an external extractor. During an audit run only the
/// verification and coherence passes change a claim's status, and once the
/// run is finalized the claim is frozen along with its store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// The assertion text
    pub text: String,

    /// Sources consulted for this claim (owned by the claim)
    #[serde(default)]
    pub sources: Vec<SourceReference>,

    /// Current verification status
    #[serde(default)]
    pub status: VerificationStatus,

    /// Extractor confidence in [0.0, 1.0], if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Claim {
    /// Create a new unverified claim with no sources
    pub fn new(id: ClaimId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sources: Vec::new(),
            status: VerificationStatus::Unverified,
            confidence: None,
        }
    }

    /// Attach a source reference
    pub fn with_source(mut self, source: SourceReference) -> Self {
        self.sources.push(source);
        self
    }

    /// Set the initial verification status
    pub fn with_status(mut self, status: VerificationStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the extractor confidence
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether the claim cites at least one source, regardless of outcome
    pub fn is_cited(&self) -> bool {
        !self.sources.is_empty()
    }
}
