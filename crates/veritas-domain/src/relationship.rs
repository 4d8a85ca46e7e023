//! Relationship module - directed coherence edges between claims

use crate::ClaimId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of relation between claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// The source claim relies on the target claim in its reasoning chain
    DependsOn,

    /// The two claims cannot both be true
    Contradicts,
}

impl RelationType {
    /// Get the relation name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::DependsOn => "depends_on",
            RelationType::Contradicts => "contradicts",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed relation between two claims
///
/// Edges are supplied by an external reasoning-chain extractor. The store
/// accepts them in any order relative to the claims they mention; whether
/// both endpoints exist is checked when the coherence graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoherenceEdge {
    /// Source claim ID
    pub from: ClaimId,

    /// Target claim ID
    pub to: ClaimId,

    /// Type of relation
    pub relation: RelationType,
}

impl CoherenceEdge {
    /// Create a new edge
    pub fn new(from: ClaimId, to: ClaimId, relation: RelationType) -> Self {
        Self { from, to, relation }
    }

    /// `from` depends on `to`
    pub fn depends_on(from: ClaimId, to: ClaimId) -> Self {
        Self::new(from, to, RelationType::DependsOn)
    }

    /// `from` contradicts `to`
    pub fn contradicts(from: ClaimId, to: ClaimId) -> Self {
        Self::new(from, to, RelationType::Contradicts)
    }

    /// Whether both endpoints are the same claim
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for CoherenceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.relation, self.to)
    }
}
