//! Configuration for audit runs
//!
//! Defines the verification threshold, coherence penalties, and VRS weights.

use crate::AuditError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default minimum agreement strength for a source to count (0.5)
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default coherence penalty per unresolved contradiction (10 points)
pub const DEFAULT_PENALTY_FACTOR: f64 = 10.0;

/// Allowed deviation of `w1 + w2 + w3` from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Weights combining S, C and T into the VRS
///
/// # Examples
///
/// ```
/// use veritas_audit::ScoreWeights;
///
/// let weights = ScoreWeights::default();
/// assert_eq!((weights.w1, weights.w2, weights.w3), (0.4, 0.4, 0.2));
///
/// assert!(ScoreWeights::new(0.5, 0.3, 0.2).is_ok());
/// assert!(ScoreWeights::new(0.5, 0.5, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight on the source verification score S
    pub w1: f64,

    /// Weight on the coherence score C
    pub w2: f64,

    /// Weight on the traceability score T
    pub w3: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            w1: 0.4,
            w2: 0.4,
            w3: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Create validated weights
    pub fn new(w1: f64, w2: f64, w3: f64) -> Result<Self, AuditError> {
        let weights = Self { w1, w2, w3 };
        weights.validate()?;
        Ok(weights)
    }

    /// Favor source verification (0.5 / 0.3 / 0.2)
    pub fn source_weighted() -> Self {
        Self {
            w1: 0.5,
            w2: 0.3,
            w3: 0.2,
        }
    }

    /// Favor logical coherence (0.3 / 0.5 / 0.2)
    pub fn coherence_weighted() -> Self {
        Self {
            w1: 0.3,
            w2: 0.5,
            w3: 0.2,
        }
    }

    /// Sum of the three weights
    pub fn sum(&self) -> f64 {
        self.w1 + self.w2 + self.w3
    }

    /// Check that the weights form a convex combination
    ///
    /// Each weight must be finite and non-negative, and the sum must be
    /// within [`WEIGHT_TOLERANCE`] of 1.0.
    pub fn validate(&self) -> Result<(), AuditError> {
        let all_valid = [self.w1, self.w2, self.w3]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        let sum = self.sum();

        if !all_valid || (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AuditError::InvalidWeight {
                w1: self.w1,
                w2: self.w2,
                w3: self.w3,
                sum,
            });
        }

        Ok(())
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_penalty_factor() -> f64 {
    DEFAULT_PENALTY_FACTOR
}

/// Configuration for an audit run
///
/// Every field can be overridden on its own; omitted fields keep their
/// defaults when loading from TOML.
///
/// # Examples
///
/// ```
/// use veritas_audit::AuditConfig;
///
/// let config = AuditConfig::default();
/// assert_eq!(config.threshold, 0.5);
///
/// let config = AuditConfig::strict();
/// assert_eq!(config.threshold, 0.7);
///
/// let config = AuditConfig::default().with_penalty_factor(25.0);
/// assert_eq!(config.penalty_factor, 25.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Minimum agreement strength for a source to verify or contradict a claim
    /// Default: 0.5
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Points removed from C per unresolved contradiction
    /// Default: 10.0
    #[serde(default = "default_penalty_factor")]
    pub penalty_factor: f64,

    /// Points removed from C per dependency cycle
    /// Default: 0.0 (cycles are reported but do not change C)
    #[serde(default)]
    pub cycle_penalty: f64,

    /// VRS weights
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            penalty_factor: DEFAULT_PENALTY_FACTOR,
            cycle_penalty: 0.0,
            weights: ScoreWeights::default(),
        }
    }
}

impl AuditConfig {
    /// Strict preset: sources must agree strongly, contradictions cost more
    ///
    /// - Threshold: 0.7
    /// - Penalty factor: 20.0
    /// - Cycle penalty: 5.0
    pub fn strict() -> Self {
        Self {
            threshold: 0.7,
            penalty_factor: 20.0,
            cycle_penalty: 5.0,
            weights: ScoreWeights::default(),
        }
    }

    /// Lenient preset: weaker sources count, contradictions cost less
    ///
    /// - Threshold: 0.3
    /// - Penalty factor: 5.0
    pub fn lenient() -> Self {
        Self {
            threshold: 0.3,
            penalty_factor: 5.0,
            cycle_penalty: 0.0,
            weights: ScoreWeights::default(),
        }
    }

    /// Override the verification threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Override the contradiction penalty
    pub fn with_penalty_factor(mut self, penalty_factor: f64) -> Self {
        self.penalty_factor = penalty_factor;
        self
    }

    /// Override the cycle penalty
    pub fn with_cycle_penalty(mut self, cycle_penalty: f64) -> Self {
        self.cycle_penalty = cycle_penalty;
        self
    }

    /// Override the VRS weights
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuditError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(AuditError::InvalidConfig(format!(
                "threshold {} must be within [0.0, 1.0]",
                self.threshold
            )));
        }
        if !self.penalty_factor.is_finite() || self.penalty_factor < 0.0 {
            return Err(AuditError::InvalidConfig(format!(
                "penalty_factor {} must be a non-negative number",
                self.penalty_factor
            )));
        }
        if !self.cycle_penalty.is_finite() || self.cycle_penalty < 0.0 {
            return Err(AuditError::InvalidConfig(format!(
                "cycle_penalty {} must be a non-negative number",
                self.cycle_penalty
            )));
        }
        self.weights.validate()
    }

    /// Load configuration from a TOML string
    ///
    /// Settings may sit at the top level or under an `[audit]` table:
    ///
    /// ```toml
    /// [audit]
    /// threshold = 0.6
    /// penalty_factor = 15.0
    ///
    /// [audit.weights]
    /// w1 = 0.5
    /// w2 = 0.3
    /// w3 = 0.2
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, AuditError> {
        let value: toml::Value = toml::from_str(toml_str)
            .map_err(|e| AuditError::InvalidConfig(format!("Failed to parse TOML: {}", e)))?;

        let section = match value.get("audit") {
            Some(audit) => audit.clone(),
            None => value,
        };

        let config: Self = section
            .try_into()
            .map_err(|e| AuditError::InvalidConfig(format!("Invalid audit settings: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AuditError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, AuditError> {
        toml::to_string_pretty(self)
            .map_err(|e| AuditError::InvalidConfig(format!("Failed to serialize to TOML: {}", e)))
    }
}
