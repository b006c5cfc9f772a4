use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::similarity::SimilarityAlgorithm;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Scoring weights and verdict thresholds.
///
/// The default value is the canonical policy: identifier 3, checksum 2,
/// name 2, birth date/year 1; name threshold 85; PASS at 6, REVIEW at 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub weights: Weights,
    pub thresholds: Thresholds,
    pub similarity: SimilarityConfig,
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Points awarded when each check passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub identifier: u32,
    pub checksum: u32,
    pub name: u32,
    pub birth: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            identifier: 3,
            checksum: 2,
            name: 2,
            birth: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Minimum name similarity (0..=100) that counts as a match.
    pub name_similarity: u8,
    /// Minimum score for PASS.
    pub pass: u32,
    /// Minimum score for REVIEW; anything lower is FAIL.
    pub review: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            name_similarity: 85,
            pass: 6,
            review: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimilarityConfig {
    pub algorithm: SimilarityAlgorithm,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

const MAX_WEIGHT: u32 = 100;

impl ScoringConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ScoringConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigSerialize(e.to_string()))
    }

    /// Highest score any input can reach.
    pub fn max_score(&self) -> u32 {
        let w = &self.weights;
        w.identifier + w.checksum + w.name + w.birth
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let w = &self.weights;
        for (name, value) in [
            ("identifier", w.identifier),
            ("checksum", w.checksum),
            ("name", w.name),
            ("birth", w.birth),
        ] {
            if value > MAX_WEIGHT {
                return Err(ReconError::ConfigValidation(format!(
                    "weight '{name}' must be at most {MAX_WEIGHT}, got {value}"
                )));
            }
        }

        let t = &self.thresholds;
        if t.name_similarity > 100 {
            return Err(ReconError::ConfigValidation(format!(
                "name_similarity must be 0..=100, got {}",
                t.name_similarity
            )));
        }
        if t.review > t.pass {
            return Err(ReconError::ConfigValidation(format!(
                "review threshold ({}) must not exceed pass threshold ({})",
                t.review, t.pass
            )));
        }
        if t.pass > self.max_score() {
            return Err(ReconError::ConfigValidation(format!(
                "pass threshold ({}) is unreachable: maximum score is {}",
                t.pass,
                self.max_score()
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
