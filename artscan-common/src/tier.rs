//! Risk classification of similarity scores
//!
//! Pure, total mapping from a similarity score in [0,100] to a risk tier.
//! Lower bounds are inclusive: 70 is Moderate, 90 is High.

use serde::{Deserialize, Serialize};

/// Risk tier derived from a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// score < 70
    Low,
    /// 70 <= score < 90
    Moderate,
    /// score >= 90, possible plagiarism risk
    High,
}

impl RiskTier {
    /// Classify a similarity score
    pub fn classify(score: u8) -> RiskTier {
        match score {
            90..=u8::MAX => RiskTier::High,
            70..=89 => RiskTier::Moderate,
            _ => RiskTier::Low,
        }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Unique Design",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }

    /// User-facing verdict line shown after a completed comparison
    pub fn verdict(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low similarity - designs appear unique",
            RiskTier::Moderate => "Moderate similarity detected",
            RiskTier::High => "High similarity detected! Possible plagiarism risk.",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        };
        f.write_str(name)
    }
}
