//! Risk classification types shared by every scorer.
//!
//! The three scorers (lab panel, onboarding questionnaire, self-check) use
//! different score scales and cut points. They share only `RiskLevel` and the
//! condition vocabulary defined here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Three-tier risk classification.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No significant indicators
    Low,
    /// Borderline findings, follow-up recommended
    Medium,
    /// Clinically relevant findings, consultation advised
    High,
}

impl RiskLevel {
    /// User-facing label shown in the app.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "rendah",
            Self::Medium => "sedang",
            Self::High => "tinggi",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Medium => "Medium risk - Follow-up recommended",
            Self::High => "High risk - Medical consultation advised",
        }
    }

    /// Storage token, identical to the serde representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a storage token.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Condition domain evaluated by a scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Diabetes,
    Cholesterol,
}

impl Condition {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Cholesterol => "cholesterol",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "diabetes" => Some(Self::Diabetes),
            "cholesterol" => Some(Self::Cholesterol),
            _ => None,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the lab-panel scorer.
///
/// Carries no id or timestamp: scoring the same input twice yields equal
/// verdicts. Persistence metadata lives on `AssessmentRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskVerdict {
    /// Risk classification
    pub level: RiskLevel,

    /// Raw accumulated points. Only comparable between verdicts of the same scorer.
    pub score: u32,

    /// Domains that were evaluated
    pub detected_conditions: BTreeSet<Condition>,

    /// Parameter findings, then lifestyle advice, then urgency advice
    pub recommendations: Vec<String>,
}

impl RiskVerdict {
    /// Whether the given domain was evaluated.
    #[must_use]
    pub fn evaluated(&self, condition: Condition) -> bool {
        self.detected_conditions.contains(&condition)
    }
}
