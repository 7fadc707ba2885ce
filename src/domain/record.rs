//! Assessment records handed to the persistence collaborator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::risk::{Condition, RiskLevel};

/// Which scorer produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Lab,
    Onboarding,
    SelfCheck,
}

impl AssessmentKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lab => "lab",
            Self::Onboarding => "onboarding",
            Self::SelfCheck => "self_check",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lab" => Some(Self::Lab),
            "onboarding" => Some(Self::Onboarding),
            "self_check" => Some(Self::SelfCheck),
            _ => None,
        }
    }
}

/// Snapshot of one scored request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    /// Unique identifier
    pub id: String,

    pub kind: AssessmentKind,

    /// Overall level; the higher of the two onboarding levels for onboarding records
    pub level: RiskLevel,

    /// Raw score, absent for onboarding records
    pub score: Option<u32>,

    pub detected_conditions: BTreeSet<Condition>,

    pub recommendations: Vec<String>,

    /// The request as submitted
    pub input: serde_json::Value,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AssessmentRecord {
    /// Create a record stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(
        kind: AssessmentKind,
        level: RiskLevel,
        score: Option<u32>,
        input: serde_json::Value,
    ) -> Self {
        Self {
            id: uuid_v4(),
            kind,
            level,
            score,
            detected_conditions: BTreeSet::new(),
            recommendations: Vec::new(),
            input,
            created_at: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn with_conditions(mut self, conditions: BTreeSet<Condition>) -> Self {
        self.detected_conditions = conditions;
        self
    }

    #[must_use]
    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }
}

/// Generate a random UUID v4.
///
/// ChaCha20Rng seeded from OS entropy.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
