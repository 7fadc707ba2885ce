//! Domain layer: Core health-data types and the scoring rules.
//!
//! Pure Rust with no I/O. All input and output types are serializable and
//! carry their own range validation.

pub mod lab;
pub mod profile;
mod record;
mod risk;
pub mod scoring;
pub mod self_check;
pub mod thresholds;

pub use lab::{LabMeasurements, LabParameter};
pub use profile::{
    body_mass_index, AlcoholConsumption, CholesterolSymptoms, DiabetesSymptoms, ExerciseFrequency,
    FamilyHistory, Gender, Lifestyle, ProfileError, QuestionnaireProfile, SmokingStatus,
    StressLevel, Symptoms,
};
pub use record::{AssessmentKind, AssessmentRecord};
pub use risk::{Condition, RiskLevel, RiskVerdict};
pub use scoring::{LabInputError, OnboardingAssessment};
pub use self_check::{
    score_self_check, Advance, Question, QuestionBank, SelfCheckError, SelfCheckResult,
    SelfCheckSession, SessionState,
};
