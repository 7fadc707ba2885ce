//! Rule-based scorers.
//!
//! The lab-panel and onboarding scorers live here; the self-check scorer sits
//! with its question bank in `domain::self_check`. All of them are pure
//! functions and safe to call from any thread.

pub mod lab;
pub mod questionnaire;

pub use lab::{classify_lab_score, score_lab_measurements, LabInputError};
pub use questionnaire::{
    assess_profile, onboarding_recommendations, score_cholesterol_risk, score_diabetes_risk,
    OnboardingAssessment,
};
