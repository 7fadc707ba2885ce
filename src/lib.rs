//! # riskcheck
//!
//! Deterministic, rule-based health risk scoring.
//!
//! This crate provides:
//! - A lab-panel scorer (glucose, HbA1c, lipid panel) producing a `RiskVerdict`
//! - Onboarding questionnaire scorers for diabetes and cholesterol risk
//! - A self-check questionnaire session and its index-sum scorer
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Input types, threshold tables, and the three scorers (pure)
//! - `ports`: Trait for the persistence collaborator
//! - `adapters`: SQLite persistence and log sanitization
//! - `application`: Validate, score, persist and log in one call
//! - `config`: Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::{
    LabMeasurements, QuestionnaireProfile, RiskLevel, RiskVerdict, SelfCheckResult,
};

/// Result type for riskcheck operations
pub type Result<T> = std::result::Result<T, RiskcheckError>;

/// Main error type for riskcheck
#[derive(Debug, thiserror::Error)]
pub enum RiskcheckError {
    #[error("Invalid lab input: {0}")]
    LabInput(#[from] domain::LabInputError),

    #[error("Invalid profile: {0}")]
    Profile(#[from] domain::ProfileError),

    #[error("Self-check failed: {0}")]
    SelfCheck(#[from] domain::SelfCheckError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
