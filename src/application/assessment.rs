//! Assessment service: Orchestrates scoring and persistence.
//!
//! This service coordinates:
//! - Upstream range validation
//! - Scoring through the pure domain scorers
//! - Handing a record snapshot to the store
//! - Structured logging without raw health values

use std::sync::Arc;

use serde::Serialize;

use crate::adapters::StorageError;
use crate::domain::scoring::{assess_profile, score_lab_measurements, OnboardingAssessment};
use crate::domain::{
    AssessmentKind, AssessmentRecord, LabMeasurements, QuestionBank, QuestionnaireProfile,
    RiskVerdict, SelfCheckError, SelfCheckResult, SelfCheckSession,
};
use crate::ports::{AssessmentStore, RecordPage};
use crate::RiskcheckError;

/// Service for running assessments.
///
/// Scoring never fails because of storage: a record that cannot be saved is
/// logged and dropped, and the verdict is still returned.
pub struct AssessmentService<S>
where
    S: AssessmentStore,
{
    store: Arc<S>,
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore,
    S::Error: Into<StorageError>,
{
    /// Create a new assessment service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn persist(&self, record: &AssessmentRecord) {
        if let Err(e) = self.store.save(record) {
            let e: StorageError = e.into();
            tracing::warn!(kind = record.kind.as_str(), "Failed to save assessment: {}", e);
        }
    }

    fn snapshot<T: Serialize>(input: &T) -> Result<serde_json::Value, RiskcheckError> {
        Ok(serde_json::to_value(input)?)
    }

    /// Validate, score and record a lab panel.
    ///
    /// # Errors
    /// Returns `Validation` for out-of-range values, or `LabInput` when no
    /// parameter is supplied.
    pub fn assess_lab(&self, lab: &LabMeasurements) -> Result<RiskVerdict, RiskcheckError> {
        if lab.is_empty() {
            return Err(crate::domain::LabInputError::NoParameters.into());
        }
        lab.validate().map_err(RiskcheckError::Validation)?;

        let verdict = score_lab_measurements(lab)?;

        tracing::info!(
            level = verdict.level.as_str(),
            score = verdict.score,
            parameters = lab.present_count(),
            "Scored lab panel"
        );

        let record = AssessmentRecord::new(
            AssessmentKind::Lab,
            verdict.level,
            Some(verdict.score),
            Self::snapshot(lab)?,
        )
        .with_conditions(verdict.detected_conditions.clone())
        .with_recommendations(verdict.recommendations.clone());
        self.persist(&record);

        Ok(verdict)
    }

    /// Validate, score and record an onboarding questionnaire.
    ///
    /// # Errors
    /// Returns `Validation` for out-of-range answers.
    pub fn assess_onboarding(
        &self,
        profile: &QuestionnaireProfile,
    ) -> Result<OnboardingAssessment, RiskcheckError> {
        profile.validate().map_err(RiskcheckError::Validation)?;

        let assessment = assess_profile(profile);

        tracing::info!(
            diabetes = assessment.diabetes_risk.as_str(),
            cholesterol = assessment.cholesterol_risk.as_str(),
            "Scored onboarding questionnaire"
        );

        let record = AssessmentRecord::new(
            AssessmentKind::Onboarding,
            assessment.overall(),
            None,
            Self::snapshot(profile)?,
        )
        .with_recommendations(assessment.recommendations.clone());
        self.persist(&record);

        Ok(assessment)
    }

    /// Score and record a complete self-check answer list.
    ///
    /// # Errors
    /// Returns `SelfCheck` if the answers do not fit the bank.
    pub fn assess_self_check(
        &self,
        bank: &QuestionBank,
        answers: &[usize],
    ) -> Result<SelfCheckResult, RiskcheckError> {
        let result = bank.score(answers)?;
        self.record_self_check(answers, result)?;
        Ok(result)
    }

    /// Record a completed self-check session.
    ///
    /// # Errors
    /// Returns `SelfCheck` if the session has not been completed.
    pub fn complete_session(
        &self,
        session: &SelfCheckSession,
    ) -> Result<SelfCheckResult, RiskcheckError> {
        let result = session.result().ok_or(SelfCheckError::Unanswered {
            question: session.current_index().unwrap_or_default(),
        })?;
        let answers: Vec<usize> = session.answers().iter().flatten().copied().collect();
        self.record_self_check(&answers, result)?;
        Ok(result)
    }

    fn record_self_check(
        &self,
        answers: &[usize],
        result: SelfCheckResult,
    ) -> Result<(), RiskcheckError> {
        tracing::info!(
            level = result.level.as_str(),
            score = result.score,
            questions = answers.len(),
            "Scored self-check questionnaire"
        );

        let record = AssessmentRecord::new(
            AssessmentKind::SelfCheck,
            result.level,
            Some(result.score),
            serde_json::json!({ "answers": answers }),
        );
        self.persist(&record);
        Ok(())
    }

    /// Get recent assessments from storage.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RiskcheckError> {
        self.store
            .load_recent(limit)
            .map_err(|e| RiskcheckError::Storage(e.into()))
    }

    /// Get a page of assessments, newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn page(&self, offset: usize, limit: usize) -> Result<RecordPage, RiskcheckError> {
        self.store
            .load_page(offset, limit)
            .map_err(|e| RiskcheckError::Storage(e.into()))
    }

    /// Get total assessment count.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn count(&self) -> Result<usize, RiskcheckError> {
        self.store
            .count()
            .map_err(|e| RiskcheckError::Storage(e.into()))
    }
}
