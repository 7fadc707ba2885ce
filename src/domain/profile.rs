//! Self-reported questionnaire profile from the onboarding wizard.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExerciseFrequency {
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "rarely")]
    Rarely,
    #[default]
    #[serde(rename = "1-2_per_week")]
    OneToTwoPerWeek,
    #[serde(rename = "3-4_per_week")]
    ThreeToFourPerWeek,
    #[serde(rename = "daily")]
    Daily,
}

impl ExerciseFrequency {
    /// Never or rarely.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        matches!(self, Self::Never | Self::Rarely)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    #[default]
    Never,
    Former,
    CurrentLight,
    CurrentHeavy,
}

impl SmokingStatus {
    /// Current smoker of any intensity.
    #[must_use]
    pub fn is_current(&self) -> bool {
        matches!(self, Self::CurrentLight | Self::CurrentHeavy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholConsumption {
    #[default]
    Never,
    Occasional,
    Regular,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    #[default]
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl StressLevel {
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FamilyHistory {
    #[serde(default)]
    pub has_diabetes: bool,
    #[serde(default)]
    pub has_cholesterol: bool,
    #[serde(default)]
    pub has_heart_disease: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Lifestyle {
    pub exercise_frequency: ExerciseFrequency,
    pub smoking_status: SmokingStatus,
    pub alcohol_consumption: AlcoholConsumption,
    pub sleep_hours: f64,
    pub stress_level: StressLevel,
}

impl Default for Lifestyle {
    fn default() -> Self {
        Self {
            exercise_frequency: ExerciseFrequency::default(),
            smoking_status: SmokingStatus::default(),
            alcohol_consumption: AlcoholConsumption::default(),
            sleep_hours: 7.0,
            stress_level: StressLevel::default(),
        }
    }
}

/// Diabetes-related symptom checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DiabetesSymptoms {
    pub frequent_urination: bool,
    pub excessive_thirst: bool,
    pub unexplained_weight_loss: bool,
    pub fatigue: bool,
    pub blurred_vision: bool,
    pub slow_healing_wounds: bool,
}

impl DiabetesSymptoms {
    /// Every symptom present.
    #[must_use]
    pub fn all() -> Self {
        Self {
            frequent_urination: true,
            excessive_thirst: true,
            unexplained_weight_loss: true,
            fatigue: true,
            blurred_vision: true,
            slow_healing_wounds: true,
        }
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        [
            self.frequent_urination,
            self.excessive_thirst,
            self.unexplained_weight_loss,
            self.fatigue,
            self.blurred_vision,
            self.slow_healing_wounds,
        ]
        .into_iter()
        .filter(|&present| present)
        .count() as u32
    }
}

/// Cholesterol-related symptom checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CholesterolSymptoms {
    pub chest_pain: bool,
    pub shortness_of_breath: bool,
    pub numbness: bool,
    pub yellowish_skin_patches: bool,
}

impl CholesterolSymptoms {
    #[must_use]
    pub fn all() -> Self {
        Self {
            chest_pain: true,
            shortness_of_breath: true,
            numbness: true,
            yellowish_skin_patches: true,
        }
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        [
            self.chest_pain,
            self.shortness_of_breath,
            self.numbness,
            self.yellowish_skin_patches,
        ]
        .into_iter()
        .filter(|&present| present)
        .count() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Symptoms {
    pub diabetes: DiabetesSymptoms,
    pub cholesterol: CholesterolSymptoms,
}

/// Onboarding questionnaire answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionnaireProfile {
    /// Age in years
    pub age: u32,

    pub gender: Gender,

    /// Body-mass index, see `body_mass_index`
    pub bmi: f64,

    #[serde(default)]
    pub family_history: FamilyHistory,

    #[serde(default)]
    pub lifestyle: Lifestyle,

    #[serde(default)]
    pub symptoms: Symptoms,

    /// Systolic blood pressure in mmHg, if measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<f64>,
}

impl QuestionnaireProfile {
    /// Profile with neutral defaults for everything but the demographics.
    #[must_use]
    pub fn new(age: u32, gender: Gender, bmi: f64) -> Self {
        Self {
            age,
            gender,
            bmi,
            family_history: FamilyHistory::default(),
            lifestyle: Lifestyle::default(),
            symptoms: Symptoms::default(),
            blood_pressure_systolic: None,
        }
    }

    /// Validate that answers are within plausible ranges.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(1..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [1, 120]", self.age));
        }
        if !self.bmi.is_finite() || !(10.0..=80.0).contains(&self.bmi) {
            errors.push(format!("BMI {} out of range [10, 80]", self.bmi));
        }
        let sleep = self.lifestyle.sleep_hours;
        if !sleep.is_finite() || !(0.0..=24.0).contains(&sleep) {
            errors.push(format!("Sleep hours {sleep} out of range [0, 24]"));
        }
        if let Some(bp) = self.blood_pressure_systolic {
            if !bp.is_finite() || !(60.0..=260.0).contains(&bp) {
                errors.push(format!("Systolic BP {bp} out of range [60, 260]"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Errors deriving profile fields from raw form input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),

    #[error("Height must be a positive number of centimetres, got {0}")]
    InvalidHeight(f64),
}

/// Body-mass index from weight in kilograms and height in centimetres.
///
/// # Errors
/// Returns `ProfileError` if either input is not a positive finite number.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Result<f64, ProfileError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ProfileError::InvalidWeight(weight_kg));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(ProfileError::InvalidHeight(height_cm));
    }
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}
