//! Onboarding questionnaire scorers.
//!
//! Diabetes and cholesterol risk are scored independently from the same
//! profile. Only the resulting levels leave this module; the raw points are
//! exposed for tests and logging.

use serde::{Deserialize, Serialize};

use crate::domain::profile::{AlcoholConsumption, Gender, QuestionnaireProfile};
use crate::domain::risk::RiskLevel;

const SYMPTOM_POINTS: u32 = 2;
const HYPERTENSION_SYSTOLIC: f64 = 140.0;
const HYPERTENSION_POINTS: u32 = 2;

pub const DIABETES_HIGH_CUTOFF: u32 = 10;
pub const DIABETES_MEDIUM_CUTOFF: u32 = 6;

pub const CHOLESTEROL_HIGH_CUTOFF: u32 = 9;
pub const CHOLESTEROL_MEDIUM_CUTOFF: u32 = 5;

/// Diabetes age bands: `(minimum age, points)`, checked highest first.
const DIABETES_AGE_POINTS: [(u32, u32); 2] = [(45, 2), (35, 1)];

/// Diabetes BMI bands: `(minimum BMI, points)`, checked highest first.
const DIABETES_BMI_POINTS: [(f64, u32); 3] = [(30.0, 3), (25.0, 2), (23.0, 1)];

/// Cholesterol BMI bands: `(minimum BMI, points)`, checked highest first.
const CHOLESTEROL_BMI_POINTS: [(f64, u32); 2] = [(30.0, 3), (25.0, 2)];

const MALE_CHOLESTEROL_AGE: u32 = 45;
const FEMALE_CHOLESTEROL_AGE: u32 = 55;

/// Healthy nightly sleep, inclusive.
const SLEEP_RANGE: (f64, f64) = (6.0, 9.0);

pub const SEE_DOCTOR: [&str; 2] = [
    "Segera konsultasikan kondisi Anda dengan dokter.",
    "Lakukan pemeriksaan laboratorium gula darah dan profil lipid.",
];

pub const LIMIT_SUGAR: [&str; 2] = [
    "Batasi konsumsi gula dan minuman manis.",
    "Kurangi karbohidrat sederhana seperti nasi putih dan roti putih, pilih karbohidrat kompleks.",
];

pub const LIMIT_SATURATED_FAT: [&str; 2] = [
    "Kurangi makanan tinggi lemak jenuh seperti gorengan, santan, dan jeroan.",
    "Perbanyak serat dari sayur, buah, dan kacang-kacangan.",
];

pub const GENERAL_ADVICE: [&str; 3] = [
    "Berolahraga minimal 150 menit per minggu.",
    "Jaga berat badan ideal.",
    "Kelola stres dan tidur 7-8 jam setiap malam.",
];

fn band_points<T: PartialOrd + Copy>(bands: &[(T, u32)], value: T) -> u32 {
    bands
        .iter()
        .find(|(min, _)| value >= *min)
        .map_or(0, |(_, points)| *points)
}

fn hypertension_points(profile: &QuestionnaireProfile) -> u32 {
    match profile.blood_pressure_systolic {
        Some(bp) if bp >= HYPERTENSION_SYSTOLIC => HYPERTENSION_POINTS,
        _ => 0,
    }
}

/// Raw diabetes points for a profile.
#[must_use]
pub fn diabetes_points(profile: &QuestionnaireProfile) -> u32 {
    let lifestyle = &profile.lifestyle;
    let mut score = band_points(&DIABETES_AGE_POINTS, profile.age);
    score += band_points(&DIABETES_BMI_POINTS, profile.bmi);

    if profile.family_history.has_diabetes {
        score += 3;
    }
    if lifestyle.exercise_frequency.is_inactive() {
        score += 2;
    }
    if lifestyle.smoking_status.is_current() {
        score += 1;
    }
    if lifestyle.sleep_hours < SLEEP_RANGE.0 || lifestyle.sleep_hours > SLEEP_RANGE.1 {
        score += 1;
    }
    if lifestyle.stress_level.is_elevated() {
        score += 1;
    }

    score += profile.symptoms.diabetes.count() * SYMPTOM_POINTS;
    score + hypertension_points(profile)
}

/// Raw cholesterol points for a profile.
#[must_use]
pub fn cholesterol_points(profile: &QuestionnaireProfile) -> u32 {
    let lifestyle = &profile.lifestyle;
    let mut score = 0;

    let age_threshold = match profile.gender {
        Gender::Male => MALE_CHOLESTEROL_AGE,
        Gender::Female => FEMALE_CHOLESTEROL_AGE,
    };
    if profile.age >= age_threshold {
        score += 2;
    }

    score += band_points(&CHOLESTEROL_BMI_POINTS, profile.bmi);

    if profile.family_history.has_cholesterol || profile.family_history.has_heart_disease {
        score += 3;
    }
    if lifestyle.exercise_frequency.is_inactive() {
        score += 2;
    }
    if lifestyle.smoking_status.is_current() {
        score += 2;
    }
    if lifestyle.alcohol_consumption == AlcoholConsumption::Heavy {
        score += 1;
    }

    score += profile.symptoms.cholesterol.count() * SYMPTOM_POINTS;
    score + hypertension_points(profile)
}

fn classify(score: u32, high: u32, medium: u32) -> RiskLevel {
    if score >= high {
        RiskLevel::High
    } else if score >= medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Diabetes risk level from onboarding answers.
#[must_use]
pub fn score_diabetes_risk(profile: &QuestionnaireProfile) -> RiskLevel {
    classify(diabetes_points(profile), DIABETES_HIGH_CUTOFF, DIABETES_MEDIUM_CUTOFF)
}

/// Cholesterol risk level from onboarding answers.
#[must_use]
pub fn score_cholesterol_risk(profile: &QuestionnaireProfile) -> RiskLevel {
    classify(
        cholesterol_points(profile),
        CHOLESTEROL_HIGH_CUTOFF,
        CHOLESTEROL_MEDIUM_CUTOFF,
    )
}

/// Recommendations driven only by the two levels.
#[must_use]
pub fn onboarding_recommendations(diabetes: RiskLevel, cholesterol: RiskLevel) -> Vec<String> {
    let mut lines: Vec<&str> = Vec::new();

    if diabetes == RiskLevel::High || cholesterol == RiskLevel::High {
        lines.extend(SEE_DOCTOR);
    }
    if diabetes != RiskLevel::Low {
        lines.extend(LIMIT_SUGAR);
    }
    if cholesterol != RiskLevel::Low {
        lines.extend(LIMIT_SATURATED_FAT);
    }
    lines.extend(GENERAL_ADVICE);

    lines.into_iter().map(str::to_string).collect()
}

/// Both onboarding levels with their recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingAssessment {
    pub diabetes_risk: RiskLevel,
    pub cholesterol_risk: RiskLevel,
    pub recommendations: Vec<String>,
}

impl OnboardingAssessment {
    /// The higher of the two levels.
    #[must_use]
    pub fn overall(&self) -> RiskLevel {
        self.diabetes_risk.max(self.cholesterol_risk)
    }
}

/// Score a profile on both onboarding scales.
#[must_use]
pub fn assess_profile(profile: &QuestionnaireProfile) -> OnboardingAssessment {
    let diabetes_risk = score_diabetes_risk(profile);
    let cholesterol_risk = score_cholesterol_risk(profile);
    OnboardingAssessment {
        diabetes_risk,
        cholesterol_risk,
        recommendations: onboarding_recommendations(diabetes_risk, cholesterol_risk),
    }
}
