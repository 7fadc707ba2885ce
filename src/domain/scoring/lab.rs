//! Lab-panel scorer.
//!
//! Points are accumulated independently per supplied parameter using the
//! tables in `domain::thresholds`. The level is relative to the number of
//! supplied parameters `n`:
//!
//! - `score <= 5n` is low
//! - `score <= 12n` is medium
//! - anything above is high
//!
//! so partial panels stay comparable with full ones.

use std::collections::BTreeSet;

use crate::domain::lab::LabMeasurements;
use crate::domain::risk::{RiskLevel, RiskVerdict};
use crate::domain::thresholds::{self, MEDIUM_MARGIN_POINTS, OPTIMAL_POINTS};

/// Lines appended after the parameter notes for a low-risk panel.
pub const LOW_RISK_ADVICE: [&str; 2] = [
    "Hasil pemeriksaan Anda baik, pertahankan pola hidup sehat yang sudah dijalani.",
    "Tetap rutin berolahraga dan konsumsi makanan bergizi seimbang.",
];

/// Lines appended after the parameter notes for a medium or high-risk panel.
pub const ELEVATED_RISK_ADVICE: [&str; 5] = [
    "Kurangi konsumsi gula, garam, dan makanan tinggi lemak jenuh.",
    "Lakukan aktivitas fisik minimal 150 menit per minggu.",
    "Jaga berat badan dalam rentang ideal.",
    "Hentikan kebiasaan merokok dan batasi konsumsi alkohol.",
    "Tidur cukup 7-8 jam dan kelola stres dengan baik.",
];

pub const MEDIUM_RISK_FOLLOW_UP: &str =
    "Lakukan pemeriksaan ulang dalam 3-6 bulan untuk memantau perkembangan.";

pub const HIGH_RISK_FOLLOW_UP: &str =
    "Segera konsultasikan hasil ini dengan dokter dan lakukan pemeriksaan ulang dalam 1-3 bulan.";

/// Rejections raised before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LabInputError {
    #[error("No glucose or cholesterol parameter supplied")]
    NoParameters,
}

/// Level for a lab score given `present` supplied parameters.
#[must_use]
pub fn classify_lab_score(score: u32, present: usize) -> RiskLevel {
    let n = u32::try_from(present).unwrap_or(u32::MAX);
    let max_optimal = n.saturating_mul(OPTIMAL_POINTS);
    let max_medium = max_optimal.saturating_add(n.saturating_mul(MEDIUM_MARGIN_POINTS));

    if score <= max_optimal {
        RiskLevel::Low
    } else if score <= max_medium {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Score a lab panel.
///
/// Values are assumed to be validated upstream (`LabMeasurements::validate`).
///
/// # Errors
/// Returns `LabInputError::NoParameters` if no parameter of either group is supplied.
pub fn score_lab_measurements(input: &LabMeasurements) -> Result<RiskVerdict, LabInputError> {
    let present = input.present_count();
    if present == 0 {
        return Err(LabInputError::NoParameters);
    }

    let mut score = 0u32;
    let mut detected_conditions = BTreeSet::new();
    let mut recommendations = Vec::with_capacity(present + ELEVATED_RISK_ADVICE.len() + 1);

    for (parameter, value) in input.readings() {
        detected_conditions.insert(parameter.group());

        let band = thresholds::table_for(parameter).classify(value);
        score += band.points;

        if let Some(note) = band.note {
            recommendations.push(format!(
                "{}: {} {} ({})",
                parameter.label(),
                value,
                parameter.unit(),
                note
            ));
        }
    }

    let level = classify_lab_score(score, present);

    match level {
        RiskLevel::Low => recommendations.extend(LOW_RISK_ADVICE.iter().map(|s| (*s).to_string())),
        RiskLevel::Medium | RiskLevel::High => {
            recommendations.extend(ELEVATED_RISK_ADVICE.iter().map(|s| (*s).to_string()));
        }
    }

    match level {
        RiskLevel::Low => {}
        RiskLevel::Medium => recommendations.push(MEDIUM_RISK_FOLLOW_UP.to_string()),
        RiskLevel::High => recommendations.push(HIGH_RISK_FOLLOW_UP.to_string()),
    }

    Ok(RiskVerdict {
        level,
        score,
        detected_conditions,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lab::LabParameter;
    use crate::domain::risk::Condition;
    use proptest::prelude::*;

    fn optimal_panel() -> LabMeasurements {
        LabMeasurements {
            glucose_fasting: Some(90.0),
            glucose_2h: Some(120.0),
            hba1c: Some(5.2),
            cholesterol_total: Some(180.0),
            cholesterol_ldl: Some(100.0),
            cholesterol_hdl: Some(50.0),
            triglycerides: Some(120.0),
        }
    }

    fn follow_up(level: RiskLevel) -> Option<&'static str> {
        match level {
            RiskLevel::Low => None,
            RiskLevel::Medium => Some(MEDIUM_RISK_FOLLOW_UP),
            RiskLevel::High => Some(HIGH_RISK_FOLLOW_UP),
        }
    }

    #[test]
    fn test_empty_panel_is_rejected() {
        assert_eq!(
            score_lab_measurements(&LabMeasurements::default()),
            Err(LabInputError::NoParameters)
        );
    }

    #[test]
    fn test_optimal_panel_is_low() {
        let verdict = score_lab_measurements(&optimal_panel()).expect("Should score");

        // 5 * 6 + 0 for the normal two-hour glucose
        assert_eq!(verdict.score, 30);
        assert_eq!(verdict.level, RiskLevel::Low);
        assert!(verdict.evaluated(Condition::Diabetes));
        assert!(verdict.evaluated(Condition::Cholesterol));

        // six notes (no note for normal glucose2h) + two low-risk lines, no follow-up
        assert_eq!(verdict.recommendations.len(), 6 + LOW_RISK_ADVICE.len());
        assert_eq!(verdict.recommendations.last().map(String::as_str), Some(LOW_RISK_ADVICE[1]));
    }

    #[test]
    fn test_notes_follow_field_order() {
        let verdict = score_lab_measurements(&optimal_panel()).expect("Should score");
        let labels = [
            LabParameter::GlucoseFasting,
            LabParameter::Hba1c,
            LabParameter::CholesterolTotal,
            LabParameter::CholesterolLdl,
            LabParameter::CholesterolHdl,
            LabParameter::Triglycerides,
        ];
        for (note, parameter) in verdict.recommendations.iter().zip(labels) {
            assert!(note.starts_with(parameter.label()), "{note}");
        }
        assert_eq!(verdict.recommendations[0], "Gula darah puasa: 90 mg/dL (normal)");
    }

    #[test]
    fn test_cholesterol_only_panel() {
        let lab = LabMeasurements {
            cholesterol_total: Some(250.0),
            cholesterol_ldl: Some(170.0),
            ..Default::default()
        };
        let verdict = score_lab_measurements(&lab).expect("Should score");

        assert_eq!(verdict.score, 34);
        // n = 2: low <= 10, medium <= 24
        assert_eq!(verdict.level, RiskLevel::High);
        assert!(!verdict.evaluated(Condition::Diabetes));
        assert_eq!(verdict.recommendations.last().map(String::as_str), Some(HIGH_RISK_FOLLOW_UP));
        assert_eq!(verdict.recommendations.len(), 2 + ELEVATED_RISK_ADVICE.len() + 1);
    }

    #[test]
    fn test_borderline_panel_is_medium() {
        let lab = LabMeasurements {
            cholesterol_total: Some(220.0),
            triglycerides: Some(120.0),
            ..Default::default()
        };
        let verdict = score_lab_measurements(&lab).expect("Should score");
        assert_eq!(verdict.score, 17);
        assert_eq!(verdict.level, RiskLevel::Medium);
        assert_eq!(verdict.recommendations.last().map(String::as_str), Some(MEDIUM_RISK_FOLLOW_UP));
    }

    // A single high fasting glucose earns the same points as a normal one.
    #[test]
    fn test_high_glucose_alone_stays_low() {
        let lab = LabMeasurements {
            glucose_fasting: Some(180.0),
            hba1c: Some(8.0),
            ..Default::default()
        };
        let verdict = score_lab_measurements(&lab).expect("Should score");
        assert_eq!(verdict.score, 10);
        assert_eq!(verdict.level, RiskLevel::Low);
        assert!(verdict.recommendations[0].contains("berisiko diabetes"));
        assert!(verdict.recommendations[1].contains("berisiko diabetes"));
    }

    #[test]
    fn test_hypoglycemia_note() {
        let lab = LabMeasurements {
            glucose_fasting: Some(60.0),
            ..Default::default()
        };
        let verdict = score_lab_measurements(&lab).expect("Should score");
        assert_eq!(verdict.score, 3);
        assert_eq!(verdict.level, RiskLevel::Low);
        assert!(verdict.recommendations[0].contains("hipoglikemia"));
    }

    #[test]
    fn test_classify_lab_score_boundaries() {
        assert_eq!(classify_lab_score(15, 3), RiskLevel::Low);
        assert_eq!(classify_lab_score(16, 3), RiskLevel::Medium);
        assert_eq!(classify_lab_score(36, 3), RiskLevel::Medium);
        assert_eq!(classify_lab_score(37, 3), RiskLevel::High);
    }

    fn arb_value(parameter: LabParameter) -> impl Strategy<Value = Option<f64>> {
        let (min, max) = parameter.plausible_range();
        prop::option::of(min..=max)
    }

    prop_compose! {
        fn arb_panel()(
            glucose_fasting in arb_value(LabParameter::GlucoseFasting),
            glucose_2h in arb_value(LabParameter::Glucose2h),
            hba1c in arb_value(LabParameter::Hba1c),
            cholesterol_total in arb_value(LabParameter::CholesterolTotal),
            cholesterol_ldl in arb_value(LabParameter::CholesterolLdl),
            cholesterol_hdl in arb_value(LabParameter::CholesterolHdl),
            triglycerides in arb_value(LabParameter::Triglycerides),
        ) -> LabMeasurements {
            LabMeasurements {
                glucose_fasting,
                glucose_2h,
                hba1c,
                cholesterol_total,
                cholesterol_ldl,
                cholesterol_hdl,
                triglycerides,
            }
        }
    }

    /// Representative optimal, borderline and high readings per parameter.
    const LADDERS: [(LabParameter, [f64; 3]); 6] = [
        (LabParameter::GlucoseFasting, [90.0, 105.0, 130.0]),
        (LabParameter::Glucose2h, [120.0, 160.0, 220.0]),
        (LabParameter::Hba1c, [5.0, 6.0, 7.5]),
        (LabParameter::CholesterolTotal, [180.0, 220.0, 260.0]),
        (LabParameter::CholesterolLdl, [110.0, 145.0, 180.0]),
        (LabParameter::Triglycerides, [120.0, 175.0, 240.0]),
    ];

    proptest! {
        #[test]
        fn prop_level_matches_relative_thresholds(lab in arb_panel().prop_filter("non-empty", |l| !l.is_empty())) {
            let verdict = score_lab_measurements(&lab).expect("Should score");
            let n = lab.present_count() as u32;

            prop_assert_eq!(verdict.level == RiskLevel::Low, verdict.score <= 5 * n);
            prop_assert_eq!(verdict.level == RiskLevel::High, verdict.score > 12 * n);
        }

        #[test]
        fn prop_moving_a_parameter_up_never_lowers_risk(base in arb_panel(), ladder in 0usize..LADDERS.len()) {
            let (parameter, values) = LADDERS[ladder];
            let mut previous: Option<RiskVerdict> = None;

            for value in values {
                let mut lab = base;
                lab.set(parameter, Some(value));
                let verdict = score_lab_measurements(&lab).expect("Should score");

                if let Some(prev) = &previous {
                    prop_assert!(verdict.score >= prev.score);
                    prop_assert!(verdict.level >= prev.level);
                }
                previous = Some(verdict);
            }
        }

        #[test]
        fn prop_all_optimal_is_low(lab in arb_panel().prop_filter("non-empty", |l| !l.is_empty())) {
            let mut optimal = LabMeasurements::default();
            let reference = optimal_panel();
            for (parameter, _) in lab.readings() {
                optimal.set(parameter, reference.get(parameter));
            }
            let verdict = score_lab_measurements(&optimal).expect("Should score");
            prop_assert_eq!(verdict.level, RiskLevel::Low);
        }

        #[test]
        fn prop_recommendations_end_with_follow_up(lab in arb_panel().prop_filter("non-empty", |l| !l.is_empty())) {
            let verdict = score_lab_measurements(&lab).expect("Should score");
            let last = verdict.recommendations.last().map(String::as_str);

            match follow_up(verdict.level) {
                Some(line) => prop_assert_eq!(last, Some(line)),
                None => {
                    prop_assert!(!verdict.recommendations.iter().any(|r| r == MEDIUM_RISK_FOLLOW_UP || r == HIGH_RISK_FOLLOW_UP));
                }
            }

            let notes = &verdict.recommendations[..verdict.recommendations.len()
                - if verdict.level == RiskLevel::Low { LOW_RISK_ADVICE.len() } else { ELEVATED_RISK_ADVICE.len() + 1 }];
            prop_assert!(notes.len() <= lab.present_count());
            let unique: BTreeSet<&String> = notes.iter().collect();
            prop_assert_eq!(unique.len(), notes.len());
        }

        #[test]
        fn prop_scoring_is_deterministic(lab in arb_panel().prop_filter("non-empty", |l| !l.is_empty())) {
            let first = score_lab_measurements(&lab).expect("Should score");
            let second = score_lab_measurements(&lab).expect("Should score");
            prop_assert_eq!(first, second);
        }
    }
}
