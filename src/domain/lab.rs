//! Lab measurement input for the lab-panel scorer.
//!
//! Values arrive from parsed lab reports or manual entry. Every field is
//! optional so partial panels can be scored.

use serde::{Deserialize, Serialize};

use super::risk::Condition;

/// A single lab parameter, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabParameter {
    GlucoseFasting,
    Glucose2h,
    Hba1c,
    CholesterolTotal,
    #[serde(rename = "cholesterolLDL")]
    CholesterolLdl,
    #[serde(rename = "cholesterolHDL")]
    CholesterolHdl,
    Triglycerides,
}

impl LabParameter {
    /// All parameters in input field order.
    pub const ALL: [LabParameter; 7] = [
        Self::GlucoseFasting,
        Self::Glucose2h,
        Self::Hba1c,
        Self::CholesterolTotal,
        Self::CholesterolLdl,
        Self::CholesterolHdl,
        Self::Triglycerides,
    ];

    /// Condition group the parameter belongs to.
    #[must_use]
    pub fn group(&self) -> Condition {
        match self {
            Self::GlucoseFasting | Self::Glucose2h | Self::Hba1c => Condition::Diabetes,
            Self::CholesterolTotal
            | Self::CholesterolLdl
            | Self::CholesterolHdl
            | Self::Triglycerides => Condition::Cholesterol,
        }
    }

    /// Display name used in recommendation notes.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::GlucoseFasting => "Gula darah puasa",
            Self::Glucose2h => "Gula darah 2 jam setelah makan",
            Self::Hba1c => "HbA1c",
            Self::CholesterolTotal => "Kolesterol total",
            Self::CholesterolLdl => "Kolesterol LDL",
            Self::CholesterolHdl => "Kolesterol HDL",
            Self::Triglycerides => "Trigliserida",
        }
    }

    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Hba1c => "%",
            _ => "mg/dL",
        }
    }

    /// Plausible measurement range `[min, max]` checked by `LabMeasurements::validate`.
    #[must_use]
    pub fn plausible_range(&self) -> (f64, f64) {
        match self {
            Self::GlucoseFasting | Self::Glucose2h => (50.0, 500.0),
            Self::Hba1c => (3.0, 20.0),
            Self::CholesterolTotal => (50.0, 500.0),
            Self::CholesterolLdl => (10.0, 400.0),
            Self::CholesterolHdl => (5.0, 200.0),
            Self::Triglycerides => (20.0, 2000.0),
        }
    }
}

/// Lab panel submitted for scoring.
///
/// Unknown keys are rejected so a misspelled field cannot drop a reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabMeasurements {
    /// Fasting plasma glucose (mg/dL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose_fasting: Option<f64>,

    /// Two-hour post-meal glucose (mg/dL)
    #[serde(default, rename = "glucose2h", skip_serializing_if = "Option::is_none")]
    pub glucose_2h: Option<f64>,

    /// Glycated hemoglobin (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol_total: Option<f64>,

    #[serde(default, rename = "cholesterolLDL", skip_serializing_if = "Option::is_none")]
    pub cholesterol_ldl: Option<f64>,

    #[serde(default, rename = "cholesterolHDL", skip_serializing_if = "Option::is_none")]
    pub cholesterol_hdl: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triglycerides: Option<f64>,
}

impl LabMeasurements {
    /// Value for a parameter, if supplied.
    #[must_use]
    pub fn get(&self, parameter: LabParameter) -> Option<f64> {
        match parameter {
            LabParameter::GlucoseFasting => self.glucose_fasting,
            LabParameter::Glucose2h => self.glucose_2h,
            LabParameter::Hba1c => self.hba1c,
            LabParameter::CholesterolTotal => self.cholesterol_total,
            LabParameter::CholesterolLdl => self.cholesterol_ldl,
            LabParameter::CholesterolHdl => self.cholesterol_hdl,
            LabParameter::Triglycerides => self.triglycerides,
        }
    }

    /// Set a parameter value.
    pub fn set(&mut self, parameter: LabParameter, value: Option<f64>) {
        let slot = match parameter {
            LabParameter::GlucoseFasting => &mut self.glucose_fasting,
            LabParameter::Glucose2h => &mut self.glucose_2h,
            LabParameter::Hba1c => &mut self.hba1c,
            LabParameter::CholesterolTotal => &mut self.cholesterol_total,
            LabParameter::CholesterolLdl => &mut self.cholesterol_ldl,
            LabParameter::CholesterolHdl => &mut self.cholesterol_hdl,
            LabParameter::Triglycerides => &mut self.triglycerides,
        };
        *slot = value;
    }

    /// Supplied readings in input field order.
    pub fn readings(&self) -> impl Iterator<Item = (LabParameter, f64)> + '_ {
        LabParameter::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    /// Number of supplied parameters.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.readings().count()
    }

    /// Whether any parameter of the given group is supplied.
    #[must_use]
    pub fn has_group(&self, group: Condition) -> bool {
        self.readings().any(|(p, _)| p.group() == group)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    /// Validate that supplied values are finite and within plausible ranges.
    ///
    /// Scoring assumes validated input; this is the upstream check callers run
    /// before handing a panel to the scorer.
    ///
    /// # Errors
    /// Returns every violation as a message.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.is_empty() {
            errors.push("At least one glucose or cholesterol parameter is required".to_string());
        }

        for (parameter, value) in self.readings() {
            let (min, max) = parameter.plausible_range();
            if !value.is_finite() {
                errors.push(format!("{} must be a finite number", parameter.label()));
            } else if !(min..=max).contains(&value) {
                errors.push(format!(
                    "{} {} out of range [{}, {}] {}",
                    parameter.label(),
                    value,
                    min,
                    max,
                    parameter.unit()
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_follow_field_order() {
        let lab = LabMeasurements {
            triglycerides: Some(120.0),
            glucose_fasting: Some(90.0),
            cholesterol_hdl: Some(55.0),
            ..Default::default()
        };

        let order: Vec<LabParameter> = lab.readings().map(|(p, _)| p).collect();
        assert_eq!(
            order,
            vec![
                LabParameter::GlucoseFasting,
                LabParameter::CholesterolHdl,
                LabParameter::Triglycerides
            ]
        );
        assert_eq!(lab.present_count(), 3);
        assert!(lab.has_group(Condition::Diabetes));
        assert!(lab.has_group(Condition::Cholesterol));
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{"glucoseFasting": 98, "glucose2h": 150, "cholesterolLDL": 140, "cholesterolHDL": 45}"#;
        let lab: LabMeasurements = serde_json::from_str(json).expect("Should parse");
        assert_eq!(lab.glucose_fasting, Some(98.0));
        assert_eq!(lab.glucose_2h, Some(150.0));
        assert_eq!(lab.cholesterol_ldl, Some(140.0));
        assert_eq!(lab.cholesterol_hdl, Some(45.0));
        assert_eq!(lab.hba1c, None);

        let back = serde_json::to_value(lab).expect("Should serialize");
        assert!(back.get("hba1c").is_none());
        assert_eq!(back["cholesterolLDL"], 140.0);
    }

    #[test]
    fn test_misspelled_field_is_rejected() {
        let json = r#"{"glucoseFasting": 90, "cholesterolLdl": 170}"#;
        let err = serde_json::from_str::<LabMeasurements>(json).expect_err("Should reject");
        assert!(err.to_string().contains("cholesterolLdl"), "{err}");
    }

    #[test]
    fn test_validation() {
        let valid = LabMeasurements {
            glucose_fasting: Some(95.0),
            hba1c: Some(5.4),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let invalid = LabMeasurements {
            glucose_fasting: Some(20.0), // below 50
            hba1c: Some(f64::NAN),
            ..Default::default()
        };
        let errors = invalid.validate().expect_err("Should reject");
        assert_eq!(errors.len(), 2);

        assert!(LabMeasurements::default().validate().is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut lab = LabMeasurements::default();
        for p in LabParameter::ALL {
            lab.set(p, Some(100.0));
        }
        assert_eq!(lab.present_count(), 7);
        lab.set(LabParameter::Hba1c, None);
        assert_eq!(lab.get(LabParameter::Hba1c), None);
    }
}
