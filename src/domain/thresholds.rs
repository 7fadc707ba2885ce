//! Lab threshold tables.
//!
//! Each lab parameter maps a value onto ordered bands. A band carries the
//! points it contributes to the lab score and the note emitted for it. Bands
//! are checked in order; a value above every explicit band falls into the
//! table's `above` band.
//!
//! Some tables award the same points in every band (HbA1c, HDL). Any reading
//! counts as informative there, so only the note differs.

use super::lab::LabParameter;

/// Upper bound of a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpperBound {
    /// `value < bound`
    Below(f64),
    /// `value <= bound`
    AtMost(f64),
}

impl UpperBound {
    #[must_use]
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Self::Below(bound) => value < bound,
            Self::AtMost(bound) => value <= bound,
        }
    }
}

/// One scoring band of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub points: u32,
    /// Finding text; `None` means the band emits no recommendation note.
    pub note: Option<&'static str>,
}

/// Ordered bands for a single parameter.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable {
    pub parameter: LabParameter,
    pub bands: &'static [(UpperBound, Band)],
    pub above: Band,
}

impl ThresholdTable {
    /// Band a value falls into.
    #[must_use]
    pub fn classify(&self, value: f64) -> Band {
        self.bands
            .iter()
            .find(|(upper, _)| upper.admits(value))
            .map_or(self.above, |(_, band)| *band)
    }

    /// Every band, lowest first.
    pub fn all_bands(&self) -> impl Iterator<Item = Band> + '_ {
        self.bands.iter().map(|(_, b)| *b).chain(std::iter::once(self.above))
    }
}

pub const GLUCOSE_FASTING: ThresholdTable = ThresholdTable {
    parameter: LabParameter::GlucoseFasting,
    bands: &[
        (
            UpperBound::Below(70.0),
            Band { points: 3, note: Some("di bawah normal, waspadai risiko hipoglikemia") },
        ),
        (UpperBound::AtMost(105.0), Band { points: 5, note: Some("normal") }),
    ],
    above: Band { points: 5, note: Some("di atas normal, berisiko diabetes") },
};

pub const GLUCOSE_2H: ThresholdTable = ThresholdTable {
    parameter: LabParameter::Glucose2h,
    bands: &[
        (UpperBound::Below(140.0), Band { points: 0, note: None }),
        (UpperBound::Below(200.0), Band { points: 2, note: Some("masuk kategori pra-diabetes") }),
    ],
    above: Band { points: 3, note: Some("indikasi kuat diabetes") },
};

pub const HBA1C: ThresholdTable = ThresholdTable {
    parameter: LabParameter::Hba1c,
    bands: &[(UpperBound::Below(6.0), Band { points: 5, note: Some("normal") })],
    above: Band { points: 5, note: Some("tinggi, berisiko diabetes") },
};

pub const CHOLESTEROL_TOTAL: ThresholdTable = ThresholdTable {
    parameter: LabParameter::CholesterolTotal,
    bands: &[
        (UpperBound::Below(200.0), Band { points: 5, note: Some("optimal") }),
        (UpperBound::AtMost(239.0), Band { points: 12, note: Some("batas tinggi (borderline)") }),
    ],
    above: Band { points: 17, note: Some("tinggi") },
};

pub const CHOLESTEROL_LDL: ThresholdTable = ThresholdTable {
    parameter: LabParameter::CholesterolLdl,
    bands: &[
        (UpperBound::Below(130.0), Band { points: 5, note: Some("optimal") }),
        (UpperBound::AtMost(159.0), Band { points: 12, note: Some("batas tinggi (borderline)") }),
    ],
    above: Band { points: 17, note: Some("tinggi") },
};

pub const CHOLESTEROL_HDL: ThresholdTable = ThresholdTable {
    parameter: LabParameter::CholesterolHdl,
    bands: &[
        (
            UpperBound::Below(40.0),
            Band { points: 5, note: Some("rendah, kurang baik untuk kesehatan jantung") },
        ),
        (UpperBound::AtMost(60.0), Band { points: 5, note: Some("normal") }),
    ],
    above: Band { points: 5, note: Some("sangat baik") },
};

// 200 itself counts as high.
pub const TRIGLYCERIDES: ThresholdTable = ThresholdTable {
    parameter: LabParameter::Triglycerides,
    bands: &[
        (UpperBound::Below(150.0), Band { points: 5, note: Some("optimal") }),
        (UpperBound::Below(200.0), Band { points: 12, note: Some("batas tinggi (borderline)") }),
    ],
    above: Band { points: 17, note: Some("tinggi") },
};

/// Table for a parameter.
#[must_use]
pub fn table_for(parameter: LabParameter) -> &'static ThresholdTable {
    match parameter {
        LabParameter::GlucoseFasting => &GLUCOSE_FASTING,
        LabParameter::Glucose2h => &GLUCOSE_2H,
        LabParameter::Hba1c => &HBA1C,
        LabParameter::CholesterolTotal => &CHOLESTEROL_TOTAL,
        LabParameter::CholesterolLdl => &CHOLESTEROL_LDL,
        LabParameter::CholesterolHdl => &CHOLESTEROL_HDL,
        LabParameter::Triglycerides => &TRIGLYCERIDES,
    }
}

/// Points awarded to a "normal" reading, used as the per-parameter optimum.
pub const OPTIMAL_POINTS: u32 = 5;

/// Extra points per parameter tolerated before a panel counts as high.
pub const MEDIUM_MARGIN_POINTS: u32 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glucose_fasting_bands() {
        assert_eq!(GLUCOSE_FASTING.classify(69.9).points, 3);
        assert_eq!(GLUCOSE_FASTING.classify(70.0).note, Some("normal"));
        assert_eq!(GLUCOSE_FASTING.classify(105.0).note, Some("normal"));
        let high = GLUCOSE_FASTING.classify(105.5);
        assert_eq!(high.points, 5);
        assert_ne!(high.note, Some("normal"));
    }

    #[test]
    fn test_glucose_2h_normal_emits_no_note() {
        let normal = GLUCOSE_2H.classify(139.0);
        assert_eq!(normal.points, 0);
        assert!(normal.note.is_none());
        assert_eq!(GLUCOSE_2H.classify(140.0).points, 2);
        assert_eq!(GLUCOSE_2H.classify(199.0).points, 2);
        assert_eq!(GLUCOSE_2H.classify(200.0).points, 3);
    }

    // HbA1c and HDL award identical points in every band; only notes differ.
    #[test]
    fn test_flat_point_tables_are_preserved() {
        assert_eq!(HBA1C.classify(5.9).points, 5);
        assert_eq!(HBA1C.classify(6.0).points, 5);
        assert_ne!(HBA1C.classify(5.9).note, HBA1C.classify(6.0).note);

        for value in [30.0, 40.0, 60.0, 75.0] {
            assert_eq!(CHOLESTEROL_HDL.classify(value).points, 5);
        }
        assert!(CHOLESTEROL_HDL.all_bands().all(|b| b.points == OPTIMAL_POINTS));
    }

    #[test]
    fn test_cholesterol_boundaries() {
        assert_eq!(CHOLESTEROL_TOTAL.classify(199.0).points, 5);
        assert_eq!(CHOLESTEROL_TOTAL.classify(200.0).points, 12);
        assert_eq!(CHOLESTEROL_TOTAL.classify(239.0).points, 12);
        assert_eq!(CHOLESTEROL_TOTAL.classify(240.0).points, 17);

        assert_eq!(CHOLESTEROL_LDL.classify(129.0).points, 5);
        assert_eq!(CHOLESTEROL_LDL.classify(130.0).points, 12);
        assert_eq!(CHOLESTEROL_LDL.classify(159.0).points, 12);
        assert_eq!(CHOLESTEROL_LDL.classify(160.0).points, 17);

        assert_eq!(TRIGLYCERIDES.classify(149.0).points, 5);
        assert_eq!(TRIGLYCERIDES.classify(150.0).points, 12);
        assert_eq!(TRIGLYCERIDES.classify(199.0).points, 12);
        assert_eq!(TRIGLYCERIDES.classify(200.0).points, 17);
    }

    #[test]
    fn test_tables_are_ordered_by_points() {
        for p in LabParameter::ALL {
            let table = table_for(p);
            assert_eq!(table.parameter, p);
            if p == LabParameter::GlucoseFasting {
                // hypoglycemia band sits below the normal band
                continue;
            }
            let points: Vec<u32> = table.all_bands().map(|b| b.points).collect();
            assert!(points.windows(2).all(|w| w[0] <= w[1]), "{p:?}: {points:?}");
        }
    }
}
