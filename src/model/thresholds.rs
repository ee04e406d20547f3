use crate::model::record::Field;

#[derive(Debug, Clone)]
pub struct TierThresholds {
    pub high: f64,
    pub moderate: f64,
    pub low: f64,
}

// Coarser than TierThresholds: everything under `moderate` is one "low" bucket.
#[derive(Debug, Clone)]
pub struct SummaryCuts {
    pub high: f64,
    pub moderate: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRange {
    pub field: Field,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl TierThresholds {
    pub fn default_v1() -> Self {
        Self {
            high: 0.8,
            moderate: 0.6,
            low: 0.4,
        }
    }
}

impl SummaryCuts {
    pub fn default_v1() -> Self {
        Self {
            high: 0.8,
            moderate: 0.6,
        }
    }
}

impl FieldRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// Inclusive. Gender is binary and not listed.
pub fn field_ranges() -> &'static [FieldRange] {
    const fn range(field: Field, min: f64, max: f64, unit: &'static str) -> FieldRange {
        FieldRange {
            field,
            min,
            max,
            unit,
        }
    }
    static RANGES: [FieldRange; 9] = [
        range(Field::Age, 0.0, 120.0, "years"),
        range(Field::Bmi, 10.0, 50.0, "kg/m²"),
        range(Field::SystolicBp, 70.0, 250.0, "mmHg"),
        range(Field::DiastolicBp, 40.0, 150.0, "mmHg"),
        range(Field::HbA1c, 3.0, 15.0, "%"),
        range(Field::SerumCreatinine, 0.3, 10.0, "mg/dL"),
        range(Field::Gfr, 5.0, 150.0, "mL/min/1.73m²"),
        range(Field::HemoglobinLevels, 5.0, 20.0, "g/dL"),
        range(Field::CholesterolTotal, 100.0, 500.0, "mg/dL"),
    ];
    &RANGES
}
