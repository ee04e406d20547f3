pub const FIELD_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Age,
    Gender,
    Bmi,
    SystolicBp,
    DiastolicBp,
    HbA1c,
    SerumCreatinine,
    Gfr,
    HemoglobinLevels,
    CholesterolTotal,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Age,
        Field::Gender,
        Field::Bmi,
        Field::SystolicBp,
        Field::DiastolicBp,
        Field::HbA1c,
        Field::SerumCreatinine,
        Field::Gfr,
        Field::HemoglobinLevels,
        Field::CholesterolTotal,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Bmi => "BMI",
            Field::SystolicBp => "SystolicBP",
            Field::DiastolicBp => "DiastolicBP",
            Field::HbA1c => "HbA1c",
            Field::SerumCreatinine => "SerumCreatinine",
            Field::Gfr => "GFR",
            Field::HemoglobinLevels => "HemoglobinLevels",
            Field::CholesterolTotal => "CholesterolTotal",
        }
    }

    // exact, case-sensitive
    pub fn from_column(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.column_name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

// A field is `None` when the source table has no column for it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PatientRecord {
    values: [Option<f64>; FIELD_COUNT],
}

impl PatientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: f64) {
        self.values[field.index()] = Some(value);
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        self.values[field.index()]
    }

    pub fn present_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.get(*f).is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityPair {
    pub negative: f64,
    pub positive: f64,
}

impl ProbabilityPair {
    pub fn new(negative: f64, positive: f64) -> Self {
        Self { negative, positive }
    }

    pub fn from_positive(positive: f64) -> Self {
        Self {
            negative: 1.0 - positive,
            positive,
        }
    }

    // tie -> class 0
    pub fn predicted_class(&self) -> u8 {
        if self.positive > self.negative { 1 } else { 0 }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/record.rs"]
mod tests;
