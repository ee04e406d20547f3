pub mod logistic;
pub mod store;

use thiserror::Error;

use crate::model::record::{Field, PatientRecord, ProbabilityPair};

pub use logistic::LogisticModel;
pub use store::{MODEL_STORE, ModelStore};

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("row {row}: missing feature {}", .field.column_name())]
    MissingFeature { row: usize, field: Field },

    #[error("row {row}: non-finite value in model input or output")]
    NonFinite { row: usize },

    #[error("model returned {actual} probability pairs for {expected} records")]
    CountMismatch { expected: usize, actual: usize },
}

// One call scores a whole slice of records.
pub trait Predictor {
    fn required_features(&self) -> &[Field];

    fn predict_proba(&self, records: &[PatientRecord])
    -> Result<Vec<ProbabilityPair>, PredictError>;
}

#[cfg(test)]
pub struct FnPredictor<F>(pub F);

#[cfg(test)]
impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&[PatientRecord]) -> Result<Vec<ProbabilityPair>, PredictError>,
{
    fn required_features(&self) -> &[Field] {
        &Field::ALL
    }

    fn predict_proba(
        &self,
        records: &[PatientRecord],
    ) -> Result<Vec<ProbabilityPair>, PredictError> {
        (self.0)(records)
    }
}
