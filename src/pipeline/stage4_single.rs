use crate::error::RiskError;
use crate::model::assessment::RiskAssessment;
use crate::model::record::PatientRecord;
use crate::pipeline::stage2_classify::classify;
use crate::predictor::{PredictError, Predictor};

pub fn evaluate_one<P: Predictor + ?Sized>(
    record: &PatientRecord,
    predictor: &P,
) -> Result<RiskAssessment, RiskError> {
    let pairs = predictor
        .predict_proba(std::slice::from_ref(record))
        .map_err(RiskError::PredictionFailed)?;
    let pair = pairs.first().copied().ok_or(RiskError::PredictionFailed(
        PredictError::CountMismatch {
            expected: 1,
            actual: 0,
        },
    ))?;
    let assessment = classify(pair)?;
    tracing::debug!(
        tier = assessment.tier.label(),
        probability = assessment.probability_positive,
        "single patient evaluated"
    );
    Ok(assessment)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_single.rs"]
mod tests;
