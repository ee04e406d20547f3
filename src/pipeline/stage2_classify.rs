use crate::error::RiskError;
use crate::model::assessment::RiskAssessment;
use crate::model::record::ProbabilityPair;
use crate::model::thresholds::TierThresholds;
use crate::model::tiers::RiskTier;

const SUM_TOLERANCE: f64 = 1e-6;

pub fn classify(pair: ProbabilityPair) -> Result<RiskAssessment, RiskError> {
    classify_with(pair, &TierThresholds::default_v1())
}

pub fn classify_with(
    pair: ProbabilityPair,
    thresholds: &TierThresholds,
) -> Result<RiskAssessment, RiskError> {
    check_pair(pair)?;
    let tier = tier_for(pair.positive, thresholds);
    Ok(RiskAssessment {
        tier,
        recommendation: tier.recommendation(),
        severity: tier.severity(),
        probability_positive: pair.positive,
        probability_negative: pair.negative,
    })
}

// Lower bounds are inclusive.
pub fn tier_for(p: f64, thresholds: &TierThresholds) -> RiskTier {
    if p >= thresholds.high {
        RiskTier::HighRisk
    } else if p >= thresholds.moderate {
        RiskTier::ModerateRisk
    } else if p >= thresholds.low {
        RiskTier::LowRisk
    } else {
        RiskTier::MinimalRisk
    }
}

fn check_pair(pair: ProbabilityPair) -> Result<(), RiskError> {
    let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if !in_unit(pair.positive)
        || !in_unit(pair.negative)
        || (pair.positive + pair.negative - 1.0).abs() > SUM_TOLERANCE
    {
        return Err(RiskError::InvalidProbability {
            negative: pair.negative,
            positive: pair.positive,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_classify.rs"]
mod tests;
