use serde::Serialize;

use crate::model::tiers::{RiskTier, Severity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub recommendation: &'static str,
    pub severity: Severity,
    pub probability_positive: f64,
    pub probability_negative: f64,
}
