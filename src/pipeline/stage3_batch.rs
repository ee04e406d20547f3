use crate::error::RiskError;
use crate::model::assessment::RiskAssessment;
use crate::model::record::PatientRecord;
use crate::model::thresholds::SummaryCuts;
use crate::model::tiers::{RiskTier, tier_order};
use crate::pipeline::stage2_classify::classify;
use crate::predictor::{PredictError, Predictor};

#[derive(Debug, Clone)]
pub struct BatchRow {
    // also the row index into the source table
    pub index: usize,
    pub prediction: u8,
    pub assessment: RiskAssessment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskSummary {
    pub total: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCount {
    pub tier: RiskTier,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub rows: Vec<BatchRow>,
    pub summary: RiskSummary,
    pub distribution: Vec<TierCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFilter {
    All,
    Tier(RiskTier),
}

impl RiskSummary {
    fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64 * 100.0
    }

    pub fn high_percent(&self) -> f64 {
        self.percent(self.high)
    }

    pub fn moderate_percent(&self) -> f64 {
        self.percent(self.moderate)
    }

    pub fn low_percent(&self) -> f64 {
        self.percent(self.low)
    }
}

pub fn evaluate_batch<P: Predictor + ?Sized>(
    records: &[PatientRecord],
    predictor: &P,
) -> Result<BatchResult, RiskError> {
    if records.is_empty() {
        return Err(RiskError::EmptyBatch);
    }

    let probabilities = predictor
        .predict_proba(records)
        .map_err(RiskError::PredictionFailed)?;
    if probabilities.len() != records.len() {
        return Err(RiskError::PredictionFailed(PredictError::CountMismatch {
            expected: records.len(),
            actual: probabilities.len(),
        }));
    }

    let mut rows = Vec::with_capacity(records.len());
    for (index, pair) in probabilities.into_iter().enumerate() {
        let assessment = classify(pair)?;
        rows.push(BatchRow {
            index,
            prediction: pair.predicted_class(),
            assessment,
        });
    }

    let summary = summarize(&rows, &SummaryCuts::default_v1());
    let distribution = tier_distribution(&rows);
    tracing::info!(
        patients = summary.total,
        high = summary.high,
        moderate = summary.moderate,
        low = summary.low,
        "batch evaluated"
    );

    Ok(BatchResult {
        rows,
        summary,
        distribution,
    })
}

pub fn summarize(rows: &[BatchRow], cuts: &SummaryCuts) -> RiskSummary {
    let mut summary = RiskSummary {
        total: rows.len(),
        high: 0,
        moderate: 0,
        low: 0,
    };
    for row in rows {
        let p = row.assessment.probability_positive;
        if p >= cuts.high {
            summary.high += 1;
        } else if p >= cuts.moderate {
            summary.moderate += 1;
        } else {
            summary.low += 1;
        }
    }
    summary
}

// Severity order, zero counts included.
pub fn tier_distribution(rows: &[BatchRow]) -> Vec<TierCount> {
    tier_order()
        .iter()
        .map(|&tier| TierCount {
            tier,
            count: rows.iter().filter(|r| r.assessment.tier == tier).count(),
        })
        .collect()
}

pub fn filter_by_tier(result: &BatchResult, filter: TierFilter) -> Vec<&BatchRow> {
    result
        .rows
        .iter()
        .filter(|row| match filter {
            TierFilter::All => true,
            TierFilter::Tier(tier) => row.assessment.tier == tier,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_batch.rs"]
mod tests;
