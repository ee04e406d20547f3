pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::assessment::RiskAssessment;

#[derive(Debug, Clone, Serialize)]
pub struct BucketStat {
    pub name: &'static str,
    pub range: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierStat {
    pub tier: &'static str,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub model: String,
    pub input: String,
    pub n_patients: usize,
    pub summary: Vec<BucketStat>,
    pub distribution: Vec<TierStat>,
    pub validation: Vec<String>,
    pub override_used: bool,
    pub filter: String,
    pub n_filtered: usize,
    pub exports: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputValue {
    pub column: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SingleReport {
    pub tool: String,
    pub version: String,
    pub model: String,
    pub prediction: u8,
    pub assessment: RiskAssessment,
    pub inputs: Vec<InputValue>,
    pub validation: Vec<String>,
}

pub const DISCLAIMER: &str = "This result is an initial screening aid only and does not replace a professional medical diagnosis. Always consult a specialist for diagnosis and treatment.";

// Same digit as `format_percent`, exact ties go to even.
pub fn round1(v: f64) -> f64 {
    format!("{v:.1}").parse().unwrap_or(v)
}

pub fn format_percent(v: f64) -> String {
    format!("{:.1}%", v)
}

pub fn format_probability(p: f64) -> String {
    format!("{:.6}", p)
}

pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
