use crate::error::RiskError;
use crate::model::record::{Field, PatientRecord};
use crate::model::thresholds::{FieldRange, field_ranges};

#[derive(Debug, Clone, PartialEq)]
pub struct RangeViolation {
    pub field: Field,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<RangeViolation>,
}

impl RangeViolation {
    pub fn message(&self) -> String {
        let rows = if self.count == 1 { "row" } else { "rows" };
        format!(
            "{} must be between {} and {} {} (found {} invalid {})",
            self.field.column_name(),
            self.min,
            self.max,
            self.unit,
            self.count,
            rows
        )
    }
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn requires_override(&self) -> bool {
        !self.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(RangeViolation::message).collect()
    }
}

pub fn validate(records: &[PatientRecord]) -> ValidationReport {
    let mut violations = Vec::new();
    for range in field_ranges() {
        match count_out_of_range(records, range) {
            Some(count) if count > 0 => violations.push(RangeViolation {
                field: range.field,
                min: range.min,
                max: range.max,
                unit: range.unit,
                count,
            }),
            _ => {}
        }
    }
    ValidationReport { violations }
}

// `None` when no record carries the field.
fn count_out_of_range(records: &[PatientRecord], range: &FieldRange) -> Option<usize> {
    let mut present = false;
    let mut count = 0usize;
    for record in records {
        if let Some(v) = record.get(range.field) {
            present = true;
            if !range.contains(v) {
                count += 1;
            }
        }
    }
    present.then_some(count)
}

pub fn gate(report: &ValidationReport, allow_out_of_range: bool) -> Result<(), RiskError> {
    if report.requires_override() && !allow_out_of_range {
        return Err(RiskError::OverrideRequired {
            violations: report.violations.len(),
        });
    }
    if report.requires_override() {
        tracing::warn!(
            violations = report.violations.len(),
            "proceeding despite out-of-range values"
        );
    }
    Ok(())
}

pub fn require_columns(columns: &[String], required: &[Field]) -> Result<(), RiskError> {
    let missing = required
        .iter()
        .map(|f| f.column_name())
        .filter(|name| !columns.iter().any(|c| c == name))
        .map(str::to_string)
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RiskError::MissingColumns(missing))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
