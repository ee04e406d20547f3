use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::input::PatientTable;
use crate::input::reader::{Delimiter, join_record};
use crate::model::assessment::RiskAssessment;
use crate::model::record::{PatientRecord, ProbabilityPair};
use crate::model::thresholds::SummaryCuts;
use crate::pipeline::stage1_validate::ValidationReport;
use crate::pipeline::stage3_batch::{BatchResult, BatchRow, TierFilter, filter_by_tier};
use crate::report::json::render_summary_json;
use crate::report::text::render_batch_report;
use crate::report::{
    BucketStat, InputValue, SingleReport, SummaryData, TierStat, format_probability, percent_of,
    round1,
};

pub const RESULT_COLUMNS: [&str; 4] = [
    "Prediction",
    "Risk_Probability",
    "Risk_Level",
    "Recommendation",
];

#[derive(Debug, Clone)]
pub struct BatchReportInput<'a> {
    pub table: &'a PatientTable,
    pub result: &'a BatchResult,
    pub validation: &'a ValidationReport,
    pub override_used: bool,
    pub filter: TierFilter,
    pub format: Delimiter,

    pub tool_name: String,
    pub tool_version: String,
    pub model_name: String,
    pub input_path: String,
}

pub fn write_batch_reports(
    input: &BatchReportInput<'_>,
    out_dir: &Path,
) -> std::io::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let ext = input.format.extension();
    let mut written = Vec::new();

    let results_path = out_dir.join(format!("results.{ext}"));
    let all = filter_by_tier(input.result, TierFilter::All);
    write_results_table(input, &all, &results_path)?;
    written.push(results_path);

    let filtered = filter_by_tier(input.result, input.filter);
    if let TierFilter::Tier(tier) = input.filter {
        let filtered_path = out_dir.join(format!("results_{}.{ext}", tier.slug()));
        write_results_table(input, &filtered, &filtered_path)?;
        written.push(filtered_path);
    }

    let summary_path = out_dir.join("summary.json");
    let report_path = out_dir.join("report.txt");
    let mut exports = written
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect::<Vec<_>>();
    exports.push("summary.json".to_string());
    exports.push("report.txt".to_string());

    let summary = build_summary(input, filtered.len(), exports);
    write_text(&summary_path, &render_summary_json(&summary)?)?;
    written.push(summary_path);

    write_text(&report_path, &render_batch_report(&summary))?;
    written.push(report_path);

    tracing::info!(
        out_dir = %out_dir.display(),
        files = written.len(),
        filtered = filtered.len(),
        "batch reports written"
    );
    Ok(written)
}

fn write_results_table(
    input: &BatchReportInput<'_>,
    rows: &[&BatchRow],
    path: &Path,
) -> std::io::Result<()> {
    let carried = carried_columns(&input.table.columns);
    let mut w = BufWriter::new(File::create(path)?);
    let mut header = carried
        .iter()
        .map(|&col| input.table.columns[col].clone())
        .collect::<Vec<_>>();
    header.extend(RESULT_COLUMNS.iter().map(|c| c.to_string()));
    writeln!(w, "{}", join_record(&header, input.format))?;

    for row in rows {
        let source = input.table.rows.get(row.index);
        let mut cells = carried
            .iter()
            .map(|&col| source.and_then(|r| r.get(col)).cloned().unwrap_or_default())
            .collect::<Vec<_>>();
        cells.extend(result_cells(row.prediction, &row.assessment));
        writeln!(w, "{}", join_record(&cells, input.format))?;
    }
    w.flush()
}

// Source columns named like a result column are replaced, not duplicated.
fn carried_columns(columns: &[String]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, name)| !RESULT_COLUMNS.contains(&name.as_str()))
        .map(|(col, _)| col)
        .collect()
}

pub fn result_cells(prediction: u8, assessment: &RiskAssessment) -> [String; 4] {
    [
        prediction.to_string(),
        format_probability(assessment.probability_positive),
        assessment.tier.label().to_string(),
        assessment.recommendation.to_string(),
    ]
}

fn build_summary(input: &BatchReportInput<'_>, n_filtered: usize, exports: Vec<String>) -> SummaryData {
    let s = &input.result.summary;
    let cuts = SummaryCuts::default_v1();
    let summary = vec![
        BucketStat {
            name: "high",
            range: format!(">={}", cuts.high),
            count: s.high,
            percent: round1(s.high_percent()),
        },
        BucketStat {
            name: "moderate",
            range: format!("{}-{}", cuts.moderate, cuts.high),
            count: s.moderate,
            percent: round1(s.moderate_percent()),
        },
        BucketStat {
            name: "low",
            range: format!("<{}", cuts.moderate),
            count: s.low,
            percent: round1(s.low_percent()),
        },
    ];
    let distribution = input
        .result
        .distribution
        .iter()
        .map(|d| TierStat {
            tier: d.tier.label(),
            count: d.count,
            percent: round1(percent_of(d.count, s.total)),
        })
        .collect();

    SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        model: input.model_name.clone(),
        input: input.input_path.clone(),
        n_patients: s.total,
        summary,
        distribution,
        validation: input.validation.messages(),
        override_used: input.override_used && input.validation.requires_override(),
        filter: filter_name(input.filter).to_string(),
        n_filtered,
        exports,
    }
}

pub fn filter_name(filter: TierFilter) -> &'static str {
    match filter {
        TierFilter::All => "all",
        TierFilter::Tier(tier) => tier.slug(),
    }
}

pub fn build_single_report(
    record: &PatientRecord,
    assessment: RiskAssessment,
    validation: &ValidationReport,
    tool_name: &str,
    tool_version: &str,
    model_name: &str,
) -> SingleReport {
    let inputs = record
        .present_fields()
        .filter_map(|field| {
            record.get(field).map(|value| InputValue {
                column: field.column_name(),
                value,
            })
        })
        .collect();
    let prediction =
        ProbabilityPair::new(assessment.probability_negative, assessment.probability_positive)
            .predicted_class();
    SingleReport {
        tool: tool_name.to_string(),
        version: tool_version.to_string(),
        model: model_name.to_string(),
        prediction,
        assessment,
        inputs,
        validation: validation.messages(),
    }
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
