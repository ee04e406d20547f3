use crate::report::{SingleReport, SummaryData};

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

pub fn render_single_json(report: &SingleReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
