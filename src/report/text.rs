use crate::report::{
    BucketStat, DISCLAIMER, SingleReport, SummaryData, format_percent, format_probability,
};

pub fn render_batch_report(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Chronic Kidney Disease Risk Screening Report\n");
    out.push_str("============================================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!("Tool: {} {}\n", data.tool, data.version));
    out.push_str(&format!("Model: {}\n", data.model));
    out.push_str(&format!("Input: {}\n", data.input));
    out.push_str(&format!("Patients: {}\n\n", data.n_patients));

    out.push_str("2. Risk summary\n");
    for bucket in &data.summary {
        out.push_str(&format!(
            "{:<10} {:<12} {:>6} ({})\n",
            bucket.name,
            bucket.range,
            bucket.count,
            format_percent(bucket.percent)
        ));
    }
    out.push_str(&format!("{}\n\n", overall_statement(&data.summary)));

    out.push_str("3. Risk level distribution\n");
    for tier in &data.distribution {
        out.push_str(&format!(
            "{:<14} {:>6} ({})\n",
            tier.tier,
            tier.count,
            format_percent(tier.percent)
        ));
    }
    out.push('\n');

    out.push_str("4. Input validation\n");
    if data.validation.is_empty() {
        out.push_str("All values within expected ranges.\n");
    } else {
        for message in &data.validation {
            out.push_str(&format!("- {}\n", message));
        }
        if data.override_used {
            out.push_str("Proceeded with out-of-range values by explicit override.\n");
        }
    }
    out.push('\n');

    out.push_str("5. Exports\n");
    out.push_str(&format!(
        "Filter: {} ({} patients)\n",
        data.filter, data.n_filtered
    ));
    for name in &data.exports {
        out.push_str(&format!("- {}\n", name));
    }
    out.push('\n');

    out.push_str("Disclaimer: ");
    out.push_str(DISCLAIMER);
    out.push('\n');

    out
}

pub fn render_single_report(report: &SingleReport) -> String {
    let a = &report.assessment;
    let mut out = String::new();

    out.push_str("Chronic Kidney Disease Risk Assessment\n");
    out.push_str("======================================\n\n");
    out.push_str(&format!(
        "Risk level: {} [{}]\n",
        a.tier.label(),
        a.severity.name()
    ));
    out.push_str(&format!(
        "Probability at risk: {}\n",
        format_percent(a.probability_positive * 100.0)
    ));
    out.push_str(&format!(
        "Probability not at risk: {}\n",
        format_percent(a.probability_negative * 100.0)
    ));
    out.push_str(&format!("Predicted class: {}\n", report.prediction));
    out.push_str(&format!("Recommendation: {}\n\n", a.recommendation));

    out.push_str("Input summary\n");
    for input in &report.inputs {
        let value = if input.column == "Gender" {
            gender_label(input.value).to_string()
        } else {
            format!("{}", input.value)
        };
        out.push_str(&format!("  {:<18} {}\n", input.column, value));
    }

    if !report.validation.is_empty() {
        out.push_str("\nValidation warnings\n");
        for message in &report.validation {
            out.push_str(&format!("- {}\n", message));
        }
    }

    out.push_str(&format!(
        "\nModel: {} (p={})\n",
        report.model,
        format_probability(a.probability_positive)
    ));
    out.push_str("Disclaimer: ");
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

fn gender_label(value: f64) -> &'static str {
    if value == 1.0 {
        "Male"
    } else if value == 0.0 {
        "Female"
    } else {
        "Unknown"
    }
}

fn overall_statement(summary: &[BucketStat]) -> &'static str {
    let count = |name: &str| {
        summary
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.count)
            .unwrap_or(0)
    };
    if count("high") > 0 {
        "High-risk patients present; prioritize specialist referral."
    } else if count("moderate") > 0 {
        "No high-risk patients; schedule follow-up for moderate-risk patients."
    } else {
        "No patients at or above the moderate-risk threshold."
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
