use super::*;
use crate::input::records_from_table;
use crate::input::reader::split_record;
use crate::model::record::Field;
use crate::model::tiers::RiskTier;
use crate::pipeline::stage1_validate::validate;
use crate::pipeline::stage3_batch::evaluate_batch;
use crate::predictor::{FnPredictor, PredictError};
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_ckdrisk_report_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn table() -> PatientTable {
    PatientTable {
        columns: vec!["Patient".to_string(), "Age".to_string(), "GFR".to_string()],
        rows: vec![
            vec!["Doe, Jane".to_string(), "70".to_string(), "25".to_string()],
            vec!["p2".to_string(), "130".to_string(), "55".to_string()],
            vec!["p3".to_string(), "33".to_string(), "110".to_string()],
        ],
        line_numbers: vec![2, 3, 4],
    }
}

fn evaluate(table: &PatientTable) -> BatchResult {
    let records = records_from_table(table).unwrap();
    let predictor = FnPredictor(
        |r: &[PatientRecord]| -> Result<Vec<ProbabilityPair>, PredictError> {
            assert_eq!(r.len(), 3);
            Ok(vec![
                ProbabilityPair::from_positive(0.9),
                ProbabilityPair::from_positive(0.65),
                ProbabilityPair::from_positive(0.2),
            ])
        },
    );
    evaluate_batch(&records, &predictor).unwrap()
}

fn report_input<'a>(
    table: &'a PatientTable,
    result: &'a BatchResult,
    validation: &'a ValidationReport,
    filter: TierFilter,
    format: Delimiter,
) -> BatchReportInput<'a> {
    BatchReportInput {
        table,
        result,
        validation,
        override_used: true,
        filter,
        format,
        tool_name: "kira-ckdrisk".to_string(),
        tool_version: "0.1.0".to_string(),
        model_name: "test_model".to_string(),
        input_path: "patients.csv".to_string(),
    }
}

#[test]
fn test_results_table_appends_prediction_columns() {
    let table = table();
    let result = evaluate(&table);
    let validation = ValidationReport::default();
    let out = make_temp_dir();
    let input = report_input(&table, &result, &validation, TierFilter::All, Delimiter::Tab);

    let written = write_batch_reports(&input, &out).unwrap();
    let names = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["results.tsv", "summary.json", "report.txt"]);

    let text = fs::read_to_string(out.join("results.tsv")).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(
        lines[0],
        "Patient\tAge\tGFR\tPrediction\tRisk_Probability\tRisk_Level\tRecommendation"
    );
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[1],
        "Doe, Jane\t70\t25\t1\t0.900000\tHIGH_RISK\tseek specialist consultation immediately"
    );
    assert!(lines[3].ends_with("\t0\t0.200000\tMINIMAL_RISK\tmaintain healthy lifestyle"));
}

#[test]
fn test_filtered_export_and_csv_quoting() {
    let table = table();
    let result = evaluate(&table);
    let validation = ValidationReport::default();
    let out = make_temp_dir();
    let input = report_input(
        &table,
        &result,
        &validation,
        TierFilter::Tier(RiskTier::HighRisk),
        Delimiter::Comma,
    );

    write_batch_reports(&input, &out).unwrap();
    let filtered = fs::read_to_string(out.join("results_high.csv")).unwrap();
    let lines = filtered.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    let cells = split_record(lines[1], Delimiter::Comma);
    assert_eq!(cells[0], "Doe, Jane");
    assert_eq!(cells[5], "HIGH_RISK");

    let all = fs::read_to_string(out.join("results.csv")).unwrap();
    assert_eq!(all.lines().count(), 4);
}

#[test]
fn test_summary_json_contents() {
    let table = table();
    let result = evaluate(&table);
    let records = records_from_table(&table).unwrap();
    let validation = validate(&records);
    let out = make_temp_dir();
    let input = report_input(
        &table,
        &result,
        &validation,
        TierFilter::Tier(RiskTier::ModerateRisk),
        Delimiter::Tab,
    );
    write_batch_reports(&input, &out).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["n_patients"], 3);
    assert_eq!(json["summary"][0]["name"], "high");
    assert_eq!(json["summary"][0]["count"], 1);
    assert_eq!(json["summary"][0]["percent"], 33.3);
    assert_eq!(json["summary"][2]["range"], "<0.6");
    assert_eq!(json["distribution"][3]["tier"], "MINIMAL_RISK");
    assert_eq!(json["distribution"][2]["count"], 0);
    assert_eq!(json["filter"], "moderate");
    assert_eq!(json["n_filtered"], 1);
    assert_eq!(json["override_used"], true);
    assert_eq!(
        json["validation"][0],
        "Age must be between 0 and 120 years (found 1 invalid row)"
    );

    let report = fs::read_to_string(out.join("report.txt")).unwrap();
    assert!(report.contains("- results_moderate.tsv"));
    assert!(report.contains("explicit override"));
}

#[test]
fn test_single_report_lists_present_inputs() {
    let record = PatientRecord::new()
        .with(Field::Age, 50.0)
        .with(Field::Gender, 1.0);
    let assessment = crate::pipeline::stage2_classify::classify(ProbabilityPair::new(0.5, 0.5))
        .unwrap();
    let report = build_single_report(
        &record,
        assessment,
        &ValidationReport::default(),
        "kira-ckdrisk",
        "0.1.0",
        "m",
    );
    assert_eq!(report.prediction, 0);
    assert_eq!(report.inputs.len(), 2);
    assert_eq!(report.inputs[1].column, "Gender");
    assert_eq!(report.assessment.tier, RiskTier::LowRisk);
}

#[test]
fn test_existing_result_columns_are_replaced() {
    let table = PatientTable {
        columns: vec![
            "Patient".to_string(),
            "Prediction".to_string(),
            "Age".to_string(),
            "Risk_Level".to_string(),
        ],
        rows: vec![
            vec!["p1".to_string(), "0".to_string(), "70".to_string(), "LOW_RISK".to_string()],
            vec!["p2".to_string(), "1".to_string(), "40".to_string(), "HIGH_RISK".to_string()],
            vec!["p3".to_string(), "0".to_string(), "33".to_string(), "MINIMAL_RISK".to_string()],
        ],
        line_numbers: vec![2, 3, 4],
    };
    let result = evaluate(&table);
    let validation = ValidationReport::default();
    let out = make_temp_dir();
    let input = report_input(&table, &result, &validation, TierFilter::All, Delimiter::Tab);
    write_batch_reports(&input, &out).unwrap();

    let text = fs::read_to_string(out.join("results.tsv")).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(
        lines[0],
        "Patient\tAge\tPrediction\tRisk_Probability\tRisk_Level\tRecommendation"
    );
    assert_eq!(
        lines[1],
        "p1\t70\t1\t0.900000\tHIGH_RISK\tseek specialist consultation immediately"
    );
}
