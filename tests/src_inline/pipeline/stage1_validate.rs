use super::*;

fn complete(age: f64) -> PatientRecord {
    PatientRecord::new()
        .with(Field::Age, age)
        .with(Field::Gender, 1.0)
        .with(Field::Bmi, 25.0)
        .with(Field::SystolicBp, 120.0)
        .with(Field::DiastolicBp, 80.0)
        .with(Field::HbA1c, 5.5)
        .with(Field::SerumCreatinine, 1.0)
        .with(Field::Gfr, 90.0)
        .with(Field::HemoglobinLevels, 13.0)
        .with(Field::CholesterolTotal, 200.0)
}

fn age_violations(report: &ValidationReport) -> Vec<&RangeViolation> {
    report
        .violations
        .iter()
        .filter(|v| v.field == Field::Age)
        .collect()
}

#[test]
fn test_empty_records_produce_empty_report() {
    let report = validate(&[]);
    assert!(report.is_empty());
    assert!(!report.requires_override());
}

#[test]
fn test_age_out_of_range_below_and_above() {
    for age in [-1.0, 121.0] {
        let report = validate(&[complete(age)]);
        let hits = age_violations(&report);
        assert_eq!(hits.len(), 1, "age={age}");
        assert!(hits[0].count >= 1);
        assert_eq!(report.violations.len(), 1);
    }
}

#[test]
fn test_age_bounds_are_inclusive() {
    let report = validate(&[complete(0.0), complete(120.0)]);
    assert!(report.is_empty());
}

#[test]
fn test_one_message_per_field_with_row_count() {
    let records = vec![complete(-5.0), complete(50.0), complete(130.0)];
    let report = validate(&records);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].count, 2);
    assert_eq!(
        report.messages(),
        vec!["Age must be between 0 and 120 years (found 2 invalid rows)".to_string()]
    );
}

#[test]
fn test_violations_follow_range_table_order() {
    let mut record = complete(200.0);
    record.set(Field::SerumCreatinine, 0.1);
    record.set(Field::Bmi, 60.0);
    let report = validate(&[record]);
    let fields = report.violations.iter().map(|v| v.field).collect::<Vec<_>>();
    assert_eq!(fields, vec![Field::Age, Field::Bmi, Field::SerumCreatinine]);
    assert_eq!(
        report.violations[2].message(),
        "SerumCreatinine must be between 0.3 and 10 mg/dL (found 1 invalid row)"
    );
}

#[test]
fn test_gender_is_not_range_checked() {
    let mut record = complete(40.0);
    record.set(Field::Gender, 7.0);
    assert!(validate(&[record]).is_empty());
}

#[test]
fn test_absent_fields_are_skipped() {
    let record = PatientRecord::new().with(Field::Gfr, 2.0);
    let report = validate(&[record]);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].field, Field::Gfr);
}

#[test]
fn test_gate_requires_override() {
    let report = validate(&[complete(-1.0)]);
    match gate(&report, false) {
        Err(RiskError::OverrideRequired { violations }) => assert_eq!(violations, 1),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(gate(&report, true).is_ok());
    assert!(gate(&ValidationReport::default(), false).is_ok());
}

#[test]
fn test_require_columns_lists_missing() {
    let columns = vec!["Age".to_string(), "Gender".to_string(), "Notes".to_string()];
    let required = [Field::Age, Field::Bmi, Field::Gender, Field::Gfr];
    match require_columns(&columns, &required) {
        Err(RiskError::MissingColumns(missing)) => {
            assert_eq!(missing, vec!["BMI".to_string(), "GFR".to_string()]);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(require_columns(&columns, &[Field::Age]).is_ok());
}

#[test]
fn test_require_columns_is_case_sensitive() {
    let columns = vec!["age".to_string()];
    assert!(matches!(
        require_columns(&columns, &[Field::Age]),
        Err(RiskError::MissingColumns(_))
    ));
}
