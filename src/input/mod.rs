use std::path::Path;

use thiserror::Error;

pub mod reader;
pub mod template;

use reader::{Delimiter, open_maybe_gz, split_record};

use crate::model::record::{Field, PatientRecord};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: String,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct PatientTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    // 1-based, for error messages
    pub line_numbers: Vec<usize>,
}

impl PatientTable {
    pub fn schema_fields(&self) -> Vec<Field> {
        self.columns
            .iter()
            .filter_map(|c| Field::from_column(c))
            .collect()
    }
}

pub fn read_table(path: &Path) -> Result<PatientTable, InputError> {
    let delim = Delimiter::for_path(path);
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut line_no = 0usize;

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut line_numbers = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let mut line = buf.trim_end_matches(['\n', '\r']);
        if line_no == 1 {
            line = line.trim_start_matches('\u{feff}');
        }
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = split_record(line, delim);
        match &columns {
            None => {
                check_header(&fields)?;
                columns = Some(fields);
            }
            Some(header) => {
                if fields.len() > header.len() {
                    return Err(InputError::InvalidInput(format!(
                        "line {} has {} fields, header has {}",
                        line_no,
                        fields.len(),
                        header.len()
                    )));
                }
                fields.resize(header.len(), String::new());
                rows.push(fields);
                line_numbers.push(line_no);
            }
        }
    }

    let columns = columns
        .ok_or_else(|| InputError::InvalidInput(format!("{} is empty", path.display())))?;
    tracing::info!(
        path = %path.display(),
        rows = rows.len(),
        columns = columns.len(),
        "patient table loaded"
    );
    Ok(PatientTable {
        columns,
        rows,
        line_numbers,
    })
}

fn check_header(header: &[String]) -> Result<(), InputError> {
    for (idx, name) in header.iter().enumerate() {
        if name.is_empty() {
            return Err(InputError::InvalidInput(format!(
                "header column {} is empty",
                idx + 1
            )));
        }
        if header[..idx].contains(name) {
            return Err(InputError::InvalidInput(format!(
                "duplicate header column {name}"
            )));
        }
    }
    Ok(())
}

pub fn records_from_table(table: &PatientTable) -> Result<Vec<PatientRecord>, InputError> {
    let schema_cols = table
        .columns
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| Field::from_column(name).map(|f| (idx, f)))
        .collect::<Vec<_>>();

    let mut out = Vec::with_capacity(table.rows.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let line = table.line_numbers.get(row_idx).copied().unwrap_or(0);
        let mut record = PatientRecord::new();
        for &(col, field) in &schema_cols {
            let raw = row.get(col).map(String::as_str).unwrap_or("");
            let value = parse_value(raw).map_err(|message| InputError::Parse {
                line,
                column: field.column_name().to_string(),
                message,
            })?;
            record.set(field, value);
        }
        out.push(record);
    }
    Ok(out)
}

fn parse_value(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty value".to_string());
    }
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("not a number: {raw:?}"))?;
    if !value.is_finite() {
        return Err(format!("not a finite number: {raw:?}"));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
