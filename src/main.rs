mod cli;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod predictor;
mod report;

use clap::Parser;

use crate::cli::{BatchConfig, Cli, RunConfig, SingleConfig, TemplateConfig};
use crate::error::RunError;
use crate::input::template::write_template;
use crate::input::{read_table, records_from_table};
use crate::pipeline::stage1_validate::{ValidationReport, gate, require_columns, validate};
use crate::pipeline::stage3_batch::evaluate_batch;
use crate::pipeline::stage4_single::evaluate_one;
use crate::pipeline::stage5_report::{BatchReportInput, build_single_report, write_batch_reports};
use crate::predictor::{MODEL_STORE, ModelStore, Predictor};
use crate::report::json::render_single_json;
use crate::report::text::render_single_report;

const TOOL_NAME: &str = "kira-ckdrisk";

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json, &cli.log_level);
    if let Err(err) = run(cli.into_config(), &MODEL_STORE) {
        tracing::error!(error = %err, "run failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: RunConfig, store: &ModelStore) -> Result<(), RunError> {
    match config {
        RunConfig::Single(config) => {
            let output = run_single(&config, store)?;
            print!("{output}");
        }
        RunConfig::Batch(config) => {
            for path in run_batch(&config, store)? {
                println!("{}", path.display());
            }
        }
        RunConfig::Template(config) => run_template(&config)?,
    }
    Ok(())
}

fn run_single(config: &SingleConfig, store: &ModelStore) -> Result<String, RunError> {
    let model = store.get_or_load(&config.model_path)?;

    let validation = validate(std::slice::from_ref(&config.record));
    log_validation(&validation);
    gate(&validation, config.allow_out_of_range)?;

    let assessment = evaluate_one(&config.record, model.as_ref())?;
    let report = build_single_report(
        &config.record,
        assessment,
        &validation,
        TOOL_NAME,
        env!("CARGO_PKG_VERSION"),
        &model.name,
    );

    if config.json {
        let mut out = render_single_json(&report)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(render_single_report(&report))
    }
}

fn run_batch(
    config: &BatchConfig,
    store: &ModelStore,
) -> Result<Vec<std::path::PathBuf>, RunError> {
    let model = store.get_or_load(&config.model_path)?;

    let table = read_table(&config.input_path)?;
    tracing::debug!(fields = ?table.schema_fields(), "schema columns detected");
    require_columns(&table.columns, model.required_features())?;
    let records = records_from_table(&table)?;

    let validation = validate(&records);
    log_validation(&validation);
    gate(&validation, config.allow_out_of_range)?;

    let result = evaluate_batch(&records, model.as_ref())?;

    let input = BatchReportInput {
        table: &table,
        result: &result,
        validation: &validation,
        override_used: config.allow_out_of_range,
        filter: config.filter,
        format: config.format,
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        model_name: model.name.clone(),
        input_path: config.input_path.display().to_string(),
    };
    Ok(write_batch_reports(&input, &config.out_dir)?)
}

fn run_template(config: &TemplateConfig) -> Result<(), RunError> {
    write_template(&config.out_path)?;
    println!("{}", config.out_path.display());
    Ok(())
}

fn log_validation(report: &ValidationReport) {
    for message in report.messages() {
        tracing::warn!("{message}");
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
