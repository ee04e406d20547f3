use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::input::reader::Delimiter;
use crate::model::record::{Field, PatientRecord};
use crate::model::tiers::RiskTier;
use crate::pipeline::stage3_batch::TierFilter;

#[derive(Debug, Parser)]
#[command(
    name = "kira-ckdrisk",
    version,
    about = "Chronic kidney disease risk screening from patient vitals"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Default log level when RUST_LOG is not set."
    )]
    pub log_level: String,

    #[arg(long, global = true, help = "Emit logs as JSON lines on stderr.")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Assess one patient entered through flags.")]
    Single(SingleArgs),
    #[command(about = "Assess every row of a TSV/CSV table and write exports.")]
    Batch(BatchArgs),
    #[command(about = "Write an example batch table.")]
    Template(TemplateArgs),
}

#[derive(Debug, Args)]
pub struct SingleArgs {
    #[arg(long, env = "KIRA_CKDRISK_MODEL", help = "Model artifact (JSON).")]
    pub model: PathBuf,

    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true, help = "Age in years.")]
    pub age: f64,

    #[arg(long, value_enum, default_value_t = Sex::Male)]
    pub gender: Sex,

    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub bmi: f64,

    #[arg(
        long,
        default_value_t = 120.0,
        allow_negative_numbers = true,
        help = "Systolic blood pressure, mmHg."
    )]
    pub systolic_bp: f64,

    #[arg(
        long,
        default_value_t = 80.0,
        allow_negative_numbers = true,
        help = "Diastolic blood pressure, mmHg."
    )]
    pub diastolic_bp: f64,

    #[arg(long, default_value_t = 5.5, allow_negative_numbers = true, help = "HbA1c, %.")]
    pub hba1c: f64,

    #[arg(
        long,
        default_value_t = 1.0,
        allow_negative_numbers = true,
        help = "Serum creatinine, mg/dL."
    )]
    pub serum_creatinine: f64,

    #[arg(
        long,
        default_value_t = 90.0,
        allow_negative_numbers = true,
        help = "Glomerular filtration rate, mL/min/1.73m²."
    )]
    pub gfr: f64,

    #[arg(long, default_value_t = 13.0, allow_negative_numbers = true, help = "Hemoglobin, g/dL.")]
    pub hemoglobin: f64,

    #[arg(
        long,
        default_value_t = 200.0,
        allow_negative_numbers = true,
        help = "Total cholesterol, mg/dL."
    )]
    pub cholesterol: f64,

    #[arg(long, help = "Proceed even when values fall outside the plausible ranges.")]
    pub allow_out_of_range: bool,

    #[arg(long, help = "Print the assessment as JSON instead of text.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    #[arg(long, env = "KIRA_CKDRISK_MODEL", help = "Model artifact (JSON).")]
    pub model: PathBuf,

    #[arg(long, help = "Patient table (.tsv, .csv, optionally .gz).")]
    pub input: PathBuf,

    #[arg(long, help = "Output directory for exports.")]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,

    #[arg(
        long,
        value_enum,
        default_value_t = FilterArg::All,
        help = "Additionally export only the rows of one risk level."
    )]
    pub filter: FilterArg,

    #[arg(long, help = "Proceed even when values fall outside the plausible ranges.")]
    pub allow_out_of_range: bool,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[arg(long, help = "Destination; `.csv` selects comma separation, `.gz` compresses.")]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    High,
    Moderate,
    Low,
    Minimal,
}

#[derive(Debug, Clone)]
pub struct SingleConfig {
    pub model_path: PathBuf,
    pub record: PatientRecord,
    pub allow_out_of_range: bool,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub model_path: PathBuf,
    pub input_path: PathBuf,
    pub out_dir: PathBuf,
    pub format: Delimiter,
    pub filter: TierFilter,
    pub allow_out_of_range: bool,
}

#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub out_path: PathBuf,
}

#[derive(Debug, Clone)]
pub enum RunConfig {
    Single(SingleConfig),
    Batch(BatchConfig),
    Template(TemplateConfig),
}

impl Sex {
    // 1 = male, 0 = female
    pub fn code(self) -> f64 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 0.0,
        }
    }
}

impl From<OutputFormat> for Delimiter {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Tsv => Delimiter::Tab,
            OutputFormat::Csv => Delimiter::Comma,
        }
    }
}

impl From<FilterArg> for TierFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => TierFilter::All,
            FilterArg::High => TierFilter::Tier(RiskTier::HighRisk),
            FilterArg::Moderate => TierFilter::Tier(RiskTier::ModerateRisk),
            FilterArg::Low => TierFilter::Tier(RiskTier::LowRisk),
            FilterArg::Minimal => TierFilter::Tier(RiskTier::MinimalRisk),
        }
    }
}

impl SingleArgs {
    pub fn record(&self) -> PatientRecord {
        PatientRecord::new()
            .with(Field::Age, self.age)
            .with(Field::Gender, self.gender.code())
            .with(Field::Bmi, self.bmi)
            .with(Field::SystolicBp, self.systolic_bp)
            .with(Field::DiastolicBp, self.diastolic_bp)
            .with(Field::HbA1c, self.hba1c)
            .with(Field::SerumCreatinine, self.serum_creatinine)
            .with(Field::Gfr, self.gfr)
            .with(Field::HemoglobinLevels, self.hemoglobin)
            .with(Field::CholesterolTotal, self.cholesterol)
    }
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        match self.command {
            Command::Single(args) => RunConfig::Single(SingleConfig {
                record: args.record(),
                model_path: args.model,
                allow_out_of_range: args.allow_out_of_range,
                json: args.json,
            }),
            Command::Batch(args) => RunConfig::Batch(BatchConfig {
                model_path: args.model,
                input_path: args.input,
                out_dir: args.out,
                format: args.format.into(),
                filter: args.filter.into(),
                allow_out_of_range: args.allow_out_of_range,
            }),
            Command::Template(args) => RunConfig::Template(TemplateConfig { out_path: args.out }),
        }
    }
}
