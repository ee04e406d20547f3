use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;
use crate::predictor::PredictError;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("invalid probability pair ({negative}, {positive})")]
    InvalidProbability { negative: f64, positive: f64 },

    #[error("batch contains no patient records")]
    EmptyBatch,

    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("prediction failed: {0}")]
    PredictionFailed(#[source] PredictError),

    #[error("model unavailable ({}): {reason}", .path.display())]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error(
        "model already loaded from {}, refusing {}",
        .loaded.display(),
        .requested.display()
    )]
    ModelMismatch { loaded: PathBuf, requested: PathBuf },

    #[error(
        "{violations} range violation(s) found; pass --allow-out-of-range to proceed anyway"
    )]
    OverrideRequired { violations: usize },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
