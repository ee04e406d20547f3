use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::record::{Field, PatientRecord, ProbabilityPair};
use crate::predictor::{PredictError, Predictor};

#[derive(Debug, Clone, Deserialize)]
struct LogisticArtifact {
    model_name: String,
    features: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
    #[serde(default)]
    center: Option<Vec<f64>>,
    #[serde(default)]
    scale: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct LogisticModel {
    pub name: String,
    features: Vec<Field>,
    intercept: f64,
    coefficients: Vec<f64>,
    center: Vec<f64>,
    scale: Vec<f64>,
}

impl LogisticModel {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path).map_err(|e| format!("cannot read artifact: {e}"))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let artifact: LogisticArtifact =
            serde_json::from_str(text).map_err(|e| format!("malformed artifact: {e}"))?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: LogisticArtifact) -> Result<Self, String> {
        let n = artifact.features.len();
        if n == 0 {
            return Err("artifact lists no features".to_string());
        }
        let mut features = Vec::with_capacity(n);
        for name in &artifact.features {
            let field =
                Field::from_column(name).ok_or_else(|| format!("unknown feature column {name}"))?;
            if features.contains(&field) {
                return Err(format!("duplicate feature column {name}"));
            }
            features.push(field);
        }
        if artifact.coefficients.len() != n {
            return Err(format!(
                "expected {n} coefficients, found {}",
                artifact.coefficients.len()
            ));
        }
        let center = artifact.center.unwrap_or_else(|| vec![0.0; n]);
        let scale = artifact.scale.unwrap_or_else(|| vec![1.0; n]);
        if center.len() != n || scale.len() != n {
            return Err("center/scale length does not match features".to_string());
        }
        if scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err("scale entries must be finite and non-zero".to_string());
        }
        let params_finite = artifact.intercept.is_finite()
            && artifact.coefficients.iter().all(|c| c.is_finite())
            && center.iter().all(|c| c.is_finite());
        if !params_finite {
            return Err("artifact parameters must be finite".to_string());
        }

        Ok(Self {
            name: artifact.model_name,
            features,
            intercept: artifact.intercept,
            coefficients: artifact.coefficients,
            center,
            scale,
        })
    }

    fn score_row(&self, row: usize, record: &PatientRecord) -> Result<ProbabilityPair, PredictError> {
        let mut z = self.intercept;
        for (idx, &field) in self.features.iter().enumerate() {
            let x = record
                .get(field)
                .ok_or(PredictError::MissingFeature { row, field })?;
            if !x.is_finite() {
                return Err(PredictError::NonFinite { row });
            }
            z += self.coefficients[idx] * (x - self.center[idx]) / self.scale[idx];
        }
        let p = sigmoid(z);
        if !p.is_finite() {
            return Err(PredictError::NonFinite { row });
        }
        Ok(ProbabilityPair::from_positive(p))
    }
}

impl Predictor for LogisticModel {
    fn required_features(&self) -> &[Field] {
        &self.features
    }

    fn predict_proba(
        &self,
        records: &[PatientRecord],
    ) -> Result<Vec<ProbabilityPair>, PredictError> {
        records
            .iter()
            .enumerate()
            .map(|(row, record)| self.score_row(row, record))
            .collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/predictor/logistic.rs"]
mod tests;
