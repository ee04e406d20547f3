use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::error::RiskError;
use crate::predictor::LogisticModel;

// The first successful load wins and is shared read-only.
pub static MODEL_STORE: ModelStore = ModelStore::new();

#[derive(Debug, Default)]
pub struct ModelStore {
    slot: OnceLock<(PathBuf, Arc<LogisticModel>)>,
}

impl ModelStore {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    // Failed loads are not cached; a later call retries the artifact.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<LogisticModel>, RiskError> {
        if let Some((loaded, model)) = self.slot.get() {
            return checked(loaded, model, path);
        }
        let model = LogisticModel::load(path).map_err(|reason| {
            tracing::error!(path = %path.display(), %reason, "model artifact failed to load");
            RiskError::ModelUnavailable {
                path: path.to_path_buf(),
                reason,
            }
        })?;
        tracing::info!(
            path = %path.display(),
            model = %model.name,
            "model artifact loaded"
        );
        let (loaded, model) = self
            .slot
            .get_or_init(|| (path.to_path_buf(), Arc::new(model)));
        checked(loaded, model, path)
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}

fn checked(
    loaded: &Path,
    model: &Arc<LogisticModel>,
    requested: &Path,
) -> Result<Arc<LogisticModel>, RiskError> {
    if loaded != requested {
        return Err(RiskError::ModelMismatch {
            loaded: loaded.to_path_buf(),
            requested: requested.to_path_buf(),
        });
    }
    Ok(Arc::clone(model))
}

#[cfg(test)]
#[path = "../../tests/src_inline/predictor/store.rs"]
mod tests;
