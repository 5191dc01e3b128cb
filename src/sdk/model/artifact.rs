use serde::Deserialize;
use std::{fs, path::Path, sync::Arc};

use super::{ForestRegressor, LinearRegressor, ModelError, Regressor};
use crate::sdk::features::{Feature, FeatureLayout};

/// On-disk model description, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    /// Column order the model was trained with. Absent means the default layout.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Linear(LinearRegressor),
    Forest(ForestRegressor),
}

/// A validated model together with the column order it expects.
#[derive(Clone)]
pub struct LoadedModel {
    pub regressor: Arc<dyn Regressor>,
    pub layout: FeatureLayout,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("n_features", &self.regressor.n_features())
            .field("layout", &self.layout)
            .finish()
    }
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_model(self) -> Result<LoadedModel, ModelError> {
        let regressor: Arc<dyn Regressor> = match self.model {
            ModelKind::Linear(model) => {
                model.validate()?;
                Arc::new(model)
            }
            ModelKind::Forest(model) => {
                model.validate()?;
                Arc::new(model)
            }
        };

        if regressor.n_features() != Feature::ALL.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "model expects {} features but trips provide {}",
                regressor.n_features(),
                Feature::ALL.len()
            )));
        }

        let layout = match self.feature_names {
            Some(names) => FeatureLayout::from_names(&names).map_err(ModelError::InvalidArtifact)?,
            None => FeatureLayout::default(),
        };

        Ok(LoadedModel { regressor, layout })
    }
}

/// Reads and validates a JSON model artifact.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<LoadedModel, ModelError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let model = ModelArtifact::from_json(&text)?.into_model()?;
    log::info!(
        "Loaded model from {} ({} features)",
        path.display(),
        model.regressor.n_features()
    );
    Ok(model)
}
