pub mod artifact;
pub mod error;
pub mod forest;
pub mod linear;

pub use artifact::{load_model, LoadedModel, ModelArtifact};
pub use error::ModelError;
pub use forest::{DecisionTree, ForestRegressor, TreeNode};
pub use linear::LinearRegressor;

/// A pre-trained model mapping one feature row to a travel time in seconds.
pub trait Regressor: Send + Sync {
    /// Width of the input row the model was trained on.
    fn n_features(&self) -> usize;

    fn predict_row(&self, row: &[f64]) -> f64;

    /// Checks the row shape, runs the model and rejects NaN/inf outputs.
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                actual: row.len(),
            });
        }
        let value = self.predict_row(row);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ModelError::NonFinite(value))
        }
    }
}
