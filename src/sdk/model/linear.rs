use serde::Deserialize;

use super::{ModelError, Regressor};

/// `intercept + sum(coefficients[i] * x[i])`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Result<Self, ModelError> {
        let model = Self {
            intercept,
            coefficients,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "linear model has no coefficients".into(),
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "linear model has non-finite weights".into(),
            ));
        }
        Ok(())
    }
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_plus_intercept() {
        let model = LinearRegressor::new(10.0, vec![1.0, 2.0, 0.5]).unwrap();
        assert_eq!(model.predict(&[1.0, 1.0, 4.0]).unwrap(), 15.0);
    }

    #[test]
    fn wrong_row_width_is_a_shape_mismatch() {
        let model = LinearRegressor::new(0.0, vec![1.0; 9]).unwrap();
        assert!(matches!(
            model.predict(&[1.0; 8]),
            Err(ModelError::ShapeMismatch {
                expected: 9,
                actual: 8
            })
        ));
    }

    #[test]
    fn overflow_is_reported_as_non_finite() {
        let model = LinearRegressor::new(0.0, vec![f64::MAX, f64::MAX]).unwrap();
        assert!(matches!(
            model.predict(&[2.0, 2.0]),
            Err(ModelError::NonFinite(_))
        ));
    }

    #[test]
    fn empty_or_nan_weights_are_rejected() {
        assert!(LinearRegressor::new(0.0, vec![]).is_err());
        assert!(LinearRegressor::new(f64::NAN, vec![1.0]).is_err());
    }
}
