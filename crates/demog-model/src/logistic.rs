use serde::{Deserialize, Serialize};
use sprs::CsMat;
use tracing::debug;

use crate::{Gender, ModelError, Prediction};

/// Logistic regression for binary classification over sparse count features.
///
/// Trained by batch gradient descent on binary cross-entropy. The gradient
/// pass iterates the stored CSR rows directly, so each iteration costs
/// O(non-zero entries) rather than O(rows × features).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Per-feature weights; positive weights pull toward Female.
    coefficients: Option<Vec<f64>>,
    /// Intercept (bias) term
    intercept: f64,
    /// Learning rate for gradient descent
    learning_rate: f64,
    /// Maximum number of iterations
    max_iter: usize,
    /// Convergence tolerance
    tol: f64,
}

impl LogisticRegression {
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
            learning_rate: 0.1,
            max_iter: 1000,
            tol: 1e-4,
        }
    }

    /// Sets the learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Sigmoid activation function: σ(z) = 1 / (1 + e^(-z))
    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    fn decision(intercept: f64, coefficients: &[f64], row: &sprs::CsVecView<'_, f64>) -> f64 {
        let mut z = intercept;
        for (col, &value) in row.iter() {
            z += coefficients[col] * value;
        }
        z
    }

    /// Fit the model to a document×term count matrix and its labels.
    pub fn fit(&mut self, x: &CsMat<f64>, y: &[Gender]) -> Result<(), ModelError> {
        let (n_samples, n_features) = (x.rows(), x.cols());
        if n_samples != y.len() {
            return Err(ModelError::LengthMismatch {
                rows: n_samples,
                labels: y.len(),
            });
        }
        if n_samples == 0 {
            return Err(ModelError::Empty);
        }

        let targets: Vec<f64> = y.iter().map(|label| label.index() as f64).collect();
        let mut coefficients = vec![0.0; n_features];
        let mut intercept = 0.0;

        for iteration in 0..self.max_iter {
            let mut coef_grad = vec![0.0; n_features];
            let mut intercept_grad = 0.0;

            for (row, &target) in x.outer_iterator().zip(targets.iter()) {
                let error = Self::sigmoid(Self::decision(intercept, &coefficients, &row)) - target;
                intercept_grad += error;
                for (col, &value) in row.iter() {
                    coef_grad[col] += error * value;
                }
            }

            let n = n_samples as f64;
            intercept_grad /= n;
            for grad in &mut coef_grad {
                *grad /= n;
            }

            intercept -= self.learning_rate * intercept_grad;
            for (weight, grad) in coefficients.iter_mut().zip(&coef_grad) {
                *weight -= self.learning_rate * grad;
            }

            if intercept_grad.abs() < self.tol && coef_grad.iter().all(|grad| grad.abs() < self.tol)
            {
                debug!(iteration, "Gradient descent converged");
                break;
            }
        }

        self.coefficients = Some(coefficients);
        self.intercept = intercept;
        Ok(())
    }

    /// Class-probability estimates for each row of `x`.
    ///
    /// `x` must be built against the same vocabulary the model was trained
    /// on; a column-count mismatch is a caller contract violation and is
    /// reported, not repaired.
    pub fn predict_proba(&self, x: &CsMat<f64>) -> Result<Vec<Prediction>, ModelError> {
        let coefficients = self.coefficients.as_ref().ok_or(ModelError::NotFitted)?;
        if x.cols() != coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: coefficients.len(),
                found: x.cols(),
            });
        }
        Ok(x.outer_iterator()
            .map(|row| {
                Prediction::from_female_probability(Self::sigmoid(Self::decision(
                    self.intercept,
                    coefficients,
                    &row,
                )))
            })
            .collect())
    }

    /// Predicted labels at the 0.5 cutoff.
    pub fn predict(&self, x: &CsMat<f64>) -> Result<Vec<Gender>, ModelError> {
        Ok(self
            .predict_proba(x)?
            .iter()
            .map(Prediction::predicted)
            .collect())
    }

    /// Fraction of correctly classified rows.
    pub fn score(&self, x: &CsMat<f64>, y: &[Gender]) -> Result<f64, ModelError> {
        if x.rows() != y.len() {
            return Err(ModelError::LengthMismatch {
                rows: x.rows(),
                labels: y.len(),
            });
        }
        if y.is_empty() {
            return Err(ModelError::Empty);
        }
        let predictions = self.predict(x)?;
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(predicted, truth)| predicted == truth)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }

    /// Per-feature weights, ordered by column index.
    pub fn coefficients(&self) -> Result<&[f64], ModelError> {
        self.coefficients
            .as_deref()
            .ok_or(ModelError::NotFitted)
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}
