//! Binary classification model for the demog pipeline.
//!
//! A logistic-regression classifier trained with batch gradient descent
//! directly on sparse CSR rows, plus the [`Gender`] label and [`Prediction`]
//! probability-pair value types. The classifier is deliberately opaque to
//! the rest of the pipeline: train, predict, estimate probabilities.

mod error;
mod logistic;
mod prediction;

pub use error::ModelError;
pub use logistic::LogisticRegression;
pub use prediction::{Gender, Prediction};
