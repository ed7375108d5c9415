//! # demog
//!
//! Pick the best text-preprocessing configuration for a binary demographic
//! classification task, then understand what the resulting model learned.
//!
//! The pipeline: configurable tokenization → first-seen-order vocabulary →
//! sparse count matrix → k-fold cross-validated logistic regression →
//! exhaustive 64-way configuration sweep → refit on the full corpus →
//! held-out error analysis ranked by how confidently wrong the model was.
//!
//! ## Quick Start
//!
//! ```no_run
//! use demog::{Document, FittedPipeline, Gender, evaluate_all_configurations, evaluate_holdout};
//!
//! let documents = vec![
//!     Document::new("kickoff in ten http://t.co/x").with_profile("father of two"),
//!     Document::new("nail art by @salon").with_profile("makeup artist"),
//! ];
//! let labels = vec![Gender::Male, Gender::Female];
//!
//! // Rank all 64 tokenizer configurations by cross-validated accuracy.
//! let ranked = evaluate_all_configurations(&documents, &labels, 2)?;
//! let best = ranked[0].params.clone();
//!
//! // Refit on everything with the winning configuration.
//! let pipeline = FittedPipeline::fit(&documents, &labels, best)?;
//! for (token, weight) in pipeline.top_coefficients(Gender::Female, 5)? {
//!     println!("{token}: {weight:.5}");
//! }
//!
//! // Score an independently labeled held-out set.
//! let report = evaluate_holdout(&pipeline, &documents, &labels)?;
//! println!("held-out accuracy: {:.3}", report.accuracy);
//! # Ok::<(), demog::SearchError>(())
//! ```

pub mod aggregate;
pub mod cross_validation;
mod error;
pub mod holdout;
mod pipeline;
pub mod search;

pub use aggregate::mean_accuracy_per_setting;
pub use cross_validation::{FOLD_SEED, KFold, cross_validate};
pub use demog_model::{Gender, LogisticRegression, ModelError, Prediction};
pub use demog_pre_processing::{
    Document,
    pre_processor::{CountVectorizer, TokenizerParams, Vocabulary},
};
pub use error::SearchError;
pub use holdout::{HoldoutReport, Misclassified, evaluate_holdout};
pub use pipeline::FittedPipeline;
pub use search::{EvaluationResult, evaluate_all_configurations};
