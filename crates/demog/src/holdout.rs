use demog_model::{Gender, ModelError};
use demog_pre_processing::Document;
use serde::Serialize;
use tracing::debug;

use crate::{error::SearchError, pipeline::FittedPipeline};

/// One held-out document the model got wrong.
#[derive(Debug, Clone, Serialize)]
pub struct Misclassified {
    /// Position in the held-out document set.
    pub index: usize,
    pub truth: Gender,
    pub predicted: Gender,
    /// Probability the model assigned to its (wrong) predicted class.
    pub confidence: f64,
    pub document: Document,
}

/// Held-out evaluation summary.
#[derive(Debug, Clone, Serialize)]
pub struct HoldoutReport {
    pub accuracy: f64,
    pub male_count: usize,
    pub female_count: usize,
    /// Every misclassified document, ranked by descending confidence in the
    /// wrong prediction — the most confidently wrong first.
    pub misclassified: Vec<Misclassified>,
}

impl HoldoutReport {
    /// The `n` most confidently wrong documents (fewer if there aren't `n`).
    #[must_use]
    pub fn top_misclassified(&self, n: usize) -> &[Misclassified] {
        &self.misclassified[..n.min(self.misclassified.len())]
    }
}

/// Score an independently labeled document set against a fitted pipeline.
///
/// Documents are vectorized with the pipeline's frozen training vocabulary —
/// never rebuilt — so tokens unseen during training are dropped, not added.
pub fn evaluate_holdout(
    pipeline: &FittedPipeline,
    documents: &[Document],
    labels: &[Gender],
) -> Result<HoldoutReport, SearchError> {
    if documents.len() != labels.len() {
        return Err(SearchError::CorpusMismatch {
            n_docs: documents.len(),
            n_labels: labels.len(),
        });
    }
    if documents.is_empty() {
        return Err(SearchError::Model(ModelError::Empty));
    }

    let predictions = pipeline.predict(documents)?;
    let mut correct = 0;
    let mut misclassified = Vec::new();
    for (index, (prediction, &truth)) in predictions.iter().zip(labels).enumerate() {
        let predicted = prediction.predicted();
        if predicted == truth {
            correct += 1;
        } else {
            misclassified.push(Misclassified {
                index,
                truth,
                predicted,
                confidence: prediction.confidence(),
                document: documents[index].clone(),
            });
        }
    }
    misclassified.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let female_count = labels.iter().filter(|label| label.is_female()).count();
    let report = HoldoutReport {
        accuracy: correct as f64 / labels.len() as f64,
        male_count: labels.len() - female_count,
        female_count,
        misclassified,
    };
    debug!(
        accuracy = report.accuracy,
        errors = report.misclassified.len(),
        "Held-out evaluation complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use demog_pre_processing::pre_processor::TokenizerParams;

    use super::*;

    fn training_corpus() -> (Vec<Document>, Vec<Gender>) {
        let documents = vec![
            Document::new("football practice tonight"),
            Document::new("football and wings"),
            Document::new("watching football highlights"),
            Document::new("makeup tutorial time"),
            Document::new("new makeup haul"),
            Document::new("makeup before brunch"),
        ];
        let labels = vec![
            Gender::Male,
            Gender::Male,
            Gender::Male,
            Gender::Female,
            Gender::Female,
            Gender::Female,
        ];
        (documents, labels)
    }

    fn fitted() -> FittedPipeline {
        let (documents, labels) = training_corpus();
        let params = TokenizerParams::new(false, true, false, "", false, false);
        FittedPipeline::fit(&documents, &labels, params).expect("fit succeeds")
    }

    #[test]
    fn clean_holdout_reports_no_errors() {
        let pipeline = fitted();
        let documents = vec![
            Document::new("football on sunday"),
            Document::new("makeup looks great"),
        ];
        let labels = vec![Gender::Male, Gender::Female];

        let report = evaluate_holdout(&pipeline, &documents, &labels).expect("evaluation runs");
        assert!((report.accuracy - 1.0).abs() < 1e-12);
        assert!(report.misclassified.is_empty());
        assert_eq!(report.male_count, 1);
        assert_eq!(report.female_count, 1);
    }

    #[test]
    fn errors_are_ranked_by_confidence_in_the_wrong_class() {
        let pipeline = fitted();
        // Flipped labels force every prediction to count as wrong; the
        // double-signal document should rank above the diluted one.
        let documents = vec![
            Document::new("football with extra words padding the signal"),
            Document::new("football football all day"),
            Document::new("makeup makeup session"),
        ];
        let labels = vec![Gender::Female, Gender::Female, Gender::Male];

        let report = evaluate_holdout(&pipeline, &documents, &labels).expect("evaluation runs");
        assert!((report.accuracy - 0.0).abs() < 1e-12);
        assert_eq!(report.misclassified.len(), 3);
        for pair in report.misclassified.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for item in &report.misclassified {
            assert_ne!(item.truth, item.predicted);
            assert!(item.confidence >= 0.5);
        }
        assert_eq!(report.top_misclassified(2).len(), 2);
        assert_eq!(report.top_misclassified(99).len(), 3);
    }

    #[test]
    fn unseen_tokens_are_dropped_not_added() {
        let pipeline = fitted();
        let vocab_size = pipeline.vocabulary().len();
        let documents = vec![Document::new("makeup vocabulary-buster zzz")];
        let labels = vec![Gender::Female];

        let report = evaluate_holdout(&pipeline, &documents, &labels).expect("evaluation runs");
        assert!((report.accuracy - 1.0).abs() < 1e-12);
        // The frozen vocabulary is untouched by held-out data.
        assert_eq!(pipeline.vocabulary().len(), vocab_size);
    }

    #[test]
    fn empty_holdout_is_rejected() {
        let pipeline = fitted();
        assert!(matches!(
            evaluate_holdout(&pipeline, &[], &[]),
            Err(SearchError::Model(ModelError::Empty))
        ));
    }
}
