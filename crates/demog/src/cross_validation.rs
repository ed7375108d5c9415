use demog_model::{Gender, LogisticRegression};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use sprs::CsMat;
use tracing::debug;

use crate::error::SearchError;

/// Seed for the fold shuffle. Fixed so identical inputs always produce
/// identical folds, run after run.
pub const FOLD_SEED: u64 = 42;

/// K-Fold splitter with a seeded shuffle.
///
/// Samples are shuffled once with [`FOLD_SEED`], then cut into `n_splits`
/// contiguous folds; the remainder is spread over the first folds, so fold
/// sizes differ by at most one.
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    /// `n_splits` must be at least 2; [`cross_validate`] enforces this
    /// before splitting.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// Generate (train, test) index pairs, one per fold.
    #[must_use]
    pub fn split(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(FOLD_SEED);
        indices.shuffle(&mut rng);

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut splits = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let current_fold_size = if fold < remainder {
                fold_size + 1
            } else {
                fold_size
            };
            let end = start + current_fold_size;

            let test_indices = indices[start..end].to_vec();
            let mut train_indices = Vec::with_capacity(n_samples - current_fold_size);
            train_indices.extend_from_slice(&indices[..start]);
            train_indices.extend_from_slice(&indices[end..]);

            splits.push((train_indices, test_indices));
            start = end;
        }
        splits
    }
}

/// Average held-out accuracy over `k` folds.
///
/// Each fold trains a fresh classifier on the complement rows and scores the
/// fold itself; no state crosses folds. Fails with
/// [`SearchError::InvalidFoldCount`] when `k < 2` or `k` exceeds the number
/// of documents.
pub fn cross_validate(x: &CsMat<f64>, y: &[Gender], k: usize) -> Result<f64, SearchError> {
    let n_docs = x.rows();
    if y.len() != n_docs {
        return Err(SearchError::CorpusMismatch {
            n_docs,
            n_labels: y.len(),
        });
    }
    if k < 2 || k > n_docs {
        return Err(SearchError::InvalidFoldCount { k, n_docs });
    }

    let mut accuracies = Vec::with_capacity(k);
    for (train_indices, test_indices) in KFold::new(k).split(n_docs) {
        let x_train = select_rows(x, &train_indices);
        let y_train = select_labels(y, &train_indices);
        let x_test = select_rows(x, &test_indices);
        let y_test = select_labels(y, &test_indices);

        let mut fold_model = LogisticRegression::new();
        fold_model.fit(&x_train, &y_train)?;
        accuracies.push(fold_model.score(&x_test, &y_test)?);
    }

    let mean = accuracies.iter().sum::<f64>() / accuracies.len() as f64;
    debug!(k, mean_accuracy = mean, "Cross-validation complete");
    Ok(mean)
}

/// Copy the selected rows into a fresh CSR matrix with the same width.
fn select_rows(x: &CsMat<f64>, rows: &[usize]) -> CsMat<f64> {
    let mut indptr = Vec::with_capacity(rows.len() + 1);
    let mut indices = Vec::new();
    let mut data = Vec::new();

    indptr.push(0);
    for &row_idx in rows {
        if let Some(row) = x.outer_view(row_idx) {
            for (col_idx, &value) in row.iter() {
                indices.push(col_idx);
                data.push(value);
            }
        }
        indptr.push(indices.len());
    }
    CsMat::new((rows.len(), x.cols()), indptr, indices, data)
}

fn select_labels(y: &[Gender], rows: &[usize]) -> Vec<Gender> {
    rows.iter().map(|&row_idx| y[row_idx]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_corpus(n_per_class: usize) -> (CsMat<f64>, Vec<Gender>) {
        let mut indptr = vec![0];
        let mut indices = Vec::new();
        let mut data = Vec::new();
        let mut labels = Vec::new();
        for i in 0..(2 * n_per_class) {
            let female = i % 2 == 1;
            indices.push(usize::from(female));
            data.push(2.0 + (i % 3) as f64);
            indptr.push(indices.len());
            labels.push(if female { Gender::Female } else { Gender::Male });
        }
        (CsMat::new((2 * n_per_class, 2), indptr, indices, data), labels)
    }

    #[test]
    fn split_produces_k_folds() {
        assert_eq!(KFold::new(5).split(100).len(), 5);
    }

    #[test]
    fn every_sample_lands_in_exactly_one_test_fold() {
        let mut test_counts = vec![0usize; 20];
        for (_, test_indices) in KFold::new(5).split(20) {
            for &idx in &test_indices {
                test_counts[idx] += 1;
            }
        }
        assert!(test_counts.iter().all(|&count| count == 1));
    }

    #[test]
    fn train_and_test_cover_all_samples_and_stay_disjoint() {
        let n = 17; // not divisible by k, exercises the remainder spread
        for (train_indices, test_indices) in KFold::new(4).split(n) {
            let mut all: Vec<usize> = train_indices
                .iter()
                .chain(test_indices.iter())
                .copied()
                .collect();
            all.sort_unstable();
            all.dedup();
            assert_eq!(all.len(), n);
        }
    }

    #[test]
    fn fold_sizes_differ_by_at_most_one() {
        let sizes: Vec<usize> = KFold::new(4)
            .split(17)
            .iter()
            .map(|(_, test_indices)| test_indices.len())
            .collect();
        assert_eq!(sizes.iter().sum::<usize>(), 17);
        let min = sizes.iter().min().copied().unwrap_or(0);
        let max = sizes.iter().max().copied().unwrap_or(0);
        assert!(max - min <= 1);
    }

    #[test]
    fn split_is_deterministic() {
        assert_eq!(KFold::new(5).split(40), KFold::new(5).split(40));
    }

    #[test]
    fn fold_count_must_fit_the_corpus() {
        let (x, y) = separable_corpus(3);
        assert!(matches!(
            cross_validate(&x, &y, 7),
            Err(SearchError::InvalidFoldCount { k: 7, n_docs: 6 })
        ));
        assert!(matches!(
            cross_validate(&x, &y, 1),
            Err(SearchError::InvalidFoldCount { k: 1, n_docs: 6 })
        ));
    }

    #[test]
    fn separable_corpus_scores_perfectly() {
        let (x, y) = separable_corpus(6);
        let accuracy = cross_validate(&x, &y, 3).expect("valid fold count");
        assert!((accuracy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn select_rows_keeps_row_content() {
        let (x, _) = separable_corpus(3);
        let subset = select_rows(&x, &[4, 1]);
        assert_eq!(subset.rows(), 2);
        assert_eq!(subset.cols(), x.cols());
        assert_eq!(subset.get(0, 0), x.get(4, 0));
        assert_eq!(subset.get(0, 1), x.get(4, 1));
        assert_eq!(subset.get(1, 1), x.get(1, 1));
    }
}
