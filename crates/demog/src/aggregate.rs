use tracing::debug;

use crate::search::EvaluationResult;

/// Marginal mean accuracy for every individual setting value.
///
/// For each `key=value` label appearing in any evaluated configuration,
/// averages the accuracy of all configurations carrying that value — an
/// unweighted main-effects estimate over the full result set, not a
/// factorial decomposition. Entries come back sorted by descending mean;
/// ties keep first-seen label order.
pub fn mean_accuracy_per_setting(results: &[EvaluationResult]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64, usize)> = Vec::new();
    for result in results {
        for label in result.params.setting_labels() {
            match totals.iter_mut().find(|(existing, _, _)| *existing == label) {
                Some((_, sum, count)) => {
                    *sum += result.accuracy;
                    *count += 1;
                }
                None => totals.push((label, result.accuracy, 1)),
            }
        }
    }
    debug!(num_settings = totals.len(), "Aggregated per-setting accuracy");

    let mut means: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(label, sum, count)| (label, sum / count as f64))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    means
}

#[cfg(test)]
mod tests {
    use demog_pre_processing::pre_processor::TokenizerParams;

    use super::*;

    fn result(accuracy: f64, lowercase: bool) -> EvaluationResult {
        EvaluationResult {
            accuracy,
            params: TokenizerParams::new(true, lowercase, true, "d=", true, true),
        }
    }

    fn mean_for<'a>(means: &'a [(String, f64)], label: &str) -> f64 {
        means
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, mean)| *mean)
            .expect("label present")
    }

    #[test]
    fn marginalizes_over_configurations_carrying_each_value() {
        let results = vec![
            result(0.8, true),
            result(0.6, false),
            result(0.9, true),
        ];
        let means = mean_accuracy_per_setting(&results);

        assert!((mean_for(&means, "lowercase=true") - 0.85).abs() < 1e-12);
        assert!((mean_for(&means, "lowercase=false") - 0.6).abs() < 1e-12);
        // Settings shared by all three configurations average the full set.
        let overall = (0.8 + 0.6 + 0.9) / 3.0;
        assert!((mean_for(&means, "use_profile=true") - overall).abs() < 1e-12);
    }

    #[test]
    fn entries_are_sorted_descending() {
        let results = vec![result(0.8, true), result(0.6, false), result(0.9, true)];
        let means = mean_accuracy_per_setting(&results);
        for pair in means.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        let (top_label, top_mean) = means.first().expect("entries exist");
        assert_eq!(top_label.as_str(), "lowercase=true");
        assert!((*top_mean - 0.85).abs() < 1e-12);
    }

    #[test]
    fn full_grid_yields_twelve_setting_values() {
        let results: Vec<EvaluationResult> = TokenizerParams::grid()
            .into_iter()
            .map(|params| EvaluationResult {
                accuracy: 0.5,
                params,
            })
            .collect();
        assert_eq!(mean_accuracy_per_setting(&results).len(), 12);
    }
}
