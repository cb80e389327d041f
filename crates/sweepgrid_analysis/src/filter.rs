//! Selecting the trials that belong to one algorithm.

use sweepgrid_core::TrialRecord;

use crate::algorithm::Algorithm;

/// The trials of one algorithm, in their original order.
#[derive(Debug, Clone)]
pub struct FilteredTrials<'a> {
    trials: Vec<&'a TrialRecord>,
}

impl<'a> FilteredTrials<'a> {
    /// Matched trials.
    pub fn trials(&self) -> &[&'a TrialRecord] {
        &self.trials
    }

    /// Scores of the matched trials, parallel to [`trials`](Self::trials).
    pub fn scores(&self) -> Vec<f64> {
        self.trials.iter().map(|t| t.score).collect()
    }

    /// Number of matched trials.
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

/// Keep the trials whose estimator tag matches `algorithm`.
///
/// The result is a subsequence of `trials`: relative order is preserved and
/// nothing is duplicated.
pub fn filter_trials<'a>(algorithm: &Algorithm, trials: &'a [TrialRecord]) -> FilteredTrials<'a> {
    let trials = trials
        .iter()
        .filter(|t| algorithm.matches(&t.classifier_tag))
        .collect();
    FilteredTrials { trials }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepgrid_core::ParamSet;

    fn trial(tag: &str, score: f64) -> TrialRecord {
        TrialRecord::new(tag, ParamSet::new(), score)
    }

    #[test]
    fn test_filter_preserves_order() {
        let trials = vec![
            trial("RandomForestClassifier(n_estimators=5)", 0.70),
            trial("SVC(C=0.1)", 0.60),
            trial("RandomForestClassifier(n_estimators=100)", 0.72),
            trial("GaussianNB()", 0.58),
            trial("RandomForestClassifier(n_estimators=200)", 0.73),
        ];

        let filtered = filter_trials(&Algorithm::normalize("forest"), &trials);

        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered.scores(), vec![0.70, 0.72, 0.73]);
    }

    #[test]
    fn test_filter_no_match() {
        let trials = vec![trial("SVC()", 0.6)];
        let filtered = filter_trials(&Algorithm::normalize("knn"), &trials);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_svc_token_also_matches_linear_svc() {
        // Substring matching: the SVC token is contained in LinearSVC tags.
        let trials = vec![trial("LinearSVC(C=0.01)", 0.7), trial("SVC(C=0.1)", 0.6)];
        let filtered = filter_trials(&Algorithm::Svc, &trials);
        assert_eq!(filtered.len(), 2);

        let filtered = filter_trials(&Algorithm::LinearSvc, &trials);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_custom_label_uses_cased_forms_only() {
        let trials = vec![
            trial("MLPClassifier(alpha=0.01)", 0.73),
            trial("KNeighborsClassifier(n_neighbors=7)", 0.69),
        ];
        assert!(filter_trials(&Algorithm::normalize("alpha"), &trials).is_empty());
        assert!(filter_trials(&Algorithm::normalize("KNeighbors"), &trials).is_empty());
        assert_eq!(filter_trials(&Algorithm::normalize("mlp"), &trials).len(), 1);
    }
}
