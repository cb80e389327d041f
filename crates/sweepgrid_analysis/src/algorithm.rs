//! Algorithm identity: alias normalization and estimator tag matching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classifier family whose trials are aggregated together.
///
/// Well-known aliases resolve to a fixed variant; any other label is kept
/// verbatim as [`Algorithm::Custom`] and matched in title and upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Linear support vector classifier.
    LinearSvc,
    /// Logistic regression.
    LogisticRegression,
    /// Kernel support vector classifier.
    Svc,
    /// Any naive Bayes variant.
    NaiveBayes,
    /// Unrecognized label, passed through unchanged.
    Custom(String),
}

/// Exact (case-sensitive) aliases.
const EXACT_ALIASES: &[(&str, Algorithm)] = &[
    ("linearsvc", Algorithm::LinearSvc),
    ("linear svc", Algorithm::LinearSvc),
    ("logreg", Algorithm::LogisticRegression),
    ("logistic regression", Algorithm::LogisticRegression),
];

/// Case-insensitive whole-label aliases.
const FOLDED_ALIASES: &[(&str, Algorithm)] = &[("svm", Algorithm::Svc)];

/// Case-insensitive substrings that identify naive Bayes.
const NAIVE_BAYES_MARKERS: &[&str] = &["naive", "bayes"];

impl Algorithm {
    /// Resolve a user-facing label to an algorithm.
    ///
    /// Rules, in priority order:
    /// - `"linearsvc"` / `"linear svc"` (exact case) -> [`Algorithm::LinearSvc`]
    /// - `"logreg"` / `"logistic regression"` (exact case) -> [`Algorithm::LogisticRegression`]
    /// - `"svm"` in any case -> [`Algorithm::Svc`]
    /// - contains `"naive"` or `"bayes"` in any case -> [`Algorithm::NaiveBayes`]
    /// - anything else -> [`Algorithm::Custom`] with the label unchanged
    ///
    /// Normalizing a canonical token yields the same token again.
    pub fn normalize(label: &str) -> Self {
        if let Some((_, algorithm)) = EXACT_ALIASES.iter().find(|(alias, _)| *alias == label) {
            return algorithm.clone();
        }

        let folded = label.to_lowercase();
        if let Some((_, algorithm)) = FOLDED_ALIASES.iter().find(|(alias, _)| *alias == folded) {
            return algorithm.clone();
        }
        if NAIVE_BAYES_MARKERS.iter().any(|marker| folded.contains(*marker)) {
            return Algorithm::NaiveBayes;
        }

        // Canonical tokens of the fixed variants are recognized as themselves.
        match label {
            "LinearSVC" => Algorithm::LinearSvc,
            "LogisticRegression" => Algorithm::LogisticRegression,
            "SVC" => Algorithm::Svc,
            "NB" => Algorithm::NaiveBayes,
            _ => Algorithm::Custom(label.to_string()),
        }
    }

    /// The canonical token matched against estimator tags.
    pub fn token(&self) -> &str {
        match self {
            Algorithm::LinearSvc => "LinearSVC",
            Algorithm::LogisticRegression => "LogisticRegression",
            Algorithm::Svc => "SVC",
            Algorithm::NaiveBayes => "NB",
            Algorithm::Custom(label) => label,
        }
    }

    /// Upper-cased token, used in figure titles and file names.
    pub fn display_token(&self) -> String {
        self.token().to_uppercase()
    }

    /// The token forms searched for inside an estimator tag: title case and
    /// upper case (duplicates removed).
    ///
    /// `LinearSVC` and `LogisticRegression` also match verbatim, since neither
    /// cased form can occur in their own estimator names.
    pub fn match_forms(&self) -> Vec<String> {
        let token = self.token();
        let verbatim = match self {
            Algorithm::LinearSvc | Algorithm::LogisticRegression => Some(token.to_string()),
            _ => None,
        };
        let mut forms = Vec::with_capacity(3);
        for form in [title_case(token), token.to_uppercase()].into_iter().chain(verbatim) {
            if !form.is_empty() && !forms.contains(&form) {
                forms.push(form);
            }
        }
        forms
    }

    /// Check whether an estimator tag belongs to this algorithm.
    pub fn matches(&self, classifier_tag: &str) -> bool {
        self.match_forms()
            .iter()
            .any(|form| classifier_tag.contains(form.as_str()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Normalize a label straight to its canonical token.
pub fn normalize(label: &str) -> String {
    Algorithm::normalize(label).token().to_string()
}

/// Title-case a string: the first letter of every run of letters is upper
/// case, the rest lower case. `"linear svc"` -> `"Linear Svc"`,
/// `"LinearSVC"` -> `"Linearsvc"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = c.is_alphabetic();
    }
    out
}
