//! Log-likelihood scoring of test documents

use serde::Serialize;
use std::fmt;

use crate::corpus::{Class, Document};
use crate::model::ProbabilityModel;
use crate::tokenizer::tokenize_lines;

/// Whether a prediction matched the ground truth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Right,
    Wrong,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Right => f.write_str("right"),
            Verdict::Wrong => f.write_str("wrong"),
        }
    }
}

/// One line of a result table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// 1-based position in listing order
    pub rank: usize,
    pub document: String,
    pub predicted: Class,
    pub ham_score: f64,
    pub spam_score: f64,
    pub actual: Class,
    pub verdict: Verdict,
}

/// Scores of one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub spam: f64,
    pub ham: f64,
}

impl Scores {
    /// Ties go to spam
    pub fn predicted(&self) -> Class {
        if self.spam >= self.ham {
            Class::Spam
        } else {
            Class::Ham
        }
    }

    /// Spam truth is right on `spam >= ham`, ham truth only on `ham > spam`
    pub fn verdict(&self, actual: Class) -> Verdict {
        let right = match actual {
            Class::Spam => self.spam >= self.ham,
            Class::Ham => self.ham > self.spam,
        };
        if right {
            Verdict::Right
        } else {
            Verdict::Wrong
        }
    }
}

/// Rows plus misclassification tallies for a test set
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub rows: Vec<ResultRow>,
    pub wrong: usize,
    pub ham_wrong: usize,
    pub spam_wrong: usize,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn right(&self) -> usize {
        self.total() - self.wrong
    }

    /// Fraction classified right, 0 for an empty test set
    pub fn accuracy(&self) -> f64 {
        if self.rows.is_empty() {
            0.0
        } else {
            self.right() as f64 / self.total() as f64
        }
    }
}

/// Sum log-probabilities of the known tokens under each class.
///
/// Tokens outside the model are skipped. A zero probability is skipped for
/// its class rather than producing `-inf`.
pub fn score_tokens<S: AsRef<str>>(tokens: &[S], model: &ProbabilityModel) -> Scores {
    let mut scores = Scores { spam: 0.0, ham: 0.0 };

    for token in tokens {
        let token = token.as_ref();
        if !model.contains(token) {
            continue;
        }
        if let Some(p) = model.probability(Class::Spam, token).filter(|p| *p != 0.0) {
            scores.spam += p.ln();
        }
        if let Some(p) = model.probability(Class::Ham, token).filter(|p| *p != 0.0) {
            scores.ham += p.ln();
        }
    }

    scores
}

/// Score one document's lines
pub fn score_document(document: &Document, model: &ProbabilityModel) -> Scores {
    score_tokens(&tokenize_lines(&document.lines), model)
}

/// Classify test documents in order
pub fn classify(documents: &[Document], model: &ProbabilityModel) -> Classification {
    let mut classification = Classification::default();

    for (index, document) in documents.iter().enumerate() {
        let scores = score_document(document, model);
        let actual = Class::ground_truth(&document.id);
        let verdict = scores.verdict(actual);

        if verdict == Verdict::Wrong {
            classification.wrong += 1;
            match actual {
                Class::Spam => classification.spam_wrong += 1,
                Class::Ham => classification.ham_wrong += 1,
            }
        }

        classification.rows.push(ResultRow {
            rank: index + 1,
            document: document.id.clone(),
            predicted: scores.predicted(),
            ham_score: scores.ham,
            spam_score: scores.spam,
            actual,
            verdict,
        });
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{accumulate, build_model, smooth, ClassTotals};

    fn model() -> ProbabilityModel {
        let docs = vec![
            Document::new("spam1.txt", vec!["buy now buy".to_string()]),
            Document::new("ham1.txt", vec!["meeting now".to_string()]),
        ];
        let counts = smooth(accumulate(&docs), 1.5).unwrap();
        build_model(&counts, counts.vocabulary(), None).unwrap().0
    }

    #[test]
    fn test_scores_match_log_probabilities() {
        let model = model();
        let doc = Document::new("test1.txt", vec!["buy buy".to_string()]);
        let scores = score_document(&doc, &model);

        let expected_spam = 2.0 * (3.5f64 / 7.5).ln();
        let expected_ham = 2.0 * (1.5f64 / 6.5).ln();
        assert!((scores.spam - expected_spam).abs() < 1e-12);
        assert!((scores.ham - expected_ham).abs() < 1e-12);
        assert_eq!(scores.predicted(), Class::Spam);
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let model = model();
        let scores = score_tokens(&["zebra", "quantum"], &model);
        assert_eq!(scores, Scores { spam: 0.0, ham: 0.0 });
    }

    #[test]
    fn test_zero_probability_is_skipped() {
        let docs = vec![
            Document::new("spam1.txt", vec!["buy now buy".to_string()]),
            Document::new("ham1.txt", vec!["meeting now".to_string()]),
        ];
        let counts = smooth(accumulate(&docs), 1.5).unwrap();
        let totals = ClassTotals {
            spam: f64::INFINITY,
            ham: 6.5,
        };
        let (model, _) = build_model(&counts, counts.vocabulary(), Some(totals)).unwrap();
        assert_eq!(model.probability(Class::Spam, "buy"), Some(0.0));

        let scores = score_tokens(&["buy", "now"], &model);
        assert_eq!(scores.spam, 0.0);
        assert!(scores.ham.is_finite());
        let expected_ham = (1.5f64 / 6.5).ln() + (2.5f64 / 6.5).ln();
        assert!((scores.ham - expected_ham).abs() < 1e-12);
    }

    #[test]
    fn test_tie_rule() {
        let tie = Scores { spam: -3.0, ham: -3.0 };
        assert_eq!(tie.predicted(), Class::Spam);
        assert_eq!(tie.verdict(Class::Spam), Verdict::Right);
        assert_eq!(tie.verdict(Class::Ham), Verdict::Wrong);

        let hammy = Scores { spam: -4.0, ham: -3.0 };
        assert_eq!(hammy.predicted(), Class::Ham);
        assert_eq!(hammy.verdict(Class::Ham), Verdict::Right);
        assert_eq!(hammy.verdict(Class::Spam), Verdict::Wrong);
    }

    #[test]
    fn test_classify_counts_wrong_by_truth() {
        let model = model();
        let docs = vec![
            Document::new("test-ham-1.txt", vec!["meeting".to_string()]),
            Document::new("test-ham-2.txt", vec!["buy buy buy".to_string()]),
            Document::new("test-spam-1.txt", vec!["meeting meeting".to_string()]),
            Document::new("test-ham-3.txt", vec!["nothing known".to_string()]),
        ];
        let result = classify(&docs, &model);

        assert_eq!(result.total(), 4);
        assert_eq!(result.rows[0].rank, 1);
        assert_eq!(result.rows[0].verdict, Verdict::Right);
        assert_eq!(result.rows[1].predicted, Class::Spam);
        assert_eq!(result.rows[2].actual, Class::Spam);
        assert_eq!(result.rows[2].predicted, Class::Ham);
        // No known words: 0 == 0 ties to spam, wrong for a ham document
        assert_eq!(result.rows[3].predicted, Class::Spam);
        assert_eq!(result.rows[3].verdict, Verdict::Wrong);

        assert_eq!(result.wrong, 3);
        assert_eq!(result.ham_wrong, 2);
        assert_eq!(result.spam_wrong, 1);
        assert!((result.accuracy() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_test_set() {
        let result = classify(&[], &model());
        assert_eq!(result.total(), 0);
        assert_eq!(result.accuracy(), 0.0);
    }
}
