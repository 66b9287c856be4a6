//! Probability model construction

use serde::Serialize;
use std::collections::HashMap;

use super::frequencies::{SmoothedCounts, Vocabulary};
use crate::corpus::Class;
use crate::error::Result;

/// Denominators used to turn smoothed counts into probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassTotals {
    pub spam: f64,
    pub ham: f64,
}

impl ClassTotals {
    /// Full smoothed totals of a training pass
    pub fn of(counts: &SmoothedCounts) -> Self {
        Self {
            spam: counts.total(Class::Spam),
            ham: counts.total(Class::Ham),
        }
    }

    pub fn get(&self, class: Class) -> f64 {
        match class {
            Class::Spam => self.spam,
            Class::Ham => self.ham,
        }
    }
}

/// One line of a model table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRow {
    /// 1-based position in lexicographic order
    pub rank: usize,
    pub word: String,
    pub ham_count: i64,
    pub ham_probability: f64,
    pub spam_count: i64,
    pub spam_probability: f64,
}

/// Per-class word probabilities over a (possibly filtered) vocabulary
#[derive(Debug, Clone, Default)]
pub struct ProbabilityModel {
    spam: HashMap<String, f64>,
    ham: HashMap<String, f64>,
}

impl ProbabilityModel {
    /// Probability of a word under a class, `None` outside the vocabulary
    pub fn probability(&self, class: Class, word: &str) -> Option<f64> {
        match class {
            Class::Spam => self.spam.get(word).copied(),
            Class::Ham => self.ham.get(word).copied(),
        }
    }

    /// Whether the word is part of the model's key set
    pub fn contains(&self, word: &str) -> bool {
        self.spam.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.spam.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spam.is_empty()
    }
}

/// Build class probabilities for `vocabulary`.
///
/// `totals` defaults to the full smoothed totals; filters pass totals already
/// reduced by the words they removed.
pub fn build_model(
    counts: &SmoothedCounts,
    vocabulary: &Vocabulary,
    totals: Option<ClassTotals>,
) -> Result<(ProbabilityModel, Vec<ModelRow>)> {
    let totals = totals.unwrap_or_else(|| ClassTotals::of(counts));
    let delta = counts.delta();

    let mut model = ProbabilityModel::default();
    let mut rows = Vec::with_capacity(vocabulary.len());

    for (index, word) in vocabulary.iter().enumerate() {
        let ham_count = counts.count(Class::Ham, word)?;
        let spam_count = counts.count(Class::Spam, word)?;
        let ham_probability = ham_count / totals.ham;
        let spam_probability = spam_count / totals.spam;

        model.ham.insert(word.clone(), ham_probability);
        model.spam.insert(word.clone(), spam_probability);

        rows.push(ModelRow {
            rank: index + 1,
            word: word.clone(),
            ham_count: (ham_count - delta).trunc() as i64,
            ham_probability,
            spam_count: (spam_count - delta).trunc() as i64,
            spam_probability,
        });
    }

    Ok((model, rows))
}
