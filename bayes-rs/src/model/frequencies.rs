//! Word frequency accumulation and additive smoothing

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::corpus::{Class, Document};
use crate::error::{BayesError, Result};
use crate::tokenizer::tokenize;

/// Distinct training tokens, kept sorted so every derived output is stable
pub type Vocabulary = BTreeSet<String>;

/// Raw per-class word counts from a training pass
#[derive(Debug, Clone, Default)]
pub struct TrainingCounts {
    vocabulary: Vocabulary,
    spam: HashMap<String, u64>,
    ham: HashMap<String, u64>,
    spam_documents: usize,
    ham_documents: usize,
}

impl TrainingCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the tokens of one training document under the class its id denotes
    pub fn add_document(&mut self, id: &str, lines: &[String]) {
        let class = Class::from_training_id(id);
        let (counts, documents) = match class {
            Class::Spam => (&mut self.spam, &mut self.spam_documents),
            Class::Ham => (&mut self.ham, &mut self.ham_documents),
        };
        *documents += 1;

        for line in lines {
            for token in tokenize(line) {
                *counts.entry(token.clone()).or_insert(0) += 1;
                self.vocabulary.insert(token);
            }
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Raw count of a word in a class, zero when never seen
    pub fn raw_count(&self, class: Class, word: &str) -> u64 {
        self.map(class).get(word).copied().unwrap_or(0)
    }

    /// Number of training documents routed to a class
    pub fn documents(&self, class: Class) -> usize {
        match class {
            Class::Spam => self.spam_documents,
            Class::Ham => self.ham_documents,
        }
    }

    fn map(&self, class: Class) -> &HashMap<String, u64> {
        match class {
            Class::Spam => &self.spam,
            Class::Ham => &self.ham,
        }
    }
}

/// Build raw counts from training documents
pub fn accumulate<'a, I>(documents: I) -> TrainingCounts
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut counts = TrainingCounts::new();
    for document in documents {
        counts.add_document(&document.id, &document.lines);
    }
    debug!(
        "Accumulated {} words from {} spam and {} ham documents",
        counts.vocabulary.len(),
        counts.spam_documents,
        counts.ham_documents
    );
    counts
}

/// Smoothed per-class counts. Every vocabulary word has an entry in both
/// maps, and the value cannot be smoothed a second time.
#[derive(Debug, Clone)]
pub struct SmoothedCounts {
    vocabulary: Vocabulary,
    spam: HashMap<String, f64>,
    ham: HashMap<String, f64>,
    delta: f64,
    spam_total: f64,
    ham_total: f64,
    spam_documents: usize,
    ham_documents: usize,
}

impl SmoothedCounts {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Smoothed count of a vocabulary word in a class
    pub fn count(&self, class: Class, word: &str) -> Result<f64> {
        let map = match class {
            Class::Spam => &self.spam,
            Class::Ham => &self.ham,
        };
        map.get(word).copied().ok_or_else(|| BayesError::MissingWord {
            word: word.to_string(),
            class,
        })
    }

    /// Smoothed spam count plus smoothed ham count
    pub fn combined(&self, word: &str) -> Result<f64> {
        Ok(self.count(Class::Spam, word)? + self.count(Class::Ham, word)?)
    }

    /// Sum of all smoothed counts of a class
    pub fn total(&self, class: Class) -> f64 {
        match class {
            Class::Spam => self.spam_total,
            Class::Ham => self.ham_total,
        }
    }

    pub fn documents(&self, class: Class) -> usize {
        match class {
            Class::Spam => self.spam_documents,
            Class::Ham => self.ham_documents,
        }
    }
}

/// Add `delta` to every vocabulary word's count in both classes.
///
/// Consumes the raw counts; the returned maps are total over the vocabulary.
pub fn smooth(counts: TrainingCounts, delta: f64) -> Result<SmoothedCounts> {
    if !delta.is_finite() || delta <= 0.0 {
        return Err(BayesError::InvalidParameter(format!(
            "smoothing delta must be positive, got {}",
            delta
        )));
    }

    let TrainingCounts {
        vocabulary,
        spam,
        ham,
        spam_documents,
        ham_documents,
    } = counts;

    let smooth_class = |raw: &HashMap<String, u64>| -> HashMap<String, f64> {
        vocabulary
            .iter()
            .map(|word| {
                let count = raw.get(word).copied().unwrap_or(0) as f64;
                (word.clone(), count + delta)
            })
            .collect()
    };
    let spam = smooth_class(&spam);
    let ham = smooth_class(&ham);

    let mut smoothed = SmoothedCounts {
        vocabulary,
        spam,
        ham,
        delta,
        spam_total: 0.0,
        ham_total: 0.0,
        spam_documents,
        ham_documents,
    };

    // Sum in vocabulary order so totals are reproducible to the last bit
    let mut spam_total = 0.0;
    let mut ham_total = 0.0;
    for word in &smoothed.vocabulary {
        spam_total += smoothed.count(Class::Spam, word)?;
        ham_total += smoothed.count(Class::Ham, word)?;
    }
    smoothed.spam_total = spam_total;
    smoothed.ham_total = ham_total;

    debug!(
        "Smoothed {} words with delta {}: spam total {}, ham total {}",
        smoothed.vocabulary.len(),
        delta,
        spam_total,
        ham_total
    );
    Ok(smoothed)
}
