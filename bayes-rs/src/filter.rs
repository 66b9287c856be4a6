//! Vocabulary filters
//!
//! Each filter decides keep/drop per word, then builds a new vocabulary and
//! class totals reduced by the smoothed counts of the dropped words.

use std::collections::HashSet;
use std::fmt;

use crate::corpus::Class;
use crate::error::{BayesError, Result};
use crate::model::{ClassTotals, SmoothedCounts, Vocabulary};
use crate::tokenizer::tokenize_lines;

/// Words this short or shorter are dropped by [`VocabularyFilter::WordLength`]
pub const MAX_SHORT_WORD_LEN: usize = 2;
/// Words this long or longer are dropped by [`VocabularyFilter::WordLength`]
pub const MIN_LONG_WORD_LEN: usize = 9;

/// Vocabulary pruning strategy
#[derive(Debug, Clone, PartialEq)]
pub enum VocabularyFilter {
    /// Drop words listed in a stop-word list
    StopWords(HashSet<String>),
    /// Drop words of length <= 2 or >= 9
    WordLength,
    /// Drop words whose combined raw frequency lies in `[lower, upper]`
    FrequencyBand { lower: i64, upper: i64 },
    /// Drop the given percentage of most frequent words
    MostFrequent { percent: f64 },
}

/// Result of applying a filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredVocabulary {
    pub vocabulary: Vocabulary,
    pub totals: ClassTotals,
    pub removed: usize,
}

impl FilteredVocabulary {
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

impl VocabularyFilter {
    /// Stop-word filter from raw stop-word lines, tokenized like documents
    pub fn stop_words_from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        VocabularyFilter::StopWords(tokenize_lines(lines).into_iter().collect())
    }

    /// Check parameters; the filters themselves assume these hold
    pub fn validate(&self) -> Result<()> {
        match self {
            VocabularyFilter::FrequencyBand { lower, upper } if lower > upper => {
                Err(BayesError::InvalidParameter(format!(
                    "frequency band lower bound {} exceeds upper bound {}",
                    lower, upper
                )))
            }
            VocabularyFilter::MostFrequent { percent }
                if !percent.is_finite() || *percent < 0.0 || *percent > 100.0 =>
            {
                Err(BayesError::InvalidParameter(format!(
                    "most-frequent percentage must be within 0..=100, got {}",
                    percent
                )))
            }
            _ => Ok(()),
        }
    }

    /// Derive the filtered vocabulary and adjusted totals
    pub fn apply(&self, counts: &SmoothedCounts) -> Result<FilteredVocabulary> {
        self.validate()?;

        let dropped = self.dropped_words(counts)?;

        let full = ClassTotals::of(counts);
        let mut totals = full;
        let mut vocabulary = Vocabulary::new();
        for word in counts.vocabulary() {
            if dropped.contains(word.as_str()) {
                totals.spam -= counts.count(Class::Spam, word)?;
                totals.ham -= counts.count(Class::Ham, word)?;
            } else {
                vocabulary.insert(word.clone());
            }
        }

        Ok(FilteredVocabulary {
            vocabulary,
            totals,
            removed: dropped.len(),
        })
    }

    fn dropped_words<'a>(&self, counts: &'a SmoothedCounts) -> Result<HashSet<&'a str>> {
        let vocabulary = counts.vocabulary();
        let dropped: HashSet<&'a str> = match self {
            VocabularyFilter::StopWords(stop_words) => vocabulary
                .iter()
                .filter(|word| stop_words.contains(word.as_str()))
                .map(String::as_str)
                .collect(),
            VocabularyFilter::WordLength => vocabulary
                .iter()
                .filter(|word| is_excluded_length(word))
                .map(String::as_str)
                .collect(),
            VocabularyFilter::FrequencyBand { lower, upper } => {
                let (lower, upper) = (*lower as f64, *upper as f64);
                let smoothing = 2.0 * counts.delta();
                let mut dropped = HashSet::new();
                for word in vocabulary {
                    let frequency = counts.combined(word)? - smoothing;
                    if lower <= frequency && frequency <= upper {
                        dropped.insert(word.as_str());
                    }
                }
                dropped
            }
            VocabularyFilter::MostFrequent { percent } => {
                let mut ranked = Vec::with_capacity(vocabulary.len());
                for word in vocabulary {
                    ranked.push((word.as_str(), counts.combined(word)?));
                }
                // Highest combined frequency first, ties in word order
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

                let limit = percent / 100.0 * vocabulary.len() as f64;
                ranked
                    .into_iter()
                    .enumerate()
                    .take_while(|(index, _)| (*index as f64) < limit)
                    .map(|(_, (word, _))| word)
                    .collect()
            }
        };
        Ok(dropped)
    }
}

impl fmt::Display for VocabularyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularyFilter::StopWords(words) => write!(f, "stop words ({} listed)", words.len()),
            VocabularyFilter::WordLength => write!(
                f,
                "word length (drop <= {} or >= {})",
                MAX_SHORT_WORD_LEN, MIN_LONG_WORD_LEN
            ),
            VocabularyFilter::FrequencyBand { lower, upper } => {
                write!(f, "frequency band [{}, {}]", lower, upper)
            }
            VocabularyFilter::MostFrequent { percent } => write!(f, "top {}% most frequent", percent),
        }
    }
}

fn is_excluded_length(word: &str) -> bool {
    let len = word.chars().count();
    len <= MAX_SHORT_WORD_LEN || len >= MIN_LONG_WORD_LEN
}
