//! Naive Bayes word model
//!
//! Training runs in three steps: accumulate raw counts, smooth them once,
//! then derive class probabilities over the full or a filtered vocabulary.

pub mod builder;
pub mod frequencies;

pub use builder::{build_model, ClassTotals, ModelRow, ProbabilityModel};
pub use frequencies::{accumulate, smooth, SmoothedCounts, TrainingCounts, Vocabulary};
