//! bayes-rs: Naive Bayes spam/ham text classifier
//!
//! Builds per-class word frequencies from a labeled training corpus, applies
//! additive (Lidstone) smoothing, and classifies test documents by comparing
//! summed log-probabilities. Vocabulary filters (stop words, word length,
//! frequency bands, most-frequent words) reuse the same pipeline so their
//! effect on accuracy can be compared.
//!
//! # Example
//!
//! ```
//! use bayes_rs::corpus::{MemoryCorpus, Partition};
//! use bayes_rs::experiment::{Experiment, ExperimentRunner};
//! use bayes_rs::report::MemorySink;
//!
//! let corpus = MemoryCorpus::new()
//!     .with_document(Partition::Train, "spam1.txt", "buy now buy")
//!     .with_document(Partition::Train, "ham1.txt", "meeting now")
//!     .with_document(Partition::Test, "test1.txt", "buy buy");
//!
//! let runner = ExperimentRunner::train(&corpus, 1.5).unwrap();
//! let mut sink = MemorySink::new();
//! let summary = runner.run(&Experiment::baseline(), &mut sink).unwrap();
//! assert_eq!(summary.wrong, 0);
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`]: line tokenization
//! - [`corpus`]: document sources and labels
//! - [`model`]: frequency accumulation, smoothing, probabilities
//! - [`filter`]: vocabulary filters
//! - [`classifier`]: log-likelihood scoring
//! - [`report`]: table formatting and sinks
//! - [`experiment`]: experiment runner
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod experiment;
pub mod filter;
pub mod model;
pub mod report;
pub mod tokenizer;

// Re-export commonly used types
pub use config::Config;
pub use error::{BayesError, Result};
