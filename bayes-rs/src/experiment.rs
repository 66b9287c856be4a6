//! Experiment runner
//!
//! Trains once, then runs any number of experiments against the same smoothed
//! counts. Each experiment optionally filters the vocabulary, builds a model,
//! classifies the test partition and writes `<name>-model.txt` and
//! `<name>-result.txt` to a sink.

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::classify;
use crate::config::ExperimentsConfig;
use crate::corpus::{Class, CorpusSource, Document, Partition};
use crate::error::Result;
use crate::filter::VocabularyFilter;
use crate::model::{accumulate, build_model, smooth, SmoothedCounts};
use crate::report::ReportSink;

/// A named run, with or without a vocabulary filter
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub name: String,
    pub filter: Option<VocabularyFilter>,
}

impl Experiment {
    pub fn new(name: impl Into<String>, filter: Option<VocabularyFilter>) -> Self {
        Self {
            name: name.into(),
            filter,
        }
    }

    /// Full vocabulary, unfiltered
    pub fn baseline() -> Self {
        Self::new("baseline", None)
    }

    pub fn stop_words(filter: VocabularyFilter) -> Self {
        Self::new("stopword", Some(filter))
    }

    pub fn word_length() -> Self {
        Self::new("wordlength", Some(VocabularyFilter::WordLength))
    }

    pub fn model_file(&self) -> String {
        format!("{}-model.txt", self.name)
    }

    pub fn result_file(&self) -> String {
        format!("{}-result.txt", self.name)
    }
}

/// Outcome of one experiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentSummary {
    pub name: String,
    pub vocabulary_size: usize,
    pub spam_documents: usize,
    pub ham_documents: usize,
    pub documents: usize,
    pub wrong: usize,
    pub ham_wrong: usize,
    pub spam_wrong: usize,
    pub accuracy: f64,
}

/// Trained counts plus the loaded test partition
pub struct ExperimentRunner<'a, S: CorpusSource> {
    source: &'a S,
    counts: SmoothedCounts,
    test_documents: Vec<Document>,
}

impl<'a, S: CorpusSource> ExperimentRunner<'a, S> {
    /// Accumulate and smooth the training partition, then load the test one
    pub fn train(source: &'a S, smoothing_delta: f64) -> Result<Self> {
        info!("Building model...");
        let training = source.load_partition(Partition::Train)?;
        let raw = accumulate(&training);
        info!(
            "Trained on {} spam and {} ham documents",
            raw.documents(Class::Spam),
            raw.documents(Class::Ham)
        );

        info!("Adding smoothing (delta = {})", smoothing_delta);
        let counts = smooth(raw, smoothing_delta)?;
        info!("Vocabulary size: {}", counts.vocabulary().len());

        let test_documents = source.load_partition(Partition::Test)?;
        debug!("Loaded {} test documents", test_documents.len());

        Ok(Self {
            source,
            counts,
            test_documents,
        })
    }

    pub fn counts(&self) -> &SmoothedCounts {
        &self.counts
    }

    pub fn test_documents(&self) -> &[Document] {
        &self.test_documents
    }

    /// Stop-word filter built from the source's stop-word list
    pub fn stop_word_filter(&self) -> Result<VocabularyFilter> {
        let lines = self.source.stop_word_lines()?;
        Ok(VocabularyFilter::stop_words_from_lines(lines))
    }

    /// Run one experiment and write its tables
    pub fn run<K: ReportSink>(
        &self,
        experiment: &Experiment,
        sink: &mut K,
    ) -> Result<ExperimentSummary> {
        let (model, rows) = match &experiment.filter {
            Some(filter) => {
                debug!("Applying {} filter for {}", filter, experiment.name);
                let filtered = filter.apply(&self.counts)?;
                info!("Vocab size: {}", filtered.len());
                build_model(&self.counts, &filtered.vocabulary, Some(filtered.totals))?
            }
            None => build_model(&self.counts, self.counts.vocabulary(), None)?,
        };

        let model_file = experiment.model_file();
        info!("Writing to {}", model_file);
        sink.write_rows(&model_file, &rows)?;

        let classification = classify(&self.test_documents, &model);
        let result_file = experiment.result_file();
        info!("Writing to {}", result_file);
        sink.write_rows(&result_file, &classification.rows)?;

        info!(
            "Classified Wrong in {} = {}",
            result_file, classification.wrong
        );
        info!(
            "Classified Ham Wrong in {} = {}",
            result_file, classification.ham_wrong
        );
        info!(
            "Classified spam Wrong in {} = {}",
            result_file, classification.spam_wrong
        );

        Ok(ExperimentSummary {
            name: experiment.name.clone(),
            vocabulary_size: model.len(),
            spam_documents: self.counts.documents(Class::Spam),
            ham_documents: self.counts.documents(Class::Ham),
            documents: classification.total(),
            wrong: classification.wrong,
            ham_wrong: classification.ham_wrong,
            spam_wrong: classification.spam_wrong,
            accuracy: classification.accuracy(),
        })
    }

    /// Experiments enabled by the configuration, in run order
    pub fn planned(&self, config: &ExperimentsConfig) -> Result<Vec<Experiment>> {
        let mut experiments = Vec::new();
        if config.baseline {
            experiments.push(Experiment::baseline());
        }
        if config.stop_words {
            experiments.push(Experiment::stop_words(self.stop_word_filter()?));
        }
        if config.word_length {
            experiments.push(Experiment::word_length());
        }
        for band in &config.frequency_bands {
            experiments.push(Experiment::new(band.name.clone(), Some(band.filter())));
        }
        for top in &config.most_frequent {
            experiments.push(Experiment::new(top.name.clone(), Some(top.filter())));
        }
        Ok(experiments)
    }

    /// Run every configured experiment
    pub fn run_all<K: ReportSink>(
        &self,
        config: &ExperimentsConfig,
        sink: &mut K,
    ) -> Result<Vec<ExperimentSummary>> {
        self.planned(config)?
            .iter()
            .map(|experiment| self.run(experiment, &mut *sink))
            .collect()
    }
}

/// Write summaries as pretty JSON under `summary.json`
pub fn write_summary<K: ReportSink>(sink: &mut K, summaries: &[ExperimentSummary]) -> Result<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    sink.write_table("summary.json", &json)
}
