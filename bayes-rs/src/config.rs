//! Configuration for bayes-rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{BayesError, Result};
use crate::filter::VocabularyFilter;

/// Main classifier configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Corpus locations
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Model parameters
    #[serde(default)]
    pub model: ModelConfig,
    /// Which experiments `all` runs
    #[serde(default)]
    pub experiments: ExperimentsConfig,
    /// Output location
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Corpus locations. `train_dir`, `test_dir` and `stop_words` are relative to
/// `data_dir` unless absolute.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_train_dir")]
    pub train_dir: PathBuf,
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,
    #[serde(default = "default_stop_words")]
    pub stop_words: PathBuf,
}

/// Model parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Additive smoothing constant
    #[serde(default = "default_smoothing_delta")]
    pub smoothing_delta: f64,
}

/// Experiment selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExperimentsConfig {
    #[serde(default = "default_true")]
    pub baseline: bool,
    #[serde(default = "default_true")]
    pub stop_words: bool,
    #[serde(default = "default_true")]
    pub word_length: bool,
    #[serde(default = "default_frequency_bands")]
    pub frequency_bands: Vec<FrequencyBandConfig>,
    #[serde(default = "default_most_frequent")]
    pub most_frequent: Vec<MostFrequentConfig>,
}

/// Frequency-band experiment
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FrequencyBandConfig {
    /// Output file prefix
    pub name: String,
    pub lower: i64,
    pub upper: i64,
}

/// Most-frequent-word removal experiment
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MostFrequentConfig {
    /// Output file prefix
    pub name: String,
    /// Percentage of the vocabulary to drop, 0 to 100
    pub percent: f64,
}

/// Output location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Also write `summary.json`
    #[serde(default)]
    pub summary: bool,
}

/// Logging setup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of `pretty`, `compact`, `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_train_dir() -> PathBuf {
    PathBuf::from("train")
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("test")
}

fn default_stop_words() -> PathBuf {
    PathBuf::from("stopWords.txt")
}

fn default_smoothing_delta() -> f64 {
    1.5
}

fn default_true() -> bool {
    true
}

fn default_frequency_bands() -> Vec<FrequencyBandConfig> {
    let mut bands = vec![FrequencyBandConfig {
        name: "frequency=1".to_string(),
        lower: 1,
        upper: 1,
    }];
    for upper in [5, 10, 15, 20] {
        bands.push(FrequencyBandConfig {
            name: format!("frequency<={}", upper),
            lower: 0,
            upper,
        });
    }
    bands
}

fn default_most_frequent() -> Vec<MostFrequentConfig> {
    [5, 10, 15, 20, 25]
        .into_iter()
        .map(|percent| MostFrequentConfig {
            name: format!("top-{}-percent", percent),
            percent: percent as f64,
        })
        .collect()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            train_dir: default_train_dir(),
            test_dir: default_test_dir(),
            stop_words: default_stop_words(),
        }
    }
}

impl CorpusConfig {
    pub fn train_path(&self) -> PathBuf {
        self.data_dir.join(&self.train_dir)
    }

    pub fn test_path(&self) -> PathBuf {
        self.data_dir.join(&self.test_dir)
    }

    pub fn stop_words_path(&self) -> PathBuf {
        self.data_dir.join(&self.stop_words)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            smoothing_delta: default_smoothing_delta(),
        }
    }
}

impl Default for ExperimentsConfig {
    fn default() -> Self {
        Self {
            baseline: true,
            stop_words: true,
            word_length: true,
            frequency_bands: default_frequency_bands(),
            most_frequent: default_most_frequent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            summary: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl FrequencyBandConfig {
    pub fn filter(&self) -> VocabularyFilter {
        VocabularyFilter::FrequencyBand {
            lower: self.lower,
            upper: self.upper,
        }
    }
}

impl MostFrequentConfig {
    pub fn filter(&self) -> VocabularyFilter {
        VocabularyFilter::MostFrequent {
            percent: self.percent,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BayesError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| BayesError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let delta = self.model.smoothing_delta;
        if !delta.is_finite() || delta <= 0.0 {
            return Err(BayesError::InvalidParameter(format!(
                "smoothing_delta must be positive, got {}",
                delta
            )));
        }

        let mut names = HashSet::new();
        let experiments = &self.experiments;
        for (name, filter) in experiments
            .frequency_bands
            .iter()
            .map(|band| (&band.name, band.filter()))
            .chain(
                experiments
                    .most_frequent
                    .iter()
                    .map(|top| (&top.name, top.filter())),
            )
        {
            if name.is_empty() {
                return Err(BayesError::Config("Experiment name is empty".to_string()));
            }
            if !names.insert(name.as_str()) {
                return Err(BayesError::Config(format!(
                    "Duplicate experiment name '{}'",
                    name
                )));
            }
            filter.validate()?;
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(BayesError::Config(format!(
                "Unknown logging format '{}'",
                other
            ))),
        }
    }
}
