//! bayes-rs: Naive Bayes spam/ham classifier experiments
//!
//! # Usage
//!
//! ```bash
//! # Run every configured experiment
//! bayes-rs --config bayes.toml all
//!
//! # Baseline only, with a different corpus and delta
//! bayes-rs --data-dir ./corpus --delta 0.5 baseline
//!
//! # Drop words seen at most 5 times
//! bayes-rs frequency-band --name "frequency<=5" --lower 0 --upper 5
//! ```

use anyhow::Context;
use bayes_rs::config::{Config, LoggingConfig};
use bayes_rs::corpus::DirectoryCorpus;
use bayes_rs::experiment::{write_summary, Experiment, ExperimentRunner, ExperimentSummary};
use bayes_rs::filter::VocabularyFilter;
use bayes_rs::report::FileSink;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bayes-rs")]
#[command(about = "Naive Bayes spam/ham classifier experiments", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Corpus directory containing train/, test/ and the stop-word list
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for model and result tables
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Smoothing delta
    #[arg(long, global = true)]
    delta: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every experiment enabled in the configuration (default)
    All,
    /// Full vocabulary
    Baseline,
    /// Remove stop words
    StopWords,
    /// Remove words of length <= 2 or >= 9
    WordLength,
    /// Remove words whose frequency lies in [lower, upper]
    FrequencyBand {
        /// Output file prefix
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        lower: i64,
        #[arg(long, allow_negative_numbers = true)]
        upper: i64,
    },
    /// Remove the given percentage of most frequent words
    MostFrequent {
        /// Output file prefix
        #[arg(long)]
        name: String,
        #[arg(long)]
        percent: f64,
    },
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bayes_rs={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.corpus.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(delta) = cli.delta {
        config.model.smoothing_delta = delta;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(&config.logging);
    info!("Starting bayes-rs v{}", env!("CARGO_PKG_VERSION"));
    info!("  Training data: {}", config.corpus.train_path().display());
    info!("  Test data: {}", config.corpus.test_path().display());

    let corpus = DirectoryCorpus::from_config(&config.corpus);
    let runner = ExperimentRunner::train(&corpus, config.model.smoothing_delta)?;
    let mut sink = FileSink::new(&config.output.dir);
    info!("  Output: {}", sink.dir().display());

    let summaries: Vec<ExperimentSummary> = match cli.command.unwrap_or(Commands::All) {
        Commands::All => runner.run_all(&config.experiments, &mut sink)?,
        Commands::Baseline => vec![runner.run(&Experiment::baseline(), &mut sink)?],
        Commands::StopWords => {
            let experiment = Experiment::stop_words(runner.stop_word_filter()?);
            vec![runner.run(&experiment, &mut sink)?]
        }
        Commands::WordLength => vec![runner.run(&Experiment::word_length(), &mut sink)?],
        Commands::FrequencyBand { name, lower, upper } => {
            let experiment =
                Experiment::new(name, Some(VocabularyFilter::FrequencyBand { lower, upper }));
            vec![runner.run(&experiment, &mut sink)?]
        }
        Commands::MostFrequent { name, percent } => {
            let experiment =
                Experiment::new(name, Some(VocabularyFilter::MostFrequent { percent }));
            vec![runner.run(&experiment, &mut sink)?]
        }
    };

    for summary in &summaries {
        info!(
            "{}: vocabulary {}, {}/{} wrong, accuracy {:.4}",
            summary.name, summary.vocabulary_size, summary.wrong, summary.documents, summary.accuracy
        );
    }

    if config.output.summary {
        write_summary(&mut sink, &summaries)?;
    }

    Ok(())
}
