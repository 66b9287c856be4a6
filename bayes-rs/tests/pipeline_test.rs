//! Integration tests for the classification pipeline on an on-disk corpus

use bayes_rs::config::Config;
use bayes_rs::corpus::{Class, CorpusSource, DirectoryCorpus, Partition};
use bayes_rs::experiment::{write_summary, Experiment, ExperimentRunner};
use bayes_rs::filter::VocabularyFilter;
use bayes_rs::model::build_model;
use bayes_rs::report::FileSink;
use bayes_rs::BayesError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to lay out a small corpus under `root`
fn write_corpus(root: &Path) {
    let train = root.join("train");
    let test = root.join("test");
    fs::create_dir_all(&train).unwrap();
    fs::create_dir_all(&test).unwrap();

    fs::write(train.join("spam1.txt"), b"buy now buy\n").unwrap();
    fs::write(train.join("ham1.txt"), b"meeting now\n").unwrap();
    fs::write(test.join("test1.txt"), b"buy buy").unwrap();
    fs::write(root.join("stopWords.txt"), b"now\nthe a\n").unwrap();
}

fn config_for(root: &Path, out: &Path) -> Config {
    let mut config = Config::default();
    config.corpus.data_dir = root.to_path_buf();
    config.output.dir = out.to_path_buf();
    config
}

#[test]
fn test_end_to_end_scenario() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());
    let out = temp_dir.path().join("out");
    let config = config_for(temp_dir.path(), &out);

    let corpus = DirectoryCorpus::from_config(&config.corpus);
    let runner = ExperimentRunner::train(&corpus, config.model.smoothing_delta).unwrap();

    let counts = runner.counts();
    assert_eq!(counts.total(Class::Spam), 7.5);
    assert_eq!(counts.total(Class::Ham), 6.5);
    assert_eq!(counts.count(Class::Spam, "meeting").unwrap(), 1.5);
    assert_eq!(counts.count(Class::Ham, "now").unwrap(), 2.5);

    let mut sink = FileSink::new(&out);
    let summary = runner.run(&Experiment::baseline(), &mut sink).unwrap();
    assert_eq!(summary.wrong, 0);

    let model = fs::read_to_string(out.join("baseline-model.txt")).unwrap();
    let expected_model = format!(
        "1  buy  0  {}  2  {}\n2  meeting  1  {}  0  {}\n3  now  1  {}  1  {}",
        1.5 / 6.5,
        3.5 / 7.5,
        2.5 / 6.5,
        1.5 / 7.5,
        2.5 / 6.5,
        2.5 / 7.5
    );
    assert_eq!(model, expected_model);

    let result = fs::read_to_string(out.join("baseline-result.txt")).unwrap();
    assert!(!result.ends_with('\n'));
    let fields: Vec<&str> = result.split("  ").collect();
    assert_eq!(fields.len(), 7);
    assert_eq!(fields[0], "1");
    assert_eq!(fields[1], "test1.txt");
    assert_eq!(fields[2], "spam");
    let ham_score: f64 = fields[3].parse().unwrap();
    let spam_score: f64 = fields[4].parse().unwrap();
    assert!((ham_score - 2.0 * (1.5f64 / 6.5).ln()).abs() < 1e-12);
    assert!((spam_score - 2.0 * (3.5f64 / 7.5).ln()).abs() < 1e-12);
    assert_eq!(fields[5], "spam");
    assert_eq!(fields[6], "right");
}

#[test]
fn test_full_suite_writes_every_table() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());
    let out = temp_dir.path().join("out");
    let mut config = config_for(temp_dir.path(), &out);
    config.output.summary = true;

    let corpus = DirectoryCorpus::from_config(&config.corpus);
    let runner = ExperimentRunner::train(&corpus, config.model.smoothing_delta).unwrap();
    let mut sink = FileSink::new(&config.output.dir);

    let summaries = runner.run_all(&config.experiments, &mut sink).unwrap();
    write_summary(&mut sink, &summaries).unwrap();

    for name in [
        "baseline",
        "stopword",
        "wordlength",
        "frequency=1",
        "frequency<=20",
        "top-5-percent",
        "top-25-percent",
    ] {
        assert!(out.join(format!("{}-model.txt", name)).exists(), "{}", name);
        assert!(out.join(format!("{}-result.txt", name)).exists(), "{}", name);
    }
    assert!(out.join("summary.json").exists());

    let stopword = summaries.iter().find(|s| s.name == "stopword").unwrap();
    assert_eq!(stopword.vocabulary_size, 2);
    let everything_removed = summaries.iter().find(|s| s.name == "frequency<=20").unwrap();
    assert_eq!(everything_removed.vocabulary_size, 0);
    assert_eq!(
        fs::read_to_string(out.join("frequency<=20-model.txt")).unwrap(),
        ""
    );
}

#[test]
fn test_latin1_documents_are_read() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());
    // 0xE9 is 'é' in Latin-1 and invalid as standalone UTF-8
    fs::write(
        temp_dir.path().join("train").join("spam2.txt"),
        b"caf\xe9 \xff\xfe offer\n",
    )
    .unwrap();

    let corpus = DirectoryCorpus::new(
        temp_dir.path().join("train"),
        temp_dir.path().join("test"),
        temp_dir.path().join("stopWords.txt"),
    );
    let lines = corpus.read_lines(Partition::Train, "spam2.txt").unwrap();
    assert_eq!(lines, vec!["caf\u{e9} \u{ff}\u{fe} offer"]);

    let runner = ExperimentRunner::train(&corpus, 1.5).unwrap();
    assert!(runner.counts().vocabulary().contains("caf"));
    assert!(runner.counts().vocabulary().contains("offer"));
}

#[test]
fn test_filter_totals_match_removed_counts() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path());
    let corpus = DirectoryCorpus::new(
        temp_dir.path().join("train"),
        temp_dir.path().join("test"),
        temp_dir.path().join("stopWords.txt"),
    );
    let runner = ExperimentRunner::train(&corpus, 1.5).unwrap();
    let counts = runner.counts();

    let filters = vec![
        runner.stop_word_filter().unwrap(),
        VocabularyFilter::WordLength,
        VocabularyFilter::FrequencyBand { lower: 0, upper: 1 },
        VocabularyFilter::MostFrequent { percent: 50.0 },
    ];
    for filter in filters {
        let filtered = filter.apply(counts).unwrap();
        for class in [Class::Spam, Class::Ham] {
            let removed: f64 = counts
                .vocabulary()
                .iter()
                .filter(|w| !filtered.vocabulary.contains(*w))
                .map(|w| counts.count(class, w).unwrap())
                .sum();
            let total = match class {
                Class::Spam => filtered.totals.spam,
                Class::Ham => filtered.totals.ham,
            };
            assert!((removed + total - counts.total(class)).abs() < 1e-9, "{}", filter);
        }

        let (model, rows) =
            build_model(counts, &filtered.vocabulary, Some(filtered.totals)).unwrap();
        assert_eq!(model.len(), filtered.len());
        assert_eq!(rows.len(), filtered.len());
    }
}

#[test]
fn test_missing_training_directory_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let corpus = DirectoryCorpus::new(
        temp_dir.path().join("train"),
        temp_dir.path().join("test"),
        temp_dir.path().join("stopWords.txt"),
    );
    let err = ExperimentRunner::train(&corpus, 1.5).err().unwrap();
    assert!(matches!(err, BayesError::Corpus { .. }));
}
