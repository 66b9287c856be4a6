//! Corpus access
//!
//! Documents are addressed by their file name inside a partition. The file
//! name doubles as the class label, so the label helpers live here too.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::CorpusConfig;
use crate::error::{BayesError, Result};

/// Document class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Spam,
    Ham,
}

impl Class {
    /// Class used to route training documents: "spam" in the name, else ham
    pub fn from_training_id(id: &str) -> Self {
        if id.contains("spam") {
            Class::Spam
        } else {
            Class::Ham
        }
    }

    /// Ground truth of a test document: "ham" in the name, else spam
    pub fn ground_truth(id: &str) -> Self {
        if id.contains("ham") {
            Class::Ham
        } else {
            Class::Spam
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Spam => "spam",
            Class::Ham => "ham",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Corpus partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Partition {
    Train,
    Test,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Train => f.write_str("train"),
            Partition::Test => f.write_str("test"),
        }
    }
}

/// A document loaded into memory
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            id: id.into(),
            lines,
        }
    }
}

/// Source of documents and stop words
pub trait CorpusSource {
    /// Document identifiers of a partition, sorted
    fn list_documents(&self, partition: Partition) -> Result<Vec<String>>;

    /// Lines of one document
    fn read_lines(&self, partition: Partition, id: &str) -> Result<Vec<String>>;

    /// Lines of the stop-word list
    fn stop_word_lines(&self) -> Result<Vec<String>>;

    /// Load every document of a partition in listing order
    fn load_partition(&self, partition: Partition) -> Result<Vec<Document>> {
        self.list_documents(partition)?
            .into_iter()
            .map(|id| {
                let lines = self.read_lines(partition, &id)?;
                Ok(Document::new(id, lines))
            })
            .collect()
    }
}

/// Decode bytes as Latin-1. Every byte maps to the char with the same code
/// point, so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Read a file as Latin-1 text and split it into lines
pub fn read_latin1_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| BayesError::corpus(path, e))?;
    Ok(decode_latin1(&bytes).lines().map(str::to_string).collect())
}

/// Corpus stored as plain files in `train/` and `test/` directories
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    train_dir: PathBuf,
    test_dir: PathBuf,
    stop_words: PathBuf,
}

impl DirectoryCorpus {
    pub fn new(
        train_dir: impl Into<PathBuf>,
        test_dir: impl Into<PathBuf>,
        stop_words: impl Into<PathBuf>,
    ) -> Self {
        Self {
            train_dir: train_dir.into(),
            test_dir: test_dir.into(),
            stop_words: stop_words.into(),
        }
    }

    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new(
            config.train_path(),
            config.test_path(),
            config.stop_words_path(),
        )
    }

    fn dir(&self, partition: Partition) -> &Path {
        match partition {
            Partition::Train => &self.train_dir,
            Partition::Test => &self.test_dir,
        }
    }
}

impl CorpusSource for DirectoryCorpus {
    fn list_documents(&self, partition: Partition) -> Result<Vec<String>> {
        let dir = self.dir(partition);
        let entries = fs::read_dir(dir).map_err(|e| BayesError::corpus(dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BayesError::corpus(dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| BayesError::corpus(entry.path(), e))?;
            if file_type.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        debug!("Listed {} {} documents in {:?}", names.len(), partition, dir);
        Ok(names)
    }

    fn read_lines(&self, partition: Partition, id: &str) -> Result<Vec<String>> {
        read_latin1_lines(&self.dir(partition).join(id))
    }

    fn stop_word_lines(&self) -> Result<Vec<String>> {
        read_latin1_lines(&self.stop_words)
    }
}

/// In-memory corpus, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    train: BTreeMap<String, Vec<String>>,
    test: BTreeMap<String, Vec<String>>,
    stop_words: Vec<String>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any previous one with the same id
    pub fn with_document(mut self, partition: Partition, id: &str, text: &str) -> Self {
        let lines = text.lines().map(str::to_string).collect();
        match partition {
            Partition::Train => self.train.insert(id.to_string(), lines),
            Partition::Test => self.test.insert(id.to_string(), lines),
        };
        self
    }

    pub fn with_stop_words(mut self, text: &str) -> Self {
        self.stop_words = text.lines().map(str::to_string).collect();
        self
    }

    fn docs(&self, partition: Partition) -> &BTreeMap<String, Vec<String>> {
        match partition {
            Partition::Train => &self.train,
            Partition::Test => &self.test,
        }
    }
}

impl CorpusSource for MemoryCorpus {
    fn list_documents(&self, partition: Partition) -> Result<Vec<String>> {
        Ok(self.docs(partition).keys().cloned().collect())
    }

    fn read_lines(&self, partition: Partition, id: &str) -> Result<Vec<String>> {
        self.docs(partition).get(id).cloned().ok_or_else(|| {
            BayesError::corpus(
                format!("{}/{}", partition, id),
                std::io::Error::new(std::io::ErrorKind::NotFound, "document not found"),
            )
        })
    }

    fn stop_word_lines(&self) -> Result<Vec<String>> {
        Ok(self.stop_words.clone())
    }
}
