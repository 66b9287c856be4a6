//! Table formatting and output sinks
//!
//! Tables are rows of fields separated by two spaces, one row per line, with
//! no header and no trailing newline.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classifier::ResultRow;
use crate::error::Result;
use crate::model::ModelRow;

const FIELD_SEPARATOR: &str = "  ";

impl fmt::Display for ModelRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{rank}{sep}{word}{sep}{ham_count}{sep}{ham_p}{sep}{spam_count}{sep}{spam_p}",
            rank = self.rank,
            word = self.word,
            ham_count = self.ham_count,
            ham_p = self.ham_probability,
            spam_count = self.spam_count,
            spam_p = self.spam_probability,
            sep = FIELD_SEPARATOR,
        )
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{rank}{sep}{document}{sep}{predicted}{sep}{ham}{sep}{spam}{sep}{actual}{sep}{verdict}",
            rank = self.rank,
            document = self.document,
            predicted = self.predicted,
            ham = self.ham_score,
            spam = self.spam_score,
            actual = self.actual,
            verdict = self.verdict,
            sep = FIELD_SEPARATOR,
        )
    }
}

/// Render rows as newline-separated lines without a trailing newline
pub fn render_table<R: fmt::Display>(rows: &[R]) -> String {
    rows.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Destination for rendered tables
pub trait ReportSink {
    /// Store a rendered table under a file-like name
    fn write_table(&mut self, name: &str, table: &str) -> Result<()>;

    /// Render rows and store them
    fn write_rows<R: fmt::Display>(&mut self, name: &str, rows: &[R]) -> Result<()>
    where
        Self: Sized,
    {
        self.write_table(name, &render_table(rows))
    }
}

/// Writes each table to a file in an output directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write arbitrary text next to the tables
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl ReportSink for FileSink {
    fn write_table(&mut self, name: &str, table: &str) -> Result<()> {
        let path = self.write_file(name, table)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Keeps tables in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    tables: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tables.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl ReportSink for MemorySink {
    fn write_table(&mut self, name: &str, table: &str) -> Result<()> {
        self.tables.insert(name.to_string(), table.to_string());
        Ok(())
    }
}
