//! Hand-history log reader.
//!
//! Poker room exports are CSV files with one event description per row in
//! an `entry` column, stored newest-first. The reader loads that column once
//! and hands out borrowed iterators in either direction; it never inspects
//! line content.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ReaderConfig;
use crate::models::SessionId;

/// Errors that can occur while loading a log.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{0}' in log header")]
    MissingColumn(String),
}

/// Row order of the stored log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// An immutable, chronologically ordered buffer of log lines.
#[derive(Debug, Clone)]
pub struct LogReader {
    lines: Vec<String>,
}

impl LogReader {
    /// Load a log from a CSV file on disk.
    pub fn from_path(path: &Path, config: &ReaderConfig) -> Result<Self, ReaderError> {
        info!("Reading hand history from {:?}", path);
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }

    /// Load a log from any CSV source.
    pub fn from_reader<R: Read>(source: R, config: &ReaderConfig) -> Result<Self, ReaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let column = csv_reader
            .headers()?
            .iter()
            .position(|h| h.trim() == config.entry_column)
            .ok_or_else(|| ReaderError::MissingColumn(config.entry_column.clone()))?;

        let mut lines = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            lines.push(record.get(column).unwrap_or_default().to_string());
        }

        debug!("Loaded {} log rows", lines.len());
        Ok(Self::from_lines(lines, config.order))
    }

    /// Wrap lines that are already in memory.
    pub fn from_lines(mut lines: Vec<String>, order: StorageOrder) -> Self {
        if order == StorageOrder::NewestFirst {
            lines.reverse();
        }
        Self { lines }
    }

    /// Lines oldest-first, the order events actually happened.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// Lines newest-first.
    pub fn newest_first(&self) -> impl Iterator<Item = &str> + '_ {
        self.chronological().rev()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Deterministic ID for this log's content.
    pub fn digest(&self) -> SessionId {
        SessionId::from_lines(&self.lines)
    }
}
