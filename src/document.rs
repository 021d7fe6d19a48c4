//! In-memory export file addressable by line and byte offset.
//!
//! The whole file is read once and never modified. A line index built at
//! load time lets every extractor take its own view of the text without a
//! shared read cursor.

use crate::constants::IN_MEMORY_SOURCE;
use crate::error::{Result, SpeedCoachError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immutable text of one export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    source: PathBuf,
    text: String,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
}

impl RawDocument {
    /// Load a document from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SpeedCoachError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let document = Self::from_text(path, text);
        debug!(
            "Loaded {}: {} lines, {} bytes",
            path.display(),
            document.line_count(),
            document.len()
        );
        Ok(document)
    }

    /// Wrap text that is already in memory
    pub fn from_text(source: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with('\u{feff}') {
            text.replace_range(..'\u{feff}'.len_utf8(), "");
        }

        let line_starts = index_lines(&text);
        Self {
            source: source.into(),
            text,
            line_starts,
        }
    }

    /// Wrap text with no backing file
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::from_text(IN_MEMORY_SOURCE, text)
    }

    /// Where the text came from, used in diagnostics
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line content by 1-based line number, without its terminator
    pub fn line(&self, number: usize) -> Option<&str> {
        let index = number.checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.text.len());

        let line = &self.text[start..end];
        let line = line.strip_suffix('\n').unwrap_or(line);
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Byte offset where a 1-based line starts
    pub fn line_offset(&self, number: usize) -> Option<usize> {
        self.line_starts.get(number.checked_sub(1)?).copied()
    }

    /// 1-based number of the line containing a byte offset
    pub fn line_at_offset(&self, offset: usize) -> Option<usize> {
        if offset >= self.text.len() {
            return None;
        }
        // line_starts is sorted and always begins with 0 for non-empty text
        Some(self.line_starts.partition_point(|start| *start <= offset))
    }

    /// All lines with their 1-based numbers
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.lines_after(0)
    }

    /// Lines following the first `skip` lines, with their 1-based numbers
    pub fn lines_after(&self, skip: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
        (skip.saturating_add(1)..=self.line_count())
            .filter_map(move |number| Some((number, self.line(number)?)))
    }
}

fn index_lines(text: &str) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut starts = vec![0];
    starts.extend(
        text.match_indices('\n')
            .map(|(position, _)| position + 1)
            .filter(|start| *start < text.len()),
    );
    starts
}
