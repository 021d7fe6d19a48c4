//! Error handling for SpeedCoach export parsing.
//!
//! Every failure names the file it came from so callers can report it
//! without threading the path through themselves.

use crate::models::SectionKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeedCoachError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {path} does not appear to be a valid NK SpeedCoach file: no section markers found")]
    InvalidFormat { path: PathBuf },

    #[error("Incomplete sections in file: {path} - missing {}", describe_sections(.missing))]
    IncompleteSections {
        path: PathBuf,
        missing: Vec<SectionKind>,
    },

    #[error(
        "Malformed range for {section} section in file: {path} - starts at line {start}, next section at line {end}"
    )]
    MalformedRange {
        path: PathBuf,
        section: SectionKind,
        start: usize,
        end: usize,
    },

    #[error(
        "Schema mismatch in {section} section of {path} at line {line}: expected {expected} columns, found {found}"
    )]
    SchemaMismatch {
        path: PathBuf,
        section: SectionKind,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("No header row found for {section} section in file: {path}")]
    MissingHeader { path: PathBuf, section: SectionKind },

    #[error("Metadata window '{window}' in {path} ends before row {row}")]
    MetadataWindow {
        path: PathBuf,
        window: &'static str,
        row: usize,
    },

    #[error("CSV error in {path} at line {line}: {source}")]
    Csv {
        path: PathBuf,
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn describe_sections(sections: &[SectionKind]) -> String {
    sections
        .iter()
        .map(|section| section.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SpeedCoachError>;
